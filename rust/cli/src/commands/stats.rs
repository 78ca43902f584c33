//! Statistics aggregation over JSONL score files.
//!
//! Each line is one `ScoreRecord` as written by `play --output` or
//! `sim --output`. Corrupt lines are skipped with a warning.

use crate::error::{BatchValidationError, CliError};
use crate::ui;
use chrono::NaiveDate;
use organpair_engine::logger::ScoreRecord;
use std::collections::BTreeSet;
use std::io::Write;

#[derive(Debug, Default, PartialEq)]
struct ScoreStats {
    sessions: u64,
    total_score: i64,
    best_score: Option<i64>,
    highest_level: u32,
    total_matches: u64,
    best_combo: u32,
    users: BTreeSet<u64>,
    first_day: Option<NaiveDate>,
    last_day: Option<NaiveDate>,
}

impl ScoreStats {
    fn add(&mut self, rec: &ScoreRecord) {
        self.sessions += 1;
        self.total_score += rec.score;
        self.best_score = Some(self.best_score.map_or(rec.score, |b| b.max(rec.score)));
        self.highest_level = self.highest_level.max(rec.level);
        self.total_matches += u64::from(rec.total_matches);
        self.best_combo = self.best_combo.max(rec.max_combo);
        self.users.insert(rec.user_id);
        if let Ok(day) = NaiveDate::parse_from_str(&rec.date, "%Y-%m-%d") {
            self.first_day = Some(self.first_day.map_or(day, |d| d.min(day)));
            self.last_day = Some(self.last_day.map_or(day, |d| d.max(day)));
        }
    }

    fn average(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.total_score as f64 / self.sessions as f64
        }
    }
}

/// Aggregates a JSONL score file.
///
/// # Errors
///
/// - `CliError::Io` when the file cannot be read
/// - `CliError::InvalidInput` when the file has lines but none of them parse
pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = std::fs::read_to_string(input)?;
    let (stats, failures) = aggregate(&content);

    for failure in &failures {
        ui::display_warning(err, &format!("Skipped line {}", failure))?;
    }
    if stats.sessions == 0 && !failures.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no valid score records in {}",
            input
        )));
    }

    writeln!(out, "Sessions: {}", stats.sessions)?;
    if let Some(best) = stats.best_score {
        writeln!(out, "Best score: {}", best)?;
    }
    writeln!(out, "Average score: {:.1}", stats.average())?;
    writeln!(out, "Highest level: {}", stats.highest_level)?;
    writeln!(out, "Total matches: {}", stats.total_matches)?;
    writeln!(out, "Best combo: {}", stats.best_combo)?;
    writeln!(out, "Players: {}", stats.users.len())?;
    if let (Some(first), Some(last)) = (stats.first_day, stats.last_day) {
        writeln!(out, "Days: {} .. {}", first, last)?;
    }
    if !failures.is_empty() {
        writeln!(out, "Skipped: {}", failures.len())?;
    }
    Ok(())
}

fn aggregate(content: &str) -> (ScoreStats, Vec<BatchValidationError<usize>>) {
    let mut stats = ScoreStats::default();
    let mut failures = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ScoreRecord>(line) {
            Ok(rec) => stats.add(&rec),
            Err(e) => failures.push(BatchValidationError {
                item_context: i + 1,
                message: e.to_string(),
            }),
        }
    }
    (stats, failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = concat!(
        r#"{"date":"2026-10-01","score":1275,"level":2,"user_id":1,"total_matches":15,"max_combo":15}"#,
        "\n",
        r#"{"date":"2026-10-02","score":-25,"level":1,"user_id":2}"#,
        "\n"
    );

    #[test]
    fn aggregates_records() {
        let (stats, failures) = aggregate(TWO);
        assert!(failures.is_empty());
        assert_eq!(stats.sessions, 2);
        assert_eq!(stats.best_score, Some(1275));
        assert_eq!(stats.highest_level, 2);
        assert_eq!(stats.total_matches, 15);
        assert_eq!(stats.best_combo, 15);
        assert_eq!(stats.users.len(), 2);
        assert!((stats.average() - 625.0).abs() < f64::EPSILON);
        assert_eq!(stats.first_day, NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(stats.last_day, NaiveDate::from_ymd_opt(2026, 10, 2));
    }

    #[test]
    fn corrupt_lines_are_numbered() {
        let content = format!("{}not json\n\n{{\"date\":\"x\"}}\n", TWO);
        let (stats, failures) = aggregate(&content);
        assert_eq!(stats.sessions, 2);
        let lines: Vec<usize> = failures.iter().map(|f| f.item_context).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn empty_content() {
        let (stats, failures) = aggregate("");
        assert_eq!(stats, ScoreStats::default());
        assert!(failures.is_empty());
        assert_eq!(stats.average(), 0.0);
    }

    #[test]
    fn all_corrupt_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "oops\n").unwrap();
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let res = handle_stats_command(path.to_str().unwrap(), &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(String::from_utf8(err).unwrap().contains("WARNING: Skipped line 1"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let res = handle_stats_command("/no/such/scores.jsonl", &mut out, &mut err);
        assert!(matches!(res, Err(CliError::Io(_))));
    }
}
