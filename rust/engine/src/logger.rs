use serde::{Deserialize, Serialize};

use crate::errors::PersistError;
use crate::state::FinalSummary;

/// One finished session as handed to score persistence.
/// Serialized to JSONL by [`JsonlScoreSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Local calendar day the session ended (YYYY-MM-DD)
    pub date: String,
    pub score: i64,
    pub level: u32,
    pub user_id: u64,
    #[serde(default)]
    pub total_matches: u32,
    #[serde(default)]
    pub max_combo: u32,
    /// Seed of the deck generator (enables replaying the same decks)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl ScoreRecord {
    pub fn from_summary(summary: &FinalSummary, user_id: u64, seed: Option<u64>) -> Self {
        Self {
            date: current_date(),
            score: summary.score,
            level: summary.level,
            user_id,
            total_matches: summary.total_matches_made,
            max_combo: summary.max_combo_reached,
            seed,
            ts: None,
        }
    }
}

pub fn current_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Destination for finished sessions (remote API, file, memory...).
/// Implementations own transport and retry policy; the engine calls once.
pub trait ScoreSink {
    fn submit(&mut self, record: &ScoreRecord) -> Result<(), PersistError>;
}

impl ScoreSink for Vec<ScoreRecord> {
    fn submit(&mut self, record: &ScoreRecord) -> Result<(), PersistError> {
        self.push(record.clone());
        Ok(())
    }
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends one JSON line per submitted record.
pub struct JsonlScoreSink {
    writer: BufWriter<File>,
    written: u32,
}

impl JsonlScoreSink {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
            written: 0,
        })
    }

    pub fn written(&self) -> u32 {
        self.written
    }
}

impl ScoreSink for JsonlScoreSink {
    fn submit(&mut self, record: &ScoreRecord) -> Result<(), PersistError> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}
