//! Simulation command: automated sessions played by the baseline player.
//!
//! Every pick costs `secs_per_pick` clock seconds, so sessions always run out
//! of time eventually. Per-session seeds are drawn from a ChaCha20 stream of
//! the base seed, which makes a whole run reproducible from one number.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_summary;
use crate::ui;
use organpair_ai::create_player;
use organpair_engine::catalog::Catalog;
use organpair_engine::logger::{JsonlScoreSink, ScoreSink};
use organpair_engine::session::GameSession;
use organpair_engine::state::FinalSummary;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use tracing::{debug, info};

/// Picks after which a session stops picking and lets the clock run out
const MAX_PICKS_PER_SESSION: u32 = 100_000;

/// Options of one `sim` run, after CLI flags were merged with config.
#[derive(Debug, Clone)]
pub struct SimOptions {
    pub sessions: u32,
    pub seed: u64,
    pub accuracy: f64,
    pub secs_per_pick: u32,
    pub user_id: u64,
    pub output: Option<String>,
}

impl SimOptions {
    /// Merge CLI flags over `cfg`. A missing seed is drawn at random.
    pub fn resolve(
        cfg: &Config,
        sessions: u32,
        seed: Option<u64>,
        accuracy: Option<f64>,
        secs_per_pick: u32,
        user_id: Option<u64>,
        output: Option<String>,
    ) -> Self {
        Self {
            sessions,
            seed: seed.or(cfg.seed).unwrap_or_else(rand::random),
            accuracy: accuracy.unwrap_or(cfg.accuracy),
            secs_per_pick,
            user_id: user_id.unwrap_or(cfg.user_id),
            output,
        }
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.sessions == 0 {
            return Err(CliError::InvalidInput("sessions must be >= 1".to_string()));
        }
        if self.secs_per_pick == 0 {
            return Err(CliError::InvalidInput(
                "secs-per-pick must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(CliError::InvalidInput(
                "accuracy must be within 0.0..=1.0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Handle the sim command.
pub fn handle_sim_command(
    cfg: &Config,
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    opts.validate()?;

    let mut sink = match &opts.output {
        Some(path) => Some(JsonlScoreSink::open(path)?),
        None => None,
    };
    let mut seeds = ChaCha20Rng::seed_from_u64(opts.seed);

    writeln!(
        out,
        "sim: sessions={} seed={} accuracy={} secs_per_pick={}",
        opts.sessions, opts.seed, opts.accuracy, opts.secs_per_pick
    )?;

    let mut summaries = Vec::with_capacity(opts.sessions as usize);
    for i in 1..=opts.sessions {
        let session_seed: u64 = seeds.random();
        let session = play_session(cfg, opts, session_seed, err)?;
        debug!(session = i, seed = session_seed, "sim session finished");
        let Some(summary) = session.final_summary() else {
            return Err(CliError::Engine(format!("session {} did not finish", i)));
        };
        writeln!(
            out,
            "session {}: seed={} {}",
            i,
            session_seed,
            format_summary(&summary)
        )?;
        if let Some(sink) = sink.as_mut() {
            if let Err(e) = session.submit_score(sink as &mut dyn ScoreSink, opts.user_id) {
                ui::display_warning(err, &format!("session {}: score not saved: {}", i, e))?;
            }
        }
        summaries.push(summary);
    }

    info!(sessions = summaries.len(), seed = opts.seed, "sim complete");
    write_aggregate(&summaries, out)?;
    if let (Some(sink), Some(path)) = (&sink, &opts.output) {
        writeln!(out, "Saved {} records to {}", sink.written(), path)?;
    }
    Ok(())
}

/// Run one session to its end.
fn play_session(
    cfg: &Config,
    opts: &SimOptions,
    seed: u64,
    err: &mut dyn Write,
) -> Result<GameSession, CliError> {
    let mut session = GameSession::new(Catalog::default(), cfg.game.clone(), Some(seed))?;
    let mut player = create_player("baseline", opts.accuracy, seed)
        .ok_or_else(|| CliError::Engine("baseline player unavailable".to_string()))?;

    session.start();
    let mut picks = 0u32;
    while !session.is_ended() {
        if picks >= MAX_PICKS_PER_SESSION {
            ui::display_warning(
                err,
                &format!(
                    "{} stopped after {} picks; running out the clock",
                    player.name(),
                    picks
                ),
            )?;
            while !session.is_ended() {
                session.tick();
            }
            break;
        }
        if let Some(id) = player.next_pick(&session) {
            session.select(id);
            picks += 1;
        }
        for _ in 0..opts.secs_per_pick {
            if session.tick().ended().is_some() {
                break;
            }
        }
    }
    Ok(session)
}

fn write_aggregate(summaries: &[FinalSummary], out: &mut dyn Write) -> Result<(), CliError> {
    let n = summaries.len().max(1) as f64;
    let total: i64 = summaries.iter().map(|s| s.score).sum();
    let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    let max_level = summaries.iter().map(|s| s.level).max().unwrap_or(0);
    let max_combo = summaries
        .iter()
        .map(|s| s.max_combo_reached)
        .max()
        .unwrap_or(0);
    writeln!(
        out,
        "Average score: {:.1} | Best score: {} | Highest level: {} | Best combo: {}",
        total as f64 / n,
        best,
        max_level,
        max_combo
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(sessions: u32, seed: u64, accuracy: f64) -> SimOptions {
        SimOptions {
            sessions,
            seed,
            accuracy,
            secs_per_pick: 1,
            user_id: 3,
            output: None,
        }
    }

    fn run(o: &SimOptions) -> (String, String) {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        handle_sim_command(&Config::default(), o, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn runs_are_reproducible() {
        let (a, _) = run(&opts(3, 11, 0.7));
        let (b, _) = run(&opts(3, 11, 0.7));
        assert_eq!(a, b);
        assert_eq!(a.lines().filter(|l| l.starts_with("session ")).count(), 3);
    }

    #[test]
    fn perfect_player_clears_first_level() {
        let session = play_session(&Config::default(), &opts(1, 5, 1.0), 99, &mut Vec::<u8>::new())
            .unwrap();
        let summary = session.final_summary().unwrap();
        assert!(summary.level >= 2);
        assert!(summary.score > 0);
        assert!(summary.max_combo_reached >= Catalog::default().len() as u32);
    }

    #[test]
    fn hopeless_player_only_loses_points() {
        let session = play_session(&Config::default(), &opts(1, 5, 0.0), 99, &mut Vec::<u8>::new())
            .unwrap();
        let summary = session.final_summary().unwrap();
        assert_eq!(summary.total_matches_made, 0);
        assert!(summary.score < 0);
        assert_eq!(summary.level, 1);
    }

    #[test]
    fn rejects_bad_options() {
        let mut o = opts(0, 1, 0.5);
        assert!(matches!(o.validate(), Err(CliError::InvalidInput(_))));
        o.sessions = 1;
        o.secs_per_pick = 0;
        assert!(o.validate().is_err());
        o.secs_per_pick = 1;
        o.accuracy = f64::NAN;
        assert!(o.validate().is_err());
    }

    #[test]
    fn resolve_prefers_flags_over_config() {
        let cfg = Config {
            seed: Some(1),
            user_id: 8,
            accuracy: 0.2,
            ..Config::default()
        };
        let o = SimOptions::resolve(&cfg, 2, Some(9), None, 3, None, None);
        assert_eq!(o.seed, 9);
        assert_eq!(o.user_id, 8);
        assert!((o.accuracy - 0.2).abs() < f64::EPSILON);
        assert_eq!(o.secs_per_pick, 3);
    }
}
