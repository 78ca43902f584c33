//! # Play Command
//!
//! Interactive session in the terminal. The board is printed after every
//! input; the player types a tile number, an empty line to let time pass, or
//! `q` to abandon the session.
//!
//! Time is measured with a [`Stopwatch`]: whole seconds that elapsed while
//! waiting for input are delivered to the session as clock ticks before the
//! input itself is applied.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_feedback, format_state, format_summary};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_pick};
use organpair_engine::catalog::Catalog;
use organpair_engine::logger::JsonlScoreSink;
use organpair_engine::session::GameSession;
use organpair_engine::state::{SessionEvent, Step};
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Source of elapsed time between inputs.
pub trait Stopwatch {
    /// Whole seconds since the previous call (or since creation).
    fn lap_secs(&mut self) -> u32;
}

/// Wall-clock stopwatch; sub-second remainders carry over to the next lap.
pub struct WallClock {
    last: Instant,
    carry: Duration,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            carry: Duration::ZERO,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch for WallClock {
    fn lap_secs(&mut self) -> u32 {
        let now = Instant::now();
        let total = now.duration_since(self.last) + self.carry;
        self.last = now;
        let secs = total.as_secs();
        self.carry = total - Duration::from_secs(secs);
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

/// Options of one `play` run, after CLI flags were merged with config.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub user_id: u64,
    pub output: Option<String>,
}

/// Handle the play command.
///
/// Returns `Ok(())` both when the clock ran out and when the player quit.
/// A score file that cannot be written only produces a warning.
pub fn handle_play_command(
    cfg: &Config,
    opts: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
    clock: &mut dyn Stopwatch,
) -> Result<(), CliError> {
    let mut session = GameSession::new(Catalog::default(), cfg.game.clone(), opts.seed.or(cfg.seed))?;
    writeln!(out, "play: seed={} user={}", session.seed(), opts.user_id)?;

    let step = session.start();
    report(&step, out)?;

    loop {
        if let Some(deck) = session.deck() {
            writeln!(out, "{}", format_state(&session.state()))?;
            writeln!(out, "{}", format_board(deck, session.catalog()))?;
        }
        write!(out, "Pick a tile (number, Enter to wait, q to quit): ")?;
        out.flush()?;

        let line = read_stdin_line(stdin);
        for _ in 0..clock.lap_secs() {
            let step = session.tick();
            report(&step, out)?;
            if session.is_ended() {
                break;
            }
        }
        if session.is_ended() {
            break;
        }

        let Some(line) = line else {
            return abandon(out);
        };
        let board_len = session.deck().map_or(0, |d| d.len());
        match parse_pick(&line, board_len) {
            ParseResult::Pick(pos) => {
                let Some(id) = session.deck().and_then(|d| d.tiles().get(pos)).map(|t| t.id)
                else {
                    continue;
                };
                let step = session.select(id);
                if step.is_quiet() {
                    ui::write_error(err, &format!("Tile {} cannot be picked", pos + 1))?;
                }
                report(&step, out)?;
            }
            ParseResult::Wait => {}
            ParseResult::Quit => return abandon(out),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }

    let Some(summary) = session.final_summary() else {
        return Ok(());
    };
    writeln!(out, "{}", format_summary(&summary))?;

    if let Some(path) = &opts.output {
        match JsonlScoreSink::open(path) {
            Ok(mut sink) => match session.submit_score(&mut sink, opts.user_id) {
                Ok(()) => writeln!(out, "Score saved to {}", path)?,
                Err(e) => ui::display_warning(err, &format!("Score not saved: {}", e))?,
            },
            Err(e) => ui::display_warning(err, &format!("Cannot open {}: {}", path, e))?,
        }
    }
    Ok(())
}

fn abandon(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out)?;
    writeln!(out, "Session abandoned; no score submitted.")?;
    Ok(())
}

/// Print one message per event worth telling the player about.
fn report(step: &Step, out: &mut dyn Write) -> Result<(), CliError> {
    for event in &step.events {
        match event {
            SessionEvent::Started { level, pairs } => {
                writeln!(out, "Level {}: {} pairs", level, pairs)?;
            }
            SessionEvent::TileSelected(_) => {}
            SessionEvent::Matched {
                points, feedback, ..
            } => {
                writeln!(
                    out,
                    "Match! {} (x{})",
                    format_feedback(feedback),
                    points.multiplier
                )?;
            }
            SessionEvent::Mismatched { feedback, .. } => {
                writeln!(out, "No match {}", format_feedback(feedback))?;
            }
            SessionEvent::LevelCompleted {
                level,
                bonus_secs,
                pairs,
            } => {
                writeln!(
                    out,
                    "Level cleared! Level {}: {} pairs, +{}s",
                    level, pairs, bonus_secs
                )?;
            }
            SessionEvent::Ended(_) => {
                writeln!(out, "Time's up!")?;
            }
        }
    }
    Ok(())
}
