//! # organpair CLI Library
//!
//! Command-line front end for the organ/function matching game engine.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `play`: Play one timed session interactively
//! - `sim`: Run automated sessions with the baseline player
//! - `deal`: Print the generated deck for a level
//! - `stats`: Aggregate a JSONL score file
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod ui;
pub mod validation;

use cli::{COMMANDS, Commands, OrganpairCli};
use commands::{
    PlayOptions, SimOptions, WallClock, handle_cfg_command, handle_deal_command,
    handle_play_command, handle_sim_command, handle_stats_command,
};
pub use error::{BatchValidationError, CliError};

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["organpair", "deal", "--seed", "42"];
/// let code = organpair_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match OrganpairCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: organpair <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: organpair --help");
                    exit_code::ERROR
                }
            };
        }
    };

    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    tracing::debug!(command = cmd.name(), "dispatch");
    if let Commands::Stats { input } = &cmd {
        return handle_stats_command(input, out, err);
    }

    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    let cfg = &resolved.config;

    match cmd {
        Commands::Cfg => handle_cfg_command(&resolved, out),
        Commands::Deal { level, seed } => handle_deal_command(cfg, level, seed, out),
        Commands::Play {
            seed,
            user_id,
            output,
        } => {
            let opts = PlayOptions {
                seed,
                user_id: user_id.unwrap_or(cfg.user_id),
                output,
            };
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(
                cfg,
                &opts,
                out,
                err,
                &mut stdin_lock,
                &mut WallClock::new(),
            )
        }
        Commands::Sim {
            sessions,
            seed,
            accuracy,
            secs_per_pick,
            user_id,
            output,
        } => {
            let opts =
                SimOptions::resolve(cfg, sessions, seed, accuracy, secs_per_pick, user_id, output);
            handle_sim_command(cfg, &opts, out, err)
        }
        Commands::Stats { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, _) = run_args(&["organpair", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("Usage"));
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, _, err) = run_args(&["organpair", "fly"]);
        assert_eq!(code, exit_code::ERROR);
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}", c)));
        }
    }

    #[test]
    fn handler_errors_map_to_exit_code() {
        let (code, _, err) = run_args(&["organpair", "stats", "--input", "/no/such/file"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.starts_with("Error: I/O error"));
    }
}
