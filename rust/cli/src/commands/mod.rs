//! Command handler modules for the organpair CLI.
//!
//! Each subcommand lives in its own module and follows the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and input sources passed as parameters
//! - Errors propagated via `CliError`; `run` turns them into exit codes

pub mod cfg;
pub mod deal;
pub mod play;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::{PlayOptions, Stopwatch, WallClock, handle_play_command};
pub use sim::{SimOptions, handle_sim_command};
pub use stats::handle_stats_command;
