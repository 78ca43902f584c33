//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with the
//! layer it came from (default, file or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "initial_time_secs": {
//!     "value": 75,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Io` if writing to the output stream fails.
pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "user_id": {
            "value": config.user_id,
            "source": sources.user_id,
        },
        "accuracy": {
            "value": config.accuracy,
            "source": sources.accuracy,
        },
        "initial_time_secs": {
            "value": config.game.initial_time_secs,
            "source": sources.initial_time_secs,
        },
        "game": {
            "value": config.game,
            "source": sources.game,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
