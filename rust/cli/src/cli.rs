//! Command-line surface of the `organpair` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "organpair",
    version,
    about = "Organ/function matching game in the terminal"
)]
pub struct OrganpairCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one timed session interactively
    Play {
        /// Seed for deck generation (default: config, then random)
        #[arg(long)]
        seed: Option<u64>,
        /// Owner of the submitted score
        #[arg(long)]
        user_id: Option<u64>,
        /// Append the final score to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Run automated sessions with the baseline player
    Sim {
        #[arg(long, default_value_t = 1)]
        sessions: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Probability that the second pick is correct (0.0..=1.0)
        #[arg(long)]
        accuracy: Option<f64>,
        /// Clock seconds spent per pick
        #[arg(long, default_value_t = 1)]
        secs_per_pick: u32,
        #[arg(long)]
        user_id: Option<u64>,
        /// Append one score record per session to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Generate and print the deck for a level
    Deal {
        #[arg(long, default_value_t = 1)]
        level: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Aggregate a JSONL score file
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Sim { .. } => "sim",
            Commands::Deal { .. } => "deal",
            Commands::Stats { .. } => "stats",
            Commands::Cfg => "cfg",
        }
    }
}

/// Subcommand names in help order.
pub const COMMANDS: &[&str] = &["play", "sim", "deal", "stats", "cfg"];

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        OrganpairCli::command().debug_assert();
    }

    #[test]
    fn command_list_matches_subcommands() {
        let cmd = OrganpairCli::command();
        let names: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        assert_eq!(names, COMMANDS);
    }

    #[test]
    fn sim_defaults() {
        let cli = OrganpairCli::try_parse_from(["organpair", "sim"]).unwrap();
        match cli.cmd {
            Commands::Sim {
                sessions,
                secs_per_pick,
                accuracy,
                ..
            } => {
                assert_eq!(sessions, 1);
                assert_eq!(secs_per_pick, 1);
                assert_eq!(accuracy, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn deal_parses_level_and_seed() {
        let cli =
            OrganpairCli::try_parse_from(["organpair", "deal", "--level", "3", "--seed", "9"])
                .unwrap();
        assert_eq!(cli.cmd.name(), "deal");
        assert!(matches!(
            cli.cmd,
            Commands::Deal {
                level: 3,
                seed: Some(9)
            }
        ));
    }
}
