//! Deal command: generate the deck for one level and print it.
//!
//! Useful for checking that a seed reproduces the same board.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_board;
use organpair_engine::catalog::Catalog;
use organpair_engine::deck::CardSetGenerator;
use std::io::Write;

/// Handle the deal command.
///
/// The deck is generated directly for `level`; it equals the deck a session
/// would show at that level only when earlier levels drew nothing from the
/// same generator.
pub fn handle_deal_command(
    cfg: &Config,
    level: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if level == 0 {
        return Err(CliError::InvalidInput("level must be >= 1".to_string()));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let catalog = Catalog::default();
    let mut generator =
        CardSetGenerator::new_with_seed(seed).with_max_extra_pairs(cfg.game.max_extra_pairs);
    let deck = generator.generate(&catalog, level);

    writeln!(
        out,
        "deal: seed={} level={} pairs={} tiles={}",
        seed,
        level,
        deck.pair_count(),
        deck.len()
    )?;
    writeln!(out, "{}", format_board(&deck, &catalog))?;
    Ok(())
}
