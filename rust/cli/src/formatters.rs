//! Board, tile and score formatters for terminal display.
//!
//! Pure functions; every command prints through these so `play`, `sim` and
//! `deal` agree on how a session looks.
//!
//! ## Example
//!
//! ```rust
//! use organpair_cli::formatters::{format_feedback, format_time};
//! use organpair_engine::rules::Feedback;
//!
//! assert_eq!(format_time(75), "1:15");
//! assert_eq!(format_feedback(&Feedback::gain(85)), "+85");
//! assert_eq!(format_feedback(&Feedback::loss(-25)), "-25");
//! ```

use organpair_engine::catalog::Catalog;
use organpair_engine::deck::Deck;
use organpair_engine::rules::Feedback;
use organpair_engine::state::{FinalSummary, SessionState};
use organpair_engine::tile::{Face, Tile, TileState};

/// Seconds as `m:ss`.
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn format_feedback(feedback: &Feedback) -> String {
    format!("{:+}", feedback.delta)
}

fn face_label(face: Face) -> &'static str {
    match face {
        Face::Organ => "ORGAN",
        Face::Function => "FUNCTION",
    }
}

/// Text printed on a tile: the organ name or its function.
pub fn tile_text<'a>(tile: &Tile, catalog: &'a Catalog) -> &'a str {
    match catalog.item(tile.item()) {
        Some(item) => match tile.face {
            Face::Organ => item.name.as_str(),
            Face::Function => item.function.as_str(),
        },
        None => "?",
    }
}

/// One board row. `position` is the 1-based number the player types.
///
/// ```text
/// [ 3]   ORGAN     Ovarium
/// [ 4] * FUNCTION  Tempat pembuahan
/// [ 5]   (matched)
/// ```
pub fn format_tile(position: usize, tile: &Tile, catalog: &Catalog) -> String {
    match tile.state {
        TileState::Matched => format!("[{:>2}]   (matched)", position),
        TileState::Hidden | TileState::Selected => {
            let marker = if tile.state == TileState::Selected {
                '*'
            } else {
                ' '
            };
            format!(
                "[{:>2}] {} {:<9} {}",
                position,
                marker,
                face_label(tile.face),
                tile_text(tile, catalog)
            )
        }
    }
}

/// Every tile of `deck`, one per line, in board order.
pub fn format_board(deck: &Deck, catalog: &Catalog) -> String {
    deck.tiles()
        .iter()
        .enumerate()
        .map(|(i, t)| format_tile(i + 1, t, catalog))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status line shown above the board.
pub fn format_state(state: &SessionState) -> String {
    format!(
        "Level {} | Score {} | Combo x{} | Time {} | Pairs {}/{}",
        state.level,
        state.score,
        state.combo,
        format_time(state.time_remaining_secs),
        state.matched_pairs,
        state.pairs_in_level
    )
}

pub fn format_summary(summary: &FinalSummary) -> String {
    format!(
        "Final score: {} | Level reached: {} | Matches: {} | Max combo: {}",
        summary.score, summary.level, summary.total_matches_made, summary.max_combo_reached
    )
}
