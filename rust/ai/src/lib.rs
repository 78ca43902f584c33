//! # organpair-ai: Automated Players
//!
//! Players that drive a [`GameSession`] without a human, used for simulations
//! and smoke-testing rule changes.
//!
//! ## Core Components
//!
//! - [`AutoPlayer`] - Trait defining how a player picks the next tile
//! - [`baseline`] - Baseline player with a tunable accuracy
//! - [`create_player`] - Factory function for creating players by name
//!
//! ## Quick Start
//!
//! ```rust
//! use organpair_ai::create_player;
//! use organpair_engine::session::GameSession;
//!
//! let mut player = create_player("baseline", 1.0, 42).expect("known player");
//! let mut session = GameSession::with_defaults(Some(42));
//! session.start();
//!
//! while let Some(tile) = player.next_pick(&session) {
//!     let step = session.select(tile);
//!     if step.state.level > 1 {
//!         break;
//!     }
//! }
//! assert_eq!(session.state().level, 2);
//! ```

use organpair_engine::session::GameSession;
use organpair_engine::tile::TileId;

pub mod baseline;

/// Interface for automated players.
///
/// Implementors look at the session (deck, pending pick) and return the tile
/// they want to select next, or `None` when the session does not accept picks.
pub trait AutoPlayer: Send {
    fn next_pick(&mut self, session: &GameSession) -> Option<TileId>;

    fn name(&self) -> &str;
}

/// Factory function to create players by type string.
///
/// `accuracy` is the probability of completing a correct pair; it is clamped
/// to `0.0..=1.0`. Returns `None` for unknown player types.
///
/// # Example
///
/// ```rust
/// use organpair_ai::create_player;
///
/// let player = create_player("baseline", 0.8, 1).unwrap();
/// assert_eq!(player.name(), "BaselinePlayer");
/// assert!(create_player("oracle", 0.8, 1).is_none());
/// ```
pub fn create_player(kind: &str, accuracy: f64, seed: u64) -> Option<Box<dyn AutoPlayer>> {
    match kind {
        "baseline" => Some(Box::new(baseline::BaselinePlayer::new(accuracy, seed))),
        _ => None,
    }
}
