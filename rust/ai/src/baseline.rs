//! Baseline automated player.
//!
//! Plays like a student who knows most of the material: the first pick is the
//! first hidden tile on the board, the second pick is the right partner with
//! probability `accuracy` and a random wrong tile otherwise.

use crate::AutoPlayer;
use organpair_engine::session::GameSession;
use organpair_engine::tile::TileId;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seeded player with a fixed hit rate.
///
/// # Example
///
/// ```rust
/// use organpair_ai::baseline::BaselinePlayer;
/// use organpair_ai::AutoPlayer;
/// use organpair_engine::session::GameSession;
///
/// let mut player = BaselinePlayer::new(1.0, 3);
/// let mut session = GameSession::with_defaults(Some(3));
/// assert!(player.next_pick(&session).is_none());
///
/// session.start();
/// let first = player.next_pick(&session).unwrap();
/// session.select(first);
/// let second = player.next_pick(&session).unwrap();
/// let step = session.select(second);
/// assert_eq!(step.state.combo, 1);
/// ```
#[derive(Debug, Clone)]
pub struct BaselinePlayer {
    accuracy: f64,
    rng: ChaCha20Rng,
}

impl BaselinePlayer {
    pub fn new(accuracy: f64, seed: u64) -> Self {
        let accuracy = if accuracy.is_nan() {
            0.0
        } else {
            accuracy.clamp(0.0, 1.0)
        };
        Self {
            accuracy,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    fn second_pick(&mut self, session: &GameSession, pending: TileId) -> Option<TileId> {
        let deck = session.deck()?;
        let partner = deck.counterpart(pending).filter(|t| t.is_hidden()).map(|t| t.id);
        if self.rng.random_bool(self.accuracy) {
            if let Some(id) = partner {
                return Some(id);
            }
        }
        let wrong: Vec<TileId> = deck
            .hidden()
            .map(|t| t.id)
            .filter(|id| *id != pending && Some(*id) != partner)
            .collect();
        wrong.choose(&mut self.rng).copied().or(partner)
    }
}

impl AutoPlayer for BaselinePlayer {
    fn next_pick(&mut self, session: &GameSession) -> Option<TileId> {
        if !session.phase().accepts_picks() {
            return None;
        }
        match session.pending_pick() {
            None => session.deck()?.hidden().next().map(|t| t.id),
            Some(pending) => self.second_pick(session, pending),
        }
    }

    fn name(&self) -> &str {
        "BaselinePlayer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use organpair_engine::state::Phase;

    fn play_pairs(player: &mut BaselinePlayer, session: &mut GameSession, pairs: usize) {
        for _ in 0..pairs * 2 {
            let id = player.next_pick(session).expect("pick available");
            session.select(id);
        }
    }

    #[test]
    fn perfect_player_never_misses() {
        let mut session = GameSession::with_defaults(Some(10));
        session.start();
        let mut player = BaselinePlayer::new(1.0, 10);
        play_pairs(&mut player, &mut session, 10);
        let state = session.state();
        assert_eq!(state.total_matches_made, 10);
        assert_eq!(state.combo, 10);
    }

    #[test]
    fn hopeless_player_always_misses() {
        let mut session = GameSession::with_defaults(Some(11));
        session.start();
        let mut player = BaselinePlayer::new(0.0, 11);
        play_pairs(&mut player, &mut session, 4);
        let state = session.state();
        assert_eq!(state.total_matches_made, 0);
        assert_eq!(state.score, -100);
    }

    #[test]
    fn accuracy_is_clamped() {
        assert_eq!(BaselinePlayer::new(3.0, 0).accuracy(), 1.0);
        assert_eq!(BaselinePlayer::new(-1.0, 0).accuracy(), 0.0);
        assert_eq!(BaselinePlayer::new(f64::NAN, 0).accuracy(), 0.0);
    }

    #[test]
    fn no_pick_after_session_end() {
        let mut session = GameSession::with_defaults(Some(12));
        session.start();
        while session.phase() != Phase::Ended {
            session.tick();
        }
        let mut player = BaselinePlayer::new(0.5, 12);
        assert!(player.next_pick(&session).is_none());
    }

    #[test]
    fn same_seed_plays_same_game() {
        let run = |seed: u64| {
            let mut session = GameSession::with_defaults(Some(seed));
            session.start();
            let mut player = BaselinePlayer::new(0.6, seed);
            play_pairs(&mut player, &mut session, 12);
            session.state()
        };
        assert_eq!(run(5), run(5));
    }
}
