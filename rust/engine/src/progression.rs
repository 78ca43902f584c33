use crate::deck::Deck;

/// Tracks the current level and decides when it is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgressor {
    level: u32,
    completion_bonus_secs: u32,
}

/// Parameters of the level that follows a cleared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextLevel {
    pub level: u32,
    pub bonus_secs: u32,
}

impl LevelProgressor {
    pub fn new(completion_bonus_secs: u32) -> Self {
        Self {
            level: 1,
            completion_bonus_secs,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_complete(&self, deck: &Deck) -> bool {
        !deck.is_empty() && deck.is_cleared()
    }

    /// Move to the next level. There is no upper bound.
    pub fn advance(&mut self) -> NextLevel {
        self.level = self.level.saturating_add(1);
        NextLevel {
            level: self.level,
            bonus_secs: self.completion_bonus_secs,
        }
    }

    pub fn reset(&mut self) {
        self.level = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::deck::CardSetGenerator;
    use crate::tile::TileState;

    #[test]
    fn advance_is_unbounded_and_reports_bonus() {
        let mut p = LevelProgressor::new(30);
        for expected in 2..=50 {
            let next = p.advance();
            assert_eq!(next.level, expected);
            assert_eq!(next.bonus_secs, 30);
        }
        p.reset();
        assert_eq!(p.level(), 1);
    }

    #[test]
    fn complete_only_when_every_pair_matched() {
        let catalog = Catalog::default();
        let mut deck = CardSetGenerator::new_with_seed(5).generate(&catalog, 1);
        let p = LevelProgressor::new(30);
        let ids: Vec<_> = deck.tiles().iter().map(|t| t.id).collect();
        let (last, rest) = ids.split_last().unwrap();
        for id in rest {
            deck.set_state(*id, TileState::Matched);
        }
        assert!(!p.is_complete(&deck));
        deck.set_state(*last, TileState::Matched);
        assert!(p.is_complete(&deck));
    }
}
