use serde::{Deserialize, Serialize};

use crate::rules::{Feedback, ScoreBreakdown};
use crate::tile::{PairKey, TileId};

/// Where the session is in its selection cycle.
///
/// `Evaluating` and `LevelTransition` only exist while a single call is being
/// processed; snapshots returned to the caller never carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    AwaitingFirstPick,
    AwaitingSecondPick,
    Evaluating,
    LevelTransition,
    Ended,
}

impl Phase {
    pub fn accepts_picks(self) -> bool {
        matches!(self, Phase::AwaitingFirstPick | Phase::AwaitingSecondPick)
    }
}

/// Read-only view of a session, produced after every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// May be negative; there is no floor
    pub score: i64,
    pub combo: u32,
    pub max_combo: u32,
    pub level: u32,
    pub time_remaining_secs: u32,
    pub total_matches_made: u32,
    /// Pairs matched in the current deck
    pub matched_pairs: u32,
    /// Pairs in the current deck
    pub pairs_in_level: u32,
    pub phase: Phase,
}

/// What a finished session hands to score persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub score: i64,
    pub level: u32,
    pub total_matches_made: u32,
    pub max_combo_reached: u32,
}

/// Discrete things that happened during one call, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started {
        level: u32,
        pairs: u32,
    },
    TileSelected(TileId),
    Matched {
        pair: PairKey,
        points: ScoreBreakdown,
        feedback: Feedback,
    },
    Mismatched {
        first: TileId,
        second: TileId,
        feedback: Feedback,
    },
    LevelCompleted {
        /// The level now being played
        level: u32,
        bonus_secs: u32,
        pairs: u32,
    },
    Ended(FinalSummary),
}

/// Outcome of `start`, `select` or `tick`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: SessionState,
    pub events: Vec<SessionEvent>,
}

impl Step {
    /// True when the call produced no discrete event: an ignored input or a
    /// plain clock tick.
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty()
    }

    /// Score popups produced by this call.
    pub fn feedback(&self) -> impl Iterator<Item = &Feedback> {
        self.events.iter().filter_map(|e| match e {
            SessionEvent::Matched { feedback, .. } | SessionEvent::Mismatched { feedback, .. } => {
                Some(feedback)
            }
            _ => None,
        })
    }

    pub fn ended(&self) -> Option<&FinalSummary> {
        self.events.iter().find_map(|e| match e {
            SessionEvent::Ended(summary) => Some(summary),
            _ => None,
        })
    }
}
