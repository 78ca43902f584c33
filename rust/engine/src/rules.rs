use serde::{Deserialize, Serialize};

use crate::settings::GameSettings;
use crate::tile::Tile;

/// Two tiles form a pair when they share a pair key and show opposite faces.
/// Equal faces never match, even when the key coincides.
pub fn is_match(a: &Tile, b: &Tile) -> bool {
    a.pair_key == b.pair_key && a.face != b.face
}

/// Bonus for speed: `time_bonus_unit` per full 10 seconds left.
pub fn time_bonus(time_remaining_secs: u32, settings: &GameSettings) -> u32 {
    (time_remaining_secs / 10).saturating_mul(settings.time_bonus_unit)
}

pub fn combo_multiplier(combo: u32, settings: &GameSettings) -> u32 {
    combo.min(settings.max_combo_multiplier)
}

/// How the points for a correct pair were made up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub time_bonus: u32,
    pub multiplier: u32,
    pub total: i64,
}

/// Points for a correct pair, given the combo *after* counting this match.
///
/// # Examples
///
/// ```
/// use organpair_engine::rules::match_points;
/// use organpair_engine::settings::GameSettings;
///
/// let settings = GameSettings::default();
/// // 75s left -> 7 * 5 = 35 bonus, first match of a chain
/// let points = match_points(75, 1, &settings);
/// assert_eq!(points.total, 85);
///
/// // multiplier is capped at 5
/// let points = match_points(0, 9, &settings);
/// assert_eq!(points.multiplier, 5);
/// assert_eq!(points.total, 250);
/// ```
pub fn match_points(time_remaining_secs: u32, combo: u32, settings: &GameSettings) -> ScoreBreakdown {
    let base = settings.base_points_per_match;
    let bonus = time_bonus(time_remaining_secs, settings);
    let multiplier = combo_multiplier(combo, settings);
    let total = (i64::from(base) + i64::from(bonus)) * i64::from(multiplier);
    ScoreBreakdown {
        base,
        time_bonus: bonus,
        multiplier,
        total,
    }
}

/// Score change for a wrong pair. Always negative or zero.
pub fn mismatch_penalty(settings: &GameSettings) -> i64 {
    -i64::from(settings.penalty_wrong_match)
}

/// Score popup data handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub delta: i64,
    pub is_positive: bool,
}

impl Feedback {
    pub fn gain(delta: i64) -> Self {
        Self {
            delta,
            is_positive: true,
        }
    }

    pub fn loss(delta: i64) -> Self {
        Self {
            delta,
            is_positive: false,
        }
    }
}
