use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Tunable rules for a game session.
/// Every field has a default, so a partial TOML/JSON document deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Seconds on the clock when the session starts
    pub initial_time_secs: u32,
    /// Points for a correct pair before time bonus and combo multiplier
    pub base_points_per_match: u32,
    /// Points added per full 10 seconds left on the clock
    pub time_bonus_unit: u32,
    /// Upper bound of the combo multiplier
    pub max_combo_multiplier: u32,
    /// Points removed for a wrong pair
    pub penalty_wrong_match: u32,
    /// Seconds added to the clock when a level is cleared
    pub level_complete_bonus_secs: u32,
    /// Upper bound on repeated catalog items added at higher levels
    pub max_extra_pairs: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            initial_time_secs: 75,
            base_points_per_match: 50,
            time_bonus_unit: 5,
            max_combo_multiplier: 5,
            penalty_wrong_match: 25,
            level_complete_bonus_secs: 30,
            max_extra_pairs: 2,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.initial_time_secs == 0 {
            return Err(GameError::InvalidSettings {
                field: "initial_time_secs",
                reason: "must be >0".into(),
            });
        }
        if self.max_combo_multiplier == 0 {
            return Err(GameError::InvalidSettings {
                field: "max_combo_multiplier",
                reason: "must be >=1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_rules() {
        let s = GameSettings::default();
        assert_eq!(s.initial_time_secs, 75);
        assert_eq!(s.base_points_per_match, 50);
        assert_eq!(s.time_bonus_unit, 5);
        assert_eq!(s.max_combo_multiplier, 5);
        assert_eq!(s.penalty_wrong_match, 25);
        assert_eq!(s.level_complete_bonus_secs, 30);
        assert_eq!(s.max_extra_pairs, 2);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let s: GameSettings = serde_json::from_str(r#"{"initial_time_secs": 120}"#).unwrap();
        assert_eq!(s.initial_time_secs, 120);
        assert_eq!(s.penalty_wrong_match, 25);
    }

    #[test]
    fn zero_clock_is_rejected() {
        let s = GameSettings {
            initial_time_secs: 0,
            ..GameSettings::default()
        };
        assert!(matches!(
            s.validate(),
            Err(GameError::InvalidSettings {
                field: "initial_time_secs",
                ..
            })
        ));
    }

    #[test]
    fn zero_multiplier_cap_is_rejected() {
        let s = GameSettings {
            max_combo_multiplier: 0,
            ..GameSettings::default()
        };
        assert!(s.validate().is_err());
    }
}
