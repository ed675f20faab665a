//! Engine configuration.
//!
//! Callers build an `EngineConfig` once (usually `EngineConfig::default()`
//! or loaded from JSON) and hand the relevant part to each battle. The
//! defaults are the game's shipped balance values.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Rules that govern a single battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Seed for the battle RNG (policy rolls, shuffles).
    pub seed: u64,

    /// Health the player is left with after losing a battle.
    pub defeat_health_floor: i32,

    /// Tag that chains into a combo when played twice in a row.
    pub combo_tag: String,

    /// Extra damage granted by a combo. Never stacks past one bonus.
    pub combo_bonus: i32,

    /// Cards drawn when the player starts a turn with an empty hand.
    pub opening_hand: usize,

    /// Cards drawn after each card the player resolves.
    pub draw_after_play: usize,

    /// Forget the player's last played tag at the start of every turn.
    pub reset_combo_each_turn: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            defeat_health_floor: 5,
            combo_tag: "strike".to_string(),
            combo_bonus: 2,
            opening_hand: 3,
            draw_after_play: 1,
            reset_combo_each_turn: true,
        }
    }
}

impl BattleConfig {
    /// Use a custom RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use a custom defeat health floor.
    pub fn with_defeat_health_floor(mut self, health: i32) -> Self {
        self.defeat_health_floor = health;
        self
    }

    /// Use a custom opening hand size.
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Keep the combo tag across turns instead of clearing it.
    pub fn with_combo_across_turns(mut self, keep: bool) -> Self {
        self.reset_combo_each_turn = !keep;
        self
    }
}

/// Experience and level-up tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// XP required to leave level 1, 2, 3, ...
    pub xp_thresholds: Vec<u32>,

    /// XP required for levels past the end of `xp_thresholds`.
    pub default_xp_threshold: u32,

    /// Max health gained per level.
    pub health_per_level: i32,

    /// Base attack gained per level.
    pub attack_per_level: i32,

    /// Base defense gained per level.
    pub defense_per_level: i32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_thresholds: vec![110, 180, 250],
            default_xp_threshold: 300,
            health_per_level: 10,
            attack_per_level: 2,
            defense_per_level: 2,
        }
    }
}

impl ProgressionConfig {
    /// XP needed to advance from `level` to the next one.
    #[must_use]
    pub fn threshold_for(&self, level: u32) -> u32 {
        let index = level.saturating_sub(1) as usize;
        self.xp_thresholds
            .get(index)
            .copied()
            .unwrap_or(self.default_xp_threshold)
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub battle: BattleConfig,
    pub progression: ProgressionConfig,
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn from_file(path: &std::path::Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.progression.default_xp_threshold == 0
            || self.progression.xp_thresholds.contains(&0)
        {
            return Err(EngineError::InvalidConfig(
                "xp thresholds must be positive".to_string(),
            ));
        }
        if self.battle.defeat_health_floor < 1 {
            return Err(EngineError::InvalidConfig(
                "defeat health floor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.battle.defeat_health_floor, 5);
        assert_eq!(config.battle.combo_bonus, 2);
        assert_eq!(config.battle.combo_tag, "strike");
        assert_eq!(config.battle.opening_hand, 3);
        assert!(config.battle.reset_combo_each_turn);
        assert_eq!(config.progression.xp_thresholds, vec![110, 180, 250]);
    }

    #[test]
    fn test_builder_pattern() {
        let config = BattleConfig::default()
            .with_seed(123)
            .with_defeat_health_floor(10)
            .with_opening_hand(4)
            .with_combo_across_turns(true);

        assert_eq!(config.seed, 123);
        assert_eq!(config.defeat_health_floor, 10);
        assert_eq!(config.opening_hand, 4);
        assert!(!config.reset_combo_each_turn);
    }

    #[test]
    fn test_threshold_for_level() {
        let progression = ProgressionConfig::default();
        assert_eq!(progression.threshold_for(1), 110);
        assert_eq!(progression.threshold_for(3), 250);
        assert_eq!(progression.threshold_for(4), 300);
        assert_eq!(progression.threshold_for(20), 300);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "battle": { "seed": 9 } }"#).unwrap();
        assert_eq!(config.battle.seed, 9);
        assert_eq!(config.battle.defeat_health_floor, 5);
        assert_eq!(config.progression, ProgressionConfig::default());
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = EngineConfig::from_json(r#"{ "progression": { "xp_thresholds": [0] } }"#)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
