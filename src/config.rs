//! Data-driven game tunables
//!
//! Defaults reproduce the shipped game; any subset can be overridden from JSON.

use serde::{Deserialize, Serialize};

use crate::levels::{LevelData, LevelDataError};

/// Points awarded per brick event (before the combo multiplier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickPoints {
    /// Normal brick destroyed
    pub normal: u64,
    /// Power-up brick destroyed
    pub power: u64,
    /// Power-up brick cracked (first hit)
    pub crack: u64,
}

impl Default for BrickPoints {
    fn default() -> Self {
        Self {
            normal: 10,
            power: 25,
            crack: 5,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Combo resets if no points are scored within this window
    pub combo_window_ms: u32,
    /// Duration of timed power-ups (big paddle, fireball)
    pub powerup_duration_ms: u32,
    pub brick_points: BrickPoints,
    /// Horizontal margin left between the brick formation and the walls
    pub side_margin: f32,
    /// Gap between bricks (both axes)
    pub brick_padding: f32,
    /// Height of the HUD strip above the play field
    pub hud_height: f32,
    /// Ball speed for configured levels
    pub default_ball_speed: u32,
    /// Configured (hand-made) levels
    pub levels: Vec<LevelData>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            combo_window_ms: 2000,
            powerup_duration_ms: 10_000,
            brick_points: BrickPoints::default(),
            side_margin: 100.0,
            brick_padding: 5.0,
            hud_height: 52.0,
            default_ball_speed: crate::consts::BALL_BASE_SPEED,
            levels: LevelData::builtin(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, LevelDataError> {
        let config: Self = serde_json::from_str(json)?;
        for (index, level) in config.levels.iter().enumerate() {
            if let Err(err) = level.validate() {
                log::warn!("Configured level {} is invalid: {}", index, err);
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.combo_window_ms, 2000);
        assert_eq!(config.powerup_duration_ms, 10_000);
        assert_eq!(config.brick_points.crack, 5);
        assert_eq!(config.levels.len(), 2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{"combo_window_ms": 1500, "brick_points": {"normal": 20}}"#)
                .unwrap();
        assert_eq!(config.combo_window_ms, 1500);
        assert_eq!(config.brick_points.normal, 20);
        assert_eq!(config.brick_points.power, 25);
        assert_eq!(config.side_margin, 100.0);
        assert_eq!(config.levels, LevelData::builtin());
    }

    #[test]
    fn test_custom_levels() {
        let config = GameConfig::from_json(r#"{"levels": [[[1, 0, 1]], [[2, 2]]]}"#).unwrap();
        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.levels[1].rows(), 1);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(LevelDataError::Parse(_))
        ));
    }
}
