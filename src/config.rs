//! Match configuration
//!
//! Screen dimensions and match rules are injected rather than hard-coded.
//! A config is validated before a `Game` is built from it; anything a level
//! layout cannot fit into is rejected up front.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Level index outside the authored levels
    #[error("level {0} is outside 1..={max}", max = MAX_LEVEL)]
    InvalidLevel(u32),

    /// Playfield cannot hold every level layout
    #[error(
        "screen {width}x{height} is smaller than the minimum {min_w}x{min_h}",
        min_w = MIN_SCREEN_WIDTH,
        min_h = MIN_SCREEN_HEIGHT
    )]
    ScreenTooSmall { width: f32, height: f32 },

    /// A match needs at least one life
    #[error("initial lives must be at least 1")]
    NoLives,

    /// Paddle speed multiplier must be positive and finite
    #[error("invalid paddle speed multiplier: {0}")]
    InvalidSpeed(f32),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub screen_width: f32,
    /// Playfield height in pixels
    pub screen_height: f32,

    // === Rules ===
    pub initial_lives: u32,
    pub points_per_brick: u32,
    /// Level the match starts on (1-based)
    pub start_level: u32,

    /// RNG seed for launch angles and bounce jitter
    pub seed: u64,
    /// Scales `PADDLE_SPEED`
    pub paddle_speed_multiplier: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 800.0,

            initial_lives: GAME_INITIAL_LIVES,
            points_per_brick: GAME_POINTS_PER_BRICK,
            start_level: 1,

            seed: 12345,
            paddle_speed_multiplier: 1.0,
        }
    }
}

impl GameConfig {
    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LEVEL).contains(&self.start_level) {
            return Err(ConfigError::InvalidLevel(self.start_level));
        }
        // NaN dimensions fail both comparisons and are rejected too
        let fits = self.screen_width >= MIN_SCREEN_WIDTH && self.screen_height >= MIN_SCREEN_HEIGHT;
        if !fits || !self.screen_width.is_finite() || !self.screen_height.is_finite() {
            return Err(ConfigError::ScreenTooSmall {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if !(self.paddle_speed_multiplier.is_finite() && self.paddle_speed_multiplier > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.paddle_speed_multiplier));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_level() {
        for level in [0, MAX_LEVEL + 1] {
            let config = GameConfig {
                start_level: level,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidLevel(l)) if l == level));
        }
    }

    #[test]
    fn test_rejects_small_screen() {
        let config = GameConfig {
            screen_width: 640.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScreenTooSmall { .. })
        ));

        let config = GameConfig {
            screen_height: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_no_lives_and_bad_speed() {
        let config = GameConfig {
            initial_lives: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoLives)));

        let config = GameConfig {
            paddle_speed_multiplier: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSpeed(_))));
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{ "initial_lives": 5, "start_level": 3 }"#)
            .expect("valid config");
        assert_eq!(config.initial_lives, 5);
        assert_eq!(config.start_level, 3);
        assert_eq!(config.screen_width, GameConfig::default().screen_width);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "start_level": 9 }"#),
            Err(ConfigError::InvalidLevel(9))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            seed: 42,
            ..Default::default()
        };
        let json = config.to_json().expect("serializable");
        assert_eq!(GameConfig::from_json(&json).expect("valid"), config);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            GameConfig::load("/nonexistent/object-fight.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
