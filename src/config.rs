//! Game configuration
//!
//! Everything the simulation needs is passed in through [`GameConfig`]; there
//! are no process-wide screen or speed globals. A config is validated before a
//! session is built from it, so the simulation never sees degenerate geometry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("screen dimensions must be positive, got {width}x{height}")]
    ScreenSize { width: i32, height: i32 },

    #[error("{entity} dimensions must be positive, got {width}x{height}")]
    EntitySize {
        entity: &'static str,
        width: i32,
        height: i32,
    },

    #[error("{entity} ({width}x{height}) does not fit on a {screen_width}x{screen_height} screen")]
    EntityTooLarge {
        entity: &'static str,
        width: i32,
        height: i32,
        screen_width: i32,
        screen_height: i32,
    },

    #[error("{entity} speed must be positive, got {speed}")]
    Speed { entity: &'static str, speed: i32 },

    #[error("{field} {value} exceeds the maximum of {max}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        max: i32,
    },

    #[error("obstacle gap must not be negative, got {0}")]
    NegativeGap(i32),

    #[error("player margin {margin} pushes a {player_height}px player off a {screen_height}px screen")]
    PlayerMargin {
        margin: i32,
        player_height: i32,
        screen_height: i32,
    },

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Screen geometry, speeds and RNG seed for one play-through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub player_width: i32,
    pub player_height: i32,
    /// Distance between the player's bottom edge and the screen bottom
    pub player_margin: i32,
    /// Pixels per tick
    pub player_speed: i32,
    pub obstacle_width: i32,
    pub obstacle_height: i32,
    /// Pixels per tick, downward
    pub obstacle_speed: i32,
    pub obstacle_gap: i32,
    /// Fixed seed for reproducible runs; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_margin: PLAYER_MARGIN,
            player_speed: PLAYER_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_gap: OBSTACLE_GAP,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every geometric and speed constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::ScreenSize {
                width: self.width,
                height: self.height,
            });
        }
        Self::check_max("width", self.width)?;
        Self::check_max("height", self.height)?;

        self.check_entity("player", self.player_width, self.player_height)?;
        self.check_entity("obstacle", self.obstacle_width, self.obstacle_height)?;

        if self.player_speed <= 0 {
            return Err(ConfigError::Speed {
                entity: "player",
                speed: self.player_speed,
            });
        }
        if self.obstacle_speed <= 0 {
            return Err(ConfigError::Speed {
                entity: "obstacle",
                speed: self.obstacle_speed,
            });
        }
        Self::check_max("player_speed", self.player_speed)?;
        Self::check_max("obstacle_speed", self.obstacle_speed)?;

        if self.obstacle_gap < 0 {
            return Err(ConfigError::NegativeGap(self.obstacle_gap));
        }
        Self::check_max("obstacle_gap", self.obstacle_gap)?;

        // Heights are positive and bounded here, so the subtraction cannot overflow
        if self.player_margin < 0 || self.player_margin > self.height - self.player_height {
            return Err(ConfigError::PlayerMargin {
                margin: self.player_margin,
                player_height: self.player_height,
                screen_height: self.height,
            });
        }

        Ok(())
    }

    fn check_entity(&self, entity: &'static str, width: i32, height: i32) -> Result<(), ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EntitySize {
                entity,
                width,
                height,
            });
        }
        if width > self.width || height > self.height {
            return Err(ConfigError::EntityTooLarge {
                entity,
                width,
                height,
                screen_width: self.width,
                screen_height: self.height,
            });
        }
        Ok(())
    }

    fn check_max(field: &'static str, value: i32) -> Result<(), ConfigError> {
        if value > MAX_DIMENSION {
            return Err(ConfigError::OutOfRange {
                field,
                value,
                max: MAX_DIMENSION,
            });
        }
        Ok(())
    }

    /// Player start: horizontally centered, resting `player_margin` above the bottom
    pub fn player_origin(&self) -> (i32, i32) {
        (
            self.width / 2 - self.player_width / 2,
            self.height - self.player_height - self.player_margin,
        )
    }
}
