use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;

/// Pixel size of one grid cell
pub const BLOCK_SIZE: i32 = 20;

/// Advisory tick rate (ticks per second) for rendered play
pub const SPEED: u32 = 500;

/// Configuration for the game. Fixed once a game is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in pixels
    pub width: i32,
    /// Height of the playing field in pixels
    pub height: i32,
    /// Size of one grid cell in pixels
    pub block_size: i32,
    /// Maximum ticks per second when rendered. Does not affect the simulation.
    pub speed: u32,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: i32,
    /// Reward for dying, including the frame-limit timeout
    pub death_penalty: i32,
    /// An episode times out once frame_iteration > factor * snake length
    pub frame_limit_factor: u32,

    /// Seed for food placement. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            block_size: BLOCK_SIZE,
            speed: SPEED,
            food_reward: 10,
            death_penalty: -10,
            frame_limit_factor: 100,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field size in pixels
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small field for testing (10x10 cells)
    pub fn small() -> Self {
        Self::new(10 * BLOCK_SIZE, 10 * BLOCK_SIZE)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cells along the x axis
    pub fn grid_width(&self) -> i32 {
        self.width / self.block_size
    }

    /// Number of cells along the y axis
    pub fn grid_height(&self) -> i32 {
        self.height / self.block_size
    }

    /// Check that the field can host the 3-segment starting snake.
    /// The head starts at the centre column, so at least 4 columns are needed.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.block_size <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "block_size must be positive, got {}",
                self.block_size
            )));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "field must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width % self.block_size != 0 || self.height % self.block_size != 0 {
            return Err(GameError::InvalidConfig(format!(
                "field {}x{} is not a multiple of block_size {}",
                self.width, self.height, self.block_size
            )));
        }
        if self.grid_width() < 4 {
            return Err(GameError::InvalidConfig(format!(
                "field must be at least 4 cells wide, got {}",
                self.grid_width()
            )));
        }
        if self.speed == 0 {
            return Err(GameError::InvalidConfig("speed must be positive".into()));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.block_size, 20);
        assert_eq!(config.speed, 500);
        assert_eq!(config.grid_width(), 32);
        assert_eq!(config.grid_height(), 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(200, 100);
        assert_eq!(config.grid_width(), 10);
        assert_eq!(config.grid_height(), 5);
        assert_eq!(config.block_size, BLOCK_SIZE);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        assert!(GameConfig::new(0, 480).validate().is_err());
        assert!(GameConfig::new(650, 480).validate().is_err());
        assert!(GameConfig::new(60, 480).validate().is_err());
        let mut config = GameConfig::default();
        config.block_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_single_row() {
        assert!(GameConfig::new(80, 20).validate().is_ok());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 400, "height": 200, "seed": 7 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 200);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.block_size, 20);
        assert_eq!(config.death_penalty, -10);
    }

    #[test]
    fn test_load_invalid_json_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 410 }}"#).unwrap();
        assert!(GameConfig::from_json_file(file.path()).is_err());

        let mut garbage = tempfile::NamedTempFile::new().unwrap();
        write!(garbage, "not json").unwrap();
        assert!(GameConfig::from_json_file(garbage.path()).is_err());
    }
}
