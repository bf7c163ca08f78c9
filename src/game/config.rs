use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::direction::Direction;
use super::food::DEFAULT_SPAWN_ATTEMPTS;
use super::grid::Cell;

/// Shortest raw tick interval the driver will schedule
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of the snake at the start of a round
    pub initial_snake_length: usize,
    /// Cell of the head at the start of a round
    pub start_cell: Cell,
    /// Heading at the start of a round
    pub start_direction: Direction,
    /// Random draws before food placement scans for free cells
    pub spawn_attempts: u32,
    /// Raw ticks per second driving the game loop
    pub frame_rate: u32,
    /// Where the local highscore list is kept
    pub leaderboard_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_snake_length: 5,
            start_cell: Cell::new(19, 15),
            start_direction: Direction::Right,
            spawn_attempts: DEFAULT_SPAWN_ATTEMPTS,
            frame_rate: 60,
            leaderboard_path: PathBuf::from("highscore.json"),
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Interval between raw ticks, never shorter than [`MIN_TICK_INTERVAL`]
    pub fn tick_interval(&self) -> Duration {
        let micros = 1_000_000 / u64::from(self.frame_rate.max(1));
        Duration::from_micros(micros).max(MIN_TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.initial_snake_length, 5);
        assert_eq!(config.start_cell, Cell::new(19, 15));
        assert_eq!(config.start_direction, Direction::Right);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.tick_interval(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "frame_rate": 30, "initial_snake_length": 3 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.start_cell, Cell::new(19, 15));
        assert_eq!(config.leaderboard_path, PathBuf::from("highscore.json"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::from_json_file(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_zero_frame_rate_does_not_divide_by_zero() {
        let config = GameConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_fast_frame_rate_keeps_a_nonzero_interval() {
        let config = GameConfig {
            frame_rate: 2000,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), MIN_TICK_INTERVAL);

        let config = GameConfig {
            frame_rate: 700,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_micros(1_428));
    }

    #[tokio::test]
    async fn test_fast_frame_rate_builds_a_timer() {
        let config = GameConfig {
            frame_rate: u32::MAX,
            ..Default::default()
        };
        let mut timer = tokio::time::interval(config.tick_interval());
        timer.tick().await;
    }
}
