//! Game configuration
//!
//! All tunable numbers live here, persisted as JSON alongside the binary.
//! A config is checked once, before the game aggregate is built; every
//! violated constraint is reported in the same error so a broken setup
//! surfaces all of its problems at once instead of one per launch.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated configuration constraint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigViolation {
    #[error("spawn interval must be greater than 0 (got {0})")]
    NonPositiveSpawnInterval(f32),
    #[error("min_x must be less than or equal to max_x (got {min_x} > {max_x})")]
    InvertedBand { min_x: f32, max_x: f32 },
    #[error("spawn_y must be above destroy_y (got spawn_y {spawn_y}, destroy_y {destroy_y})")]
    SpawnBelowDestroyLine { spawn_y: f32, destroy_y: f32 },
    #[error("move speed must be greater than 0 (got {0})")]
    NonPositiveMoveSpeed(f32),
    #[error("fall speed must be greater than 0 (got {0})")]
    NonPositiveFallSpeed(f32),
    #[error("obstacle radius must be greater than 0 (got {0})")]
    NonPositiveObstacleRadius(f32),
    #[error("player radius must be greater than 0 (got {0})")]
    NonPositivePlayerRadius(f32),
    #[error("score display handle does not resolve")]
    MissingScoreDisplay,
    #[error("game-over display handle does not resolve")]
    MissingGameOverDisplay,
    #[error("player body handle does not resolve")]
    MissingPlayerBody,
}

/// Everything a configuration got wrong, in one report
#[derive(Debug, Clone, PartialEq, Error)]
#[error("configuration rejected: {}", describe(.violations))]
pub struct ConfigError {
    pub violations: Vec<ConfigViolation>,
}

impl ConfigError {
    pub fn new(violations: Vec<ConfigViolation>) -> Self {
        Self { violations }
    }

    /// Combine per-component reports into one error.
    pub fn merge(a: Option<Self>, b: Option<Self>) -> Self {
        let mut violations = Vec::new();
        if let Some(err) = a {
            violations.extend(err.violations);
        }
        if let Some(err) = b {
            violations.extend(err.violations);
        }
        Self { violations }
    }
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Tuning values for a run. Immutable once a game has been built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Left edge of the band shared by spawn columns and the paddle
    pub min_x: f32,
    /// Right edge of the band
    pub max_x: f32,
    /// Height at which falling bodies appear
    pub spawn_y: f32,
    /// Height below which falling bodies are destroyed
    pub destroy_y: f32,
    /// Paddle speed in units per second
    pub move_speed: f32,
    /// Descent rate of falling bodies in units per second
    pub fall_speed: f32,
    /// Contact radius of falling bodies
    pub obstacle_radius: f32,
    /// Contact radius of the paddle
    pub player_radius: f32,
    /// Fixed paddle height; movement never changes it
    pub player_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1.0,
            min_x: -7.0,
            max_x: 7.0,
            spawn_y: 6.0,
            destroy_y: -6.0,
            move_speed: 5.0,
            fall_speed: 6.0,
            obstacle_radius: 0.5,
            player_radius: 0.5,
            player_y: -4.5,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file, falling back to defaults if it is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save as pretty-printed JSON. Failures are logged, not fatal.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("Could not save config to {}: {err}", path.display());
                } else {
                    log::info!("Config saved to {}", path.display());
                }
            }
            Err(err) => log::warn!("Could not serialize config: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band_is_symmetric() {
        let config = GameConfig::default();
        assert!(config.min_x <= config.max_x);
        assert!(config.spawn_y > config.destroy_y);
        assert!(config.spawn_interval > 0.0);
    }

    #[test]
    fn test_error_lists_every_violation() {
        let err = ConfigError::new(vec![
            ConfigViolation::NonPositiveSpawnInterval(0.0),
            ConfigViolation::InvertedBand {
                min_x: 3.0,
                max_x: -3.0,
            },
        ]);
        let message = err.to_string();
        assert!(message.contains("spawn interval"));
        assert!(message.contains("min_x"));
    }

    #[test]
    fn test_merge_keeps_reports_from_both_sides() {
        let a = ConfigError::new(vec![ConfigViolation::NonPositiveMoveSpeed(-1.0)]);
        let b = ConfigError::new(vec![ConfigViolation::MissingScoreDisplay]);
        let merged = ConfigError::merge(Some(a), Some(b));
        assert_eq!(merged.violations.len(), 2);

        let only_b = ConfigError::merge(None, Some(ConfigError::new(vec![
            ConfigViolation::MissingPlayerBody,
        ])));
        assert_eq!(only_b.violations.len(), 1);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let path = Path::new("/definitely/not/a/real/config.json");
        assert_eq!(GameConfig::load_or_default(path), GameConfig::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut config = GameConfig::default();
        config.move_speed = 8.5;
        config.spawn_interval = 0.25;

        let path = std::env::temp_dir().join("drop_dodge_config_test.json");
        config.save(&path);
        let loaded = GameConfig::load_or_default(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
