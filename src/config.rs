//! Static controller configuration, optionally loaded from JSON.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/controllers.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Speeds in pixels per second, lengths in pixels, positions in screen space.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub player_speed: f32,
    pub slime_speed: f32,
    /// Strip at the bottom of the viewport the player may not enter.
    pub screen_padding: f32,
    pub detection_radius: f32,
    pub player_hitbox_radius: f32,
    pub slime_hitbox_radius: f32,
    pub player_spawn: [f32; 2],
    pub slime_spawns: Vec<[f32; 2]>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            player_speed: 150.0,
            slime_speed: 35.0,
            screen_padding: 20.0,
            detection_radius: 96.0,
            player_hitbox_radius: 8.0,
            slime_hitbox_radius: 8.0,
            player_spawn: [400.0, 300.0],
            slime_spawns: vec![[120.0, 140.0], [660.0, 460.0]],
        }
    }
}

impl ControllerConfig {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("slime_speed", self.slime_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("screen_padding", self.screen_padding),
            ("detection_radius", self.detection_radius),
            ("player_hitbox_radius", self.player_hitbox_radius),
            ("slime_hitbox_radius", self.slime_hitbox_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn player_spawn(&self) -> Vec2 {
        Vec2::from(self.player_spawn)
    }

    pub fn slime_spawns(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.slime_spawns.iter().copied().map(Vec2::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_tuning() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.player_speed, 150.0);
        assert_eq!(cfg.slime_speed, 35.0);
        assert_eq!(cfg.screen_padding, 20.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = ControllerConfig::from_json(Path::new("inline"), r#"{"slime_speed": 50.0}"#)
            .unwrap();
        assert_eq!(cfg.slime_speed, 50.0);
        assert_eq!(cfg.player_speed, 150.0);
    }

    #[test]
    fn rejects_non_positive_speed() {
        let err = ControllerConfig::from_json(Path::new("inline"), r#"{"player_speed": 0}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_radius() {
        let err =
            ControllerConfig::from_json(Path::new("inline"), r#"{"detection_radius": -1.0}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = ControllerConfig::from_json(Path::new("bad.json"), "{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn spawn_points_convert_to_vectors() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.player_spawn(), Vec2::new(400.0, 300.0));
        assert_eq!(cfg.slime_spawns().count(), 2);
    }
}
