//! Game settings, optionally read from a JSON file.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::game::grid::Coord;

pub const CONFIG_ENV_VAR: &str = "COUNTING_TRAIL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path} at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub tile_size: f32,
    pub hero_start: Coord,
    /// Seconds per walking leg (and per claim bounce).
    pub step_duration: f32,
    pub respawn_delay: f32,
    pub banner_duration: f32,
    /// JSON map file; the built-in loop is used when absent.
    pub map_path: Option<PathBuf>,
    pub asset_dir: PathBuf,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Počítání za jídlo".to_string(),
            width: 800,
            height: 600,
            tile_size: 64.0,
            hero_start: Coord::new(0, 0),
            step_duration: 1.0,
            respawn_delay: 1.0,
            banner_duration: 2.0,
            map_path: None,
            asset_dir: PathBuf::from("assets/images"),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads the file named by [`CONFIG_ENV_VAR`], or falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut de = serde_json::Deserializer::from_str(&raw);
        let config: GameConfig = serde_path_to_error::deserialize(&mut de).map_err(|err| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                field: err.path().to_string(),
                source: err.into_inner(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tile_size", self.tile_size),
            ("step_duration", self.step_duration),
            ("respawn_delay", self.respawn_delay),
            ("banner_duration", self.banner_duration),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid { field, reason: format!("must be positive, got {value}") });
            }
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("window must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        Ok(())
    }
}
