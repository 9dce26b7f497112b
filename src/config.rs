//! Storage settings: where each kind of entity lives on disk.
//!
//! Settings are a small JSON file in the user's config directory. A missing
//! file is not an error; defaults are written in its place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::EntityKind;

const APP_NAME: &str = "launch-catalog";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to access settings at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory that every location below is relative to.
    pub current_directory: PathBuf,
    pub launcher_location: String,
    pub launcher_collection_location: String,
    pub vehicle_family_location: String,
    pub payload_location: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_root(default_data_dir())
    }
}

impl Settings {
    /// Default locations under an explicit root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            current_directory: root.into(),
            launcher_location: "Launchers".to_string(),
            launcher_collection_location: "LauncherCollections".to_string(),
            vehicle_family_location: "VehicleFamilies".to_string(),
            payload_location: "Payloads".to_string(),
        }
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push(APP_NAME);
        path.push(SETTINGS_FILE);
        Ok(path)
    }

    /// Read settings from `path`, writing defaults there first if it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No settings at {}, creating defaults", path.display());
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, content).map_err(io_error)
    }

    /// Absolute directory holding every entity of `kind`.
    pub fn location_for(&self, kind: EntityKind) -> PathBuf {
        let location = match kind {
            EntityKind::Launcher => &self.launcher_location,
            EntityKind::LauncherCollection => &self.launcher_collection_location,
            EntityKind::VehicleFamily => &self.vehicle_family_location,
            EntityKind::Payload => &self.payload_location,
        };
        self.current_directory.join(location)
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
