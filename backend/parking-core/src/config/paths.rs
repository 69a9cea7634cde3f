//! Where parKING keeps its config and data.
//!
//! Config directory lookup order:
//! 1. `PARKING_CONFIG_DIR` environment variable (explicit override)
//! 2. Platform config directory via `dirs` crate, `parking/` inside it
//! 3. `$HOME/.config/parking`
//!
//! Data directory lookup order:
//! 1. `PARKING_DATA_DIR` environment variable
//! 2. `storage.data_dir` from config
//! 3. `resources/` relative to the working directory
//!
//! Both variables may also come from a `.env` file, see [`load_dotenv`].

use crate::config::StorageConfig;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const CONFIG_DIR_ENV: &str = "PARKING_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "PARKING_DATA_DIR";
const APP_DIR_NAME: &str = "parking";
const DEFAULT_DATA_DIR: &str = "resources";

/// How the config directory was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    EnvVar,
    PlatformDefault,
    HomeFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{CONFIG_DIR_ENV}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::HomeFallback => write!(f, "home fallback"),
        }
    }
}

/// Load a `.env` file from the working directory, if there is one.
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("Loaded .env from: {:?}", path);
            Some(path)
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found");
            None
        }
        Err(e) => {
            warn!("Failed to parse .env: {}", e);
            None
        }
    }
}

/// Detect the config directory.
///
/// # Errors
/// Returns [`ConfigError::DirectoryNotFound`] if no location can be determined.
pub fn detect_config_dir() -> Result<(PathBuf, PathSource), ConfigError> {
    if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
        let config_dir = PathBuf::from(custom_dir);
        info!("Using {CONFIG_DIR_ENV} override: {:?}", config_dir);
        return Ok((config_dir, PathSource::EnvVar));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_dir = config_dir.join(APP_DIR_NAME);
        debug!("Platform config dir: {:?}", config_dir);
        return Ok((config_dir, PathSource::PlatformDefault));
    }

    if let Some(home) = dirs::home_dir() {
        let config_dir = home.join(".config").join(APP_DIR_NAME);
        warn!("Using home fallback config path: {:?}", config_dir);
        return Ok((config_dir, PathSource::HomeFallback));
    }

    Err(ConfigError::DirectoryNotFound {
        location: ErrorLocation::caller(),
        reason: format!("Cannot determine config directory. Set {CONFIG_DIR_ENV}."),
    })
}

/// Resolve the data directory for the given storage settings.
pub fn resolve_data_dir(storage: &StorageConfig) -> PathBuf {
    if let Ok(custom_dir) = env::var(DATA_DIR_ENV) {
        info!("Using {DATA_DIR_ENV} override: {:?}", custom_dir);
        return PathBuf::from(custom_dir);
    }

    match &storage.data_dir {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}
