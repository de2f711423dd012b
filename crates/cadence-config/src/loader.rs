//! Configuration loader.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "cadence.toml";

/// Loads and validates configuration from the given path.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read or parsed,
/// or holds invalid values.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;

    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Returns the nearest configuration file in `start_dir` or its ancestors.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    start_dir
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Loads the nearest configuration file, or the defaults if there is none.
///
/// # Errors
///
/// Returns an error if a configuration file exists but cannot be loaded.
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<Config> {
    match find_config_file(start_dir) {
        Some(path) => load_config(path),
        None => {
            debug!("no {CONFIG_FILE_NAME} found, using defaults");
            Ok(Config::default())
        }
    }
}
