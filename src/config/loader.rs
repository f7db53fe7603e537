//! Configuration loading and discovery for `teesheet.toml`

use super::schema::TeesheetConfig;
use crate::part::SkinPart;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "teesheet.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse teesheet.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub orientation: Option<i32>,
    pub eye: Option<SkinPart>,
    pub part_dir: Option<PathBuf>,
    pub overwrite: Option<bool>,
}

/// Find teesheet.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for teesheet.toml
/// 2. Check XDG_CONFIG_HOME/teesheet/teesheet.toml (or ~/.config/teesheet/teesheet.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find teesheet.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("teesheet").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find teesheet.toml by walking up from `start`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a teesheet.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// default configuration.
pub fn load_config(path: Option<&Path>) -> Result<TeesheetConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("no teesheet.toml found, using defaults");
            Ok(TeesheetConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<TeesheetConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TeesheetConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut TeesheetConfig, overrides: &CliOverrides) {
    if let Some(orientation) = overrides.orientation {
        config.render.orientation = orientation;
    }
    if let Some(eye) = overrides.eye {
        config.render.eye = eye.name().to_string();
    }
    if let Some(ref part_dir) = overrides.part_dir {
        config.output.part_dir = part_dir.clone();
    }
    if let Some(overwrite) = overrides.overwrite {
        config.output.overwrite = overwrite;
    }
}
