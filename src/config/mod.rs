//! Configuration module
//!
//! Handles locating, loading and saving the toolbelt config.toml file.
//! Defines Config and Settings types.

mod types;

pub use types::{Config, Settings};

use crate::error::{Result, ToolbeltError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "toolbelt";
const CONFIG_FILE: &str = "config.toml";
const HISTORY_FILE: &str = "history.txt";

/// Locations of the files kept in the toolbelt config directory
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub dir: PathBuf,
    pub config_file: PathBuf,
    pub history_file: PathBuf,
}

impl ConfigPaths {
    /// Paths rooted at `dir`
    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            config_file: dir.join(CONFIG_FILE),
            history_file: dir.join(HISTORY_FILE),
            dir,
        }
    }

    /// Resolve from `XDG_CONFIG_HOME`, falling back to `~/.config`
    pub fn resolve() -> Result<Self> {
        let base = match std::env::var_os("XDG_CONFIG_HOME") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .map(|home| home.join(".config"))
                .ok_or_else(|| {
                    ToolbeltError::Config("Cannot determine home directory".to_string())
                })?,
        };

        Ok(Self::in_dir(base.join(APP_DIR)))
    }
}

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        ToolbeltError::Config(format!(
            "Cannot read config from '{}': {}. Run 'toolbelt chat --setup' to create one.",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| ToolbeltError::Config(format!("Failed to serialize config: {}", e)))?;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}

/// Write the default config file unless one exists.
///
/// Returns `true` when a new file was created.
pub fn create_default(paths: &ConfigPaths) -> Result<bool> {
    if paths.config_file.exists() {
        return Ok(false);
    }

    save(&Config::default(), &paths.config_file)?;
    debug!(path = %paths.config_file.display(), "created default configuration");
    Ok(true)
}
