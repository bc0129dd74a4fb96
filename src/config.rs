//! Logger configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Configuration for a [`Logger`](crate::Logger), immutable after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory the day files are written to (created on demand)
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Minimum level a message must have to be emitted
    #[serde(default = "default_min_level")]
    pub min_level: Level,
    /// Mirror every emitted line to standard output
    #[serde(default)]
    pub mirror_stdout: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from("./")
}

fn default_min_level() -> Level {
    Level::Info
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            min_level: default_min_level(),
            mirror_stdout: false,
        }
    }
}

impl LogConfig {
    /// Create a configuration
    ///
    /// An empty directory path means the current working directory (`./`).
    pub fn new(dir: impl Into<PathBuf>, min_level: Level, mirror_stdout: bool) -> Self {
        let dir = dir.into();
        let dir = if dir.as_os_str().is_empty() {
            default_dir()
        } else {
            dir
        };
        Self {
            dir,
            min_level,
            mirror_stdout,
        }
    }

    /// Load configuration from a TOML file, or return default if not found
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read logger config file")?;
            toml::from_str(&content).context("Failed to parse logger config file")
        } else {
            Ok(Self::default())
        }
    }
}

/// Get a per-user default logs directory (`~/.daylog/logs`)
///
/// Falls back to `./logs` if the home directory cannot be determined.
pub fn default_logs_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".daylog").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
