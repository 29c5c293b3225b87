//! CLI settings read from environment variables
//!
//! Interpreter settings live in `ahk-config`; this only covers what the
//! terminal front end needs.

use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Custom history file path (AHK_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable history by default (AHK_NO_HISTORY=1)
    pub no_history: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            history_file: env::var("AHK_HISTORY_FILE").ok().map(PathBuf::from),
            no_history: env::var("AHK_NO_HISTORY").is_ok(),
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. AHK_HISTORY_FILE if set
    /// 2. ~/.ahk/history if home directory exists
    /// 3. None otherwise
    pub fn get_history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        ahk_config::ConfigLoader::global_config_dir()
            .ok()
            .map(|dir| dir.join("history"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
