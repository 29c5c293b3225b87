//! AHK Configuration System
//!
//! Provides the interpreter's settings and the layered loading that
//! produces them.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.ahk/config.toml)
//! 2. Script directory config (./ahk.toml next to the script)
//! 3. Environment variables (AHK_DEBUG, AHK_MAX_CALL_DEPTH, NO_COLOR)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use ahk_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! assert!(config.run.max_call_depth >= 1);
//! ```

pub mod file;
pub mod loader;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use file::ConfigFile;
pub use loader::ConfigLoader;
pub use settings::{
    AhkConfig, DiagnosticsConfig, MsgBoxConfig, RunConfig, DEFAULT_MAX_CALL_DEPTH,
    MAX_MSGBOX_TIMEOUT,
};
