//! Configuration loading and merging
//!
//! Handles loading configuration from multiple sources and merging them
//! according to the hierarchy: global → script directory → environment.

use crate::file::ConfigFile;
use crate::settings::AhkConfig;
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file
pub const CONFIG_FILE_NAME: &str = "ahk.toml";

/// Name of the global configuration file inside `~/.ahk`
pub const GLOBAL_CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loader that handles the merge hierarchy
pub struct ConfigLoader {
    /// Explicit global config path; `~/.ahk/config.toml` when unset
    global_config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Read the global layer from `path` instead of the home directory
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load the effective configuration for a script living in `dir`
    pub fn load_from_directory(&mut self, dir: &Path) -> ConfigResult<AhkConfig> {
        let mut config = AhkConfig::default();

        if let Some(global) = self.load_global_config()? {
            global.apply_to(&mut config);
        }

        let local_path = dir.join(CONFIG_FILE_NAME);
        if local_path.exists() {
            ConfigFile::load_from_file(&local_path)?.apply_to(&mut config);
        }

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        log::debug!(
            "effective configuration: debug={} max_call_depth={} color={}",
            config.run.debug,
            config.run.max_call_depth,
            config.diagnostics.color
        );
        Ok(config)
    }

    /// Load the global layer, if there is one
    ///
    /// A missing file or home directory is not an error.
    fn load_global_config(&self) -> ConfigResult<Option<ConfigFile>> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match Self::global_config_dir() {
                Ok(dir) => dir.join(GLOBAL_CONFIG_FILE_NAME),
                Err(ConfigError::HomeNotFound) => return Ok(None),
                Err(e) => return Err(e),
            },
        };

        match ConfigFile::load_from_file(&path) {
            Ok(file) => Ok(Some(file)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: &mut AhkConfig) -> ConfigResult<()> {
        if let Ok(v) = std::env::var("AHK_DEBUG") {
            config.run.debug = matches!(v.to_lowercase().as_str(), "true" | "1" | "yes");
        }

        if let Ok(v) = std::env::var("AHK_MAX_CALL_DEPTH") {
            config.run.max_call_depth =
                v.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "AHK_MAX_CALL_DEPTH".to_string(),
                        reason: format!("'{}' is not a positive integer", v),
                    })?;
        }

        // https://no-color.org: any non-empty value disables colour
        if std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
            config.diagnostics.color = false;
        }

        Ok(())
    }

    /// Get the global configuration directory (~/.ahk)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".ahk"))
            .ok_or(ConfigError::HomeNotFound)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_missing_files_give_defaults() {
        let temp = TempDir::new().unwrap();
        let mut loader = ConfigLoader::with_global_path(temp.path().join("none.toml"));
        let config = loader.load_from_directory(temp.path()).unwrap();
        assert_eq!(config, AhkConfig::default());
    }

    #[test]
    #[serial]
    fn test_directory_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        fs::write(
            &global,
            "[run]\nmax_call_depth = 64\n\n[msgbox]\ndefault_title = \"Global\"\n",
        )
        .unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[msgbox]\ndefault_title = \"Local\"\n",
        )
        .unwrap();

        let mut loader = ConfigLoader::with_global_path(&global);
        let config = loader.load_from_directory(temp.path()).unwrap();
        assert_eq!(config.run.max_call_depth, 64);
        assert_eq!(config.msgbox.default_title.as_deref(), Some("Local"));
    }

    #[test]
    fn test_global_config_dir() {
        if let Ok(dir) = ConfigLoader::global_config_dir() {
            assert!(dir.ends_with(".ahk"));
        }
    }
}
