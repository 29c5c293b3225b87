//! Configuration files (config.toml / ahk.toml)
//!
//! Both the global and the per-directory file share one schema. Every field
//! is optional; a file only overrides what it names.

use crate::settings::AhkConfig;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One configuration file layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunSection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgbox: Option<MsgBoxSection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DiagnosticsSection>,
}

/// `[run]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_call_depth: Option<usize>,
}

/// `[msgbox]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct MsgBoxSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_timeout: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_title: Option<String>,
}

/// `[diagnostics]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl ConfigFile {
    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let file: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        let mut check = AhkConfig::default();
        file.apply_to(&mut check);
        check.validate()?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(file)
    }

    /// Override the fields of `config` that this file sets
    pub fn apply_to(&self, config: &mut AhkConfig) {
        if let Some(run) = &self.run {
            if let Some(debug) = run.debug {
                config.run.debug = debug;
            }
            if let Some(depth) = run.max_call_depth {
                config.run.max_call_depth = depth;
            }
        }
        if let Some(msgbox) = &self.msgbox {
            if let Some(timeout) = msgbox.max_timeout {
                config.msgbox.max_timeout = timeout;
            }
            if let Some(title) = &msgbox.default_title {
                config.msgbox.default_title = Some(title.clone());
            }
        }
        if let Some(diagnostics) = &self.diagnostics {
            if let Some(color) = diagnostics.color {
                config.diagnostics.color = color;
            }
        }
    }
}
