//! Resolved interpreter settings

use crate::{ConfigError, ConfigResult};
use serde::Serialize;

/// Default limit on nested user-function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Largest message box timeout, in seconds
pub const MAX_MSGBOX_TIMEOUT: u32 = 2_147_483;

/// Effective configuration after all layers are merged
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AhkConfig {
    pub run: RunConfig,
    pub msgbox: MsgBoxConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    /// Echo each statement's effect instead of showing message boxes
    pub debug: bool,
    pub max_call_depth: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MsgBoxConfig {
    /// Timeouts are clamped to this many seconds
    pub max_timeout: u32,
    /// Title for message boxes that omit one; the script name when unset
    pub default_title: Option<String>,
}

impl Default for MsgBoxConfig {
    fn default() -> Self {
        Self {
            max_timeout: MAX_MSGBOX_TIMEOUT,
            default_title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsConfig {
    /// Colour error reports on the terminal
    pub color: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl AhkConfig {
    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.run.max_call_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "run.max_call_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.msgbox.max_timeout > MAX_MSGBOX_TIMEOUT {
            return Err(ConfigError::InvalidValue {
                field: "msgbox.max_timeout".to_string(),
                reason: format!("must not exceed {}", MAX_MSGBOX_TIMEOUT),
            });
        }
        Ok(())
    }
}
