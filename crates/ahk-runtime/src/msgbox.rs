//! Message box contract
//!
//! The interpreter builds a [`MessageBoxRequest`] and hands it to a
//! [`MessageBoxRenderer`]. Renderers decode the option bitmask with
//! [`MsgBoxStyle::decode`] and report a status: 0 on success, non-zero when
//! the option combination is not supported.

use std::cell::RefCell;
use std::rc::Rc;

/// Upper bound for a message box timeout, in seconds
pub const MAX_TIMEOUT_SECONDS: u32 = ahk_config::MAX_MSGBOX_TIMEOUT;

/// Text shown by `MsgBox` with no arguments
pub const DEFAULT_TEXT: &str = "Press OK to continue.";

#[derive(Debug, Clone, PartialEq)]
pub struct MessageBoxRequest {
    pub title: String,
    pub text: String,
    pub options: i64,
    /// Seconds before the box closes by itself, already clamped
    pub timeout: Option<f64>,
}

pub trait MessageBoxRenderer {
    /// Display a message box, returning 0 on success
    fn show(&mut self, request: &MessageBoxRequest) -> i32;
}

/// Clamp a timeout to `[0, max]` seconds
pub fn clamp_timeout(seconds: f64, max: u32) -> f64 {
    seconds.clamp(0.0, f64::from(max))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buttons {
    Ok,
    OkCancel,
    AbortRetryIgnore,
    YesNoCancel,
    YesNo,
    RetryCancel,
    CancelTryAgainContinue,
}

impl Buttons {
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Buttons::Ok => &["OK"],
            Buttons::OkCancel => &["OK", "Cancel"],
            Buttons::AbortRetryIgnore => &["Abort", "Retry", "Ignore"],
            Buttons::YesNoCancel => &["Yes", "No", "Cancel"],
            Buttons::YesNo => &["Yes", "No"],
            Buttons::RetryCancel => &["Retry", "Cancel"],
            Buttons::CancelTryAgainContinue => &["Cancel", "Try Again", "Continue"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Hand,
    Question,
    Exclamation,
    Asterisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Application,
    System,
    Task,
}

/// Decoded option bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsgBoxStyle {
    pub buttons: Buttons,
    pub icon: Option<Icon>,
    /// 0-based index of the default button
    pub default_button: usize,
    pub modality: Modality,
    pub always_on_top: bool,
}

impl MsgBoxStyle {
    /// Decode an options value; `None` for unknown bits or combinations.
    pub fn decode(options: i64) -> Option<Self> {
        if options < 0 {
            return None;
        }

        let buttons = match options & 0xF {
            0 => Buttons::Ok,
            1 => Buttons::OkCancel,
            2 => Buttons::AbortRetryIgnore,
            3 => Buttons::YesNoCancel,
            4 => Buttons::YesNo,
            5 => Buttons::RetryCancel,
            6 => Buttons::CancelTryAgainContinue,
            _ => return None,
        };
        let icon = match options & 0xF0 {
            0 => None,
            16 => Some(Icon::Hand),
            32 => Some(Icon::Question),
            48 => Some(Icon::Exclamation),
            64 => Some(Icon::Asterisk),
            _ => return None,
        };
        let default_button = match options & 0xF00 {
            0 => 0,
            256 => 1,
            512 => 2,
            768 => 3,
            _ => return None,
        };
        if default_button >= buttons.labels().len() {
            return None;
        }
        let modality = match options & 0x3000 {
            0 => Modality::Application,
            4096 => Modality::System,
            8192 => Modality::Task,
            _ => return None,
        };
        let always_on_top = options & 262_144 != 0;

        let known = 0xF | 0xF0 | 0xF00 | 0x3000 | 262_144;
        if options & !known != 0 {
            return None;
        }

        Some(Self {
            buttons,
            icon,
            default_button,
            modality,
            always_on_top,
        })
    }
}

/// Renderer that records requests instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    shown: Rc<RefCell<Vec<MessageBoxRequest>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shown so far, shared with every clone of this renderer
    pub fn requests(&self) -> Vec<MessageBoxRequest> {
        self.shown.borrow().clone()
    }
}

impl MessageBoxRenderer for RecordingRenderer {
    fn show(&mut self, request: &MessageBoxRequest) -> i32 {
        self.shown.borrow_mut().push(request.clone());
        if MsgBoxStyle::decode(request.options).is_some() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, Buttons::Ok)]
    #[case(1, Buttons::OkCancel)]
    #[case(4, Buttons::YesNo)]
    #[case(6, Buttons::CancelTryAgainContinue)]
    fn test_button_groups(#[case] options: i64, #[case] expected: Buttons) {
        assert_eq!(MsgBoxStyle::decode(options).unwrap().buttons, expected);
    }

    #[test]
    fn test_combined_flags() {
        let style = MsgBoxStyle::decode(4 + 32 + 256 + 4096 + 262_144).unwrap();
        assert_eq!(style.buttons, Buttons::YesNo);
        assert_eq!(style.icon, Some(Icon::Question));
        assert_eq!(style.default_button, 1);
        assert_eq!(style.modality, Modality::System);
        assert!(style.always_on_top);
    }

    #[rstest]
    #[case(7)]
    #[case(80)]
    #[case(512)]
    #[case(-1)]
    #[case(1 << 30)]
    fn test_unsupported_options(#[case] options: i64) {
        assert_eq!(MsgBoxStyle::decode(options), None);
    }

    #[test]
    fn test_clamp_timeout() {
        assert_eq!(clamp_timeout(5.0, MAX_TIMEOUT_SECONDS), 5.0);
        assert_eq!(clamp_timeout(1e12, MAX_TIMEOUT_SECONDS), 2_147_483.0);
        assert_eq!(clamp_timeout(-3.0, MAX_TIMEOUT_SECONDS), 0.0);
    }

    #[test]
    fn test_recording_renderer_shares_history() {
        let recorder = RecordingRenderer::new();
        let mut renderer = recorder.clone();
        let request = MessageBoxRequest {
            title: "t".into(),
            text: "x".into(),
            options: 0,
            timeout: None,
        };
        assert_eq!(renderer.show(&request), 0);
        assert_eq!(recorder.requests(), vec![request]);
    }
}
