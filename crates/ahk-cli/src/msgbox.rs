//! Terminal message box renderer
//!
//! Draws a framed box on stdout instead of opening a window. The box is
//! informational: it does not wait for a button press, so scripts run
//! unattended.

use ahk_runtime::msgbox::{Buttons, Icon, MessageBoxRenderer, MessageBoxRequest, MsgBoxStyle};
use colored::Colorize;
use std::io::{self, Write};

/// Status returned for option values the renderer cannot draw
const UNSUPPORTED: i32 = 1;

pub struct TerminalRenderer;

impl MessageBoxRenderer for TerminalRenderer {
    fn show(&mut self, request: &MessageBoxRequest) -> i32 {
        let Some(style) = MsgBoxStyle::decode(request.options) else {
            log::warn!("unsupported MsgBox options {}", request.options);
            return UNSUPPORTED;
        };

        let mut stdout = io::stdout();
        if let Err(e) = stdout
            .write_all(draw(request, &style).as_bytes())
            .and_then(|_| stdout.flush())
        {
            log::error!("failed to draw message box: {}", e);
        }
        0
    }
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Hand => "(x)",
        Icon::Question => "(?)",
        Icon::Exclamation => "(!)",
        Icon::Asterisk => "(i)",
    }
}

fn button_row(buttons: Buttons, default_button: usize) -> String {
    buttons
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == default_button {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the box as text, one line per row
fn draw(request: &MessageBoxRequest, style: &MsgBoxStyle) -> String {
    let mut body: Vec<String> = Vec::new();
    for (i, line) in request.text.split('\n').enumerate() {
        match (i, style.icon) {
            (0, Some(icon)) => body.push(format!("{} {}", icon_glyph(icon), line)),
            (_, Some(_)) => body.push(format!("    {}", line)),
            (_, None) => body.push(line.to_string()),
        }
    }
    body.push(String::new());
    body.push(button_row(style.buttons, style.default_button));
    if let Some(timeout) = request.timeout {
        body.push(format!("(closes after {}s)", timeout));
    }

    let width = body
        .iter()
        .chain(std::iter::once(&request.title))
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let pad = |line: &str| format!("{:<width$}", line, width = width);
    let rule = "─".repeat(width + 2);

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", rule));
    out.push_str(&format!("│ {} │\n", pad(&request.title).bold()));
    out.push_str(&format!("├{}┤\n", rule));
    for line in &body {
        out.push_str(&format!("│ {} │\n", pad(line)));
    }
    out.push_str(&format!("└{}┘\n", rule));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(title: &str, text: &str, options: i64) -> MessageBoxRequest {
        MessageBoxRequest {
            title: title.to_string(),
            text: text.to_string(),
            options,
            timeout: None,
        }
    }

    #[test]
    fn test_draw_plain_box() {
        colored::control::set_override(false);
        let req = request("T", "Hello", 0);
        let style = MsgBoxStyle::decode(0).unwrap();
        assert_eq!(
            draw(&req, &style),
            "┌───────┐\n│ T     │\n├───────┤\n│ Hello │\n│       │\n│ [OK]  │\n└───────┘\n"
        );
    }

    #[test]
    fn test_draw_marks_default_button_and_icon() {
        colored::control::set_override(false);
        let req = request("Q", "Sure?", 4 + 32 + 256);
        let style = MsgBoxStyle::decode(req.options).unwrap();
        let drawn = draw(&req, &style);
        assert!(drawn.contains("(?) Sure?"));
        assert!(drawn.contains(" Yes  [No]"));
    }

    #[test]
    fn test_unsupported_options_are_reported() {
        let mut renderer = TerminalRenderer;
        assert_eq!(renderer.show(&request("T", "x", 7)), UNSUPPORTED);
    }
}
