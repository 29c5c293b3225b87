//! REPL core logic (UI-agnostic)

use crate::error::Error;
use crate::msgbox::MessageBoxRenderer;
use crate::runtime::Runtime;
use crate::symbol::SymbolTable;
use crate::value::Value;
use ahk_config::AhkConfig;

/// Filename shown in tracebacks for REPL input
pub const REPL_FILENAME: &str = "<stdin>";

/// Result of evaluating one REPL entry
#[derive(Debug)]
pub struct ReplResult {
    /// Last value produced by an expression statement
    pub value: Option<Value>,
    /// Debug messages, when debug mode is on
    pub echoes: Vec<String>,
    pub error: Option<Error>,
}

/// REPL core state
///
/// Module bindings persist across entries, and an error does not reset them.
pub struct ReplCore {
    runtime: Runtime,
}

impl ReplCore {
    pub fn new(config: AhkConfig) -> Self {
        Self {
            runtime: Runtime::with_config(REPL_FILENAME, config),
        }
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn MessageBoxRenderer>) {
        self.runtime.set_renderer(renderer);
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.runtime.set_debug(debug);
    }

    /// Evaluate one complete entry
    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        let result = self.runtime.eval(input);
        let echoes = self.runtime.take_echoes();
        match result {
            Ok(value) => ReplResult {
                value,
                echoes,
                error: None,
            },
            Err(error) => ReplResult {
                value: None,
                echoes,
                error: Some(error),
            },
        }
    }

    pub fn globals(&self) -> &SymbolTable {
        self.runtime.globals()
    }

    /// Clear all variables and functions
    pub fn reset(&mut self) {
        self.runtime.reset();
    }
}

impl Default for ReplCore {
    fn default() -> Self {
        Self::new(AhkConfig::default())
    }
}

/// Whether `input` still has unclosed braces and needs another line.
///
/// Braces inside string literals and `;` comments are ignored.
pub fn needs_continuation(input: &str) -> bool {
    let mut depth: i64 = 0;
    for line in input.lines() {
        let mut in_string = false;
        let mut prev = ' ';
        for c in line.chars() {
            match c {
                '"' => in_string = !in_string,
                ';' if !in_string && (prev == ' ' || prev == '\t') => break,
                '{' if !in_string => depth += 1,
                '}' if !in_string => depth -= 1,
                _ => {}
            }
            prev = c;
        }
    }
    depth > 0
}
