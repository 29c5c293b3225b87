//! High-level runtime API
//!
//! [`Runtime`] owns an interpreter whose module context persists across
//! calls, so the REPL can feed it one line at a time. [`run`] is the
//! one-shot driver contract: run a script and report an exit code.

use crate::ast::Program;
use crate::error::Error;
use crate::interpreter::{Interpreter, Outcome};
use crate::lexer::Lexer;
use crate::msgbox::MessageBoxRenderer;
use crate::parser::Parser;
use crate::span::SourceFile;
use crate::symbol::SymbolTable;
use crate::value::Value;
use ahk_config::AhkConfig;
use std::io::{self, Write};
use std::rc::Rc;

/// Exit code for a script that ran to completion
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a script that stopped at an error
pub const EXIT_FAILURE: i32 = 1;

/// Lex and parse a source file
pub fn compile(source: &Rc<SourceFile>) -> Result<Program, Error> {
    let tokens = Lexer::new(Rc::clone(source)).tokenize()?;
    Parser::new(tokens, Rc::clone(source)).parse()
}

/// Persistent interpreter session
pub struct Runtime {
    interpreter: Interpreter,
    filename: String,
}

impl Runtime {
    /// Create a runtime for scripts named `filename`
    pub fn new(filename: impl Into<String>) -> Self {
        Self::with_config(filename, AhkConfig::default())
    }

    pub fn with_config(filename: impl Into<String>, config: AhkConfig) -> Self {
        let filename = filename.into();
        let source = SourceFile::new(filename.as_str(), "");
        Self {
            interpreter: Interpreter::with_config(source, config),
            filename,
        }
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn MessageBoxRenderer>) {
        self.interpreter.set_renderer(renderer);
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.interpreter.set_debug(debug);
    }

    pub fn debug(&self) -> bool {
        self.interpreter.debug()
    }

    pub fn globals(&self) -> &SymbolTable {
        self.interpreter.globals()
    }

    /// Drop all module bindings, keeping configuration and renderer
    pub fn reset(&mut self) {
        self.interpreter.reset();
    }

    /// Debug messages recorded since the last call
    pub fn take_echoes(&mut self) -> Vec<String> {
        self.interpreter.take_echoes()
    }

    /// Compile `text` and prepare the interpreter to run it
    fn load(&mut self, text: &str) -> Result<Program, Error> {
        let source = SourceFile::new(self.filename.as_str(), text);
        let program = compile(&source)?;
        self.interpreter.set_source(source);
        Ok(program)
    }

    /// Run a whole script, returning each top-level statement's outcome
    pub fn run_source(&mut self, text: &str) -> Result<Vec<Outcome>, Error> {
        let program = self.load(text)?;
        self.interpreter.interpret(&program)
    }

    /// Run a snippet and return the last value it produced, if any
    pub fn eval(&mut self, text: &str) -> Result<Option<Value>, Error> {
        let outcomes = self.run_source(text)?;
        Ok(outcomes
            .iter()
            .flat_map(Outcome::values)
            .last()
            .cloned())
    }

    /// Run a script, writing debug echoes to `out` and the error report to
    /// `err`. Returns the exit code.
    pub fn execute(&mut self, text: &str, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<i32> {
        let program = match self.load(text) {
            Ok(program) => program,
            Err(e) => {
                write!(err, "{}", e.render())?;
                return Ok(EXIT_FAILURE);
            }
        };

        for stmt in &program.statements {
            let result = self.interpreter.execute(stmt);
            for echo in self.interpreter.take_echoes() {
                writeln!(out, "{}", echo)?;
            }
            match result {
                Ok(outcome) => {
                    if self.debug() {
                        for value in outcome.values() {
                            writeln!(out, "{}", value)?;
                        }
                    }
                }
                Err(e) => {
                    write!(err, "{}", e.render())?;
                    return Ok(EXIT_FAILURE);
                }
            }
        }
        Ok(EXIT_SUCCESS)
    }
}

/// Run `text` as the script `filename` with default configuration, printing
/// to stdout and stderr. Returns 0 on success and 1 on the first error.
pub fn run(text: &str, filename: &str, debug: bool) -> i32 {
    let mut runtime = Runtime::new(filename);
    runtime.set_debug(debug);
    let stdout = io::stdout();
    let stderr = io::stderr();
    match runtime.execute(text, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("failed to write output: {}", e);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn execute(text: &str, debug: bool) -> (i32, String, String) {
        let mut runtime = Runtime::new("t.ahk");
        runtime.set_debug(debug);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = runtime.execute(text, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_debug_output_in_execution_order() {
        let (code, out, err) = execute("a := 2\na * 3\nf(x) {\n  return x\n}\nf(\"hi\")", true);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(err, "");
        assert_eq!(
            out,
            "'a' inside '<module>' has been assigned the value '2'.\n\
             6\n\
             Function with name 'f' has been declared.\n\
             hi\n"
        );
    }

    #[test]
    fn test_quiet_without_debug() {
        let (code, out, _) = execute("a := 2\na * 3", false);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "");
    }

    #[test]
    fn test_syntax_error_stops_before_running() {
        let (code, out, err) = execute("a := 1\nb := (", true);
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out, "");
        assert!(err.starts_with("Traceback (most recent call last):\n"));
    }

    #[test]
    fn test_runtime_error_report() {
        let (code, _, err) = execute("MsgBox % 10/0", false);
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(
            err,
            "Traceback (most recent call last):\n \
             File: 't.ahk', line 1, in <module>\n    \
             MsgBox % 10/0\n\
             Runtime Error: Division by zero not allowed.\n"
        );
    }

    #[test]
    fn test_run_returns_exit_codes() {
        assert_eq!(run("x := 1 + 2", "t.ahk", false), EXIT_SUCCESS);
        assert_eq!(run("x := 1 / 0", "t.ahk", false), EXIT_FAILURE);
        assert_eq!(run("x := (", "t.ahk", false), EXIT_FAILURE);
    }

    #[test]
    fn test_session_keeps_bindings() {
        let mut runtime = Runtime::new("<repl>");
        runtime.eval("x := 41").unwrap();
        assert_eq!(runtime.eval("x + 1").unwrap(), Some(Value::decimal(42)));
        assert_eq!(runtime.eval("y := 1").unwrap(), None);
    }
}
