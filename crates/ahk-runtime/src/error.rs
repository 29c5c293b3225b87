//! Errors and tracebacks
//!
//! Every failure in the pipeline is an [`Error`]: a kind, the span where it
//! happened, and a [`Traceback`] captured from the active context chain at the
//! moment it was raised. Lexical and syntax errors always carry a single
//! module-level frame; runtime errors carry one frame per active call.

use crate::span::{Position, SourceFile, Span};
use std::fmt;
use thiserror::Error;

/// Display name of the top-level context.
pub const MODULE_NAME: &str = "<module>";

/// Typed cause of a runtime failure.
///
/// Value operations return these without position information; the
/// interpreter attaches the span and traceback when it raises them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Division by zero not allowed.")]
    DivisionByZero,

    #[error("Invalid Hexadecimal {operation}")]
    InvalidHexOperation { operation: &'static str },

    #[error("Invalid String concatenation. A string can only be concatenated with another string.")]
    InvalidConcatenation,

    #[error("Illegal operation: cannot apply '{op}' to {left} and {right}.")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("Unary '{op}' expects a number, found {found}.")]
    InvalidOperand { op: &'static str, found: &'static str },

    #[error("Integer overflow.")]
    IntegerOverflow,

    #[error("'{name}' is not defined.")]
    Undefined { name: String },

    #[error("{value} is not an object.")]
    NotAnObject { value: String },

    #[error("Key '{key}' not found in object.")]
    KeyNotFound { key: String },

    #[error("{found} cannot be used as an object key.")]
    InvalidKey { found: &'static str },

    #[error("Index out of range.")]
    IndexOutOfRange,

    #[error("Expected an integer for an array index.")]
    InvalidIndex,

    #[error("'{name}' is not a function.")]
    NotAFunction { name: String },

    #[error("Parameter mismatch: '{name}' expects {expected} argument(s) but {given} were given.")]
    ParameterMismatch {
        name: String,
        expected: usize,
        given: usize,
    },

    #[error("Function parameters must be plain identifiers.")]
    InvalidParameter,

    #[error("'return' is only allowed inside a function.")]
    ReturnOutsideFunction,

    #[error("Maximum call depth of {limit} exceeded.")]
    CallDepthExceeded { limit: usize },

    #[error("Unsupported MsgBox option {option}.")]
    UnsupportedMsgBoxOption { option: i64 },
}

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("{0}")]
    IllegalCharacter(String),

    #[error("{0}")]
    InvalidSyntax(String),

    #[error("{0}")]
    UnexpectedEol(String),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ErrorKind {
    /// Name printed in the summary line of a traceback
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::IllegalCharacter(_) => "Illegal Character",
            ErrorKind::InvalidSyntax(_) => "Invalid Syntax",
            ErrorKind::UnexpectedEol(_) => "Unexpected EOL",
            ErrorKind::Runtime(_) => "Runtime Error",
        }
    }
}

/// One entry of a traceback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub filename: String,
    pub line: usize,
    /// Display name of the context (`<module>` or a function name)
    pub context: String,
    /// Trimmed text of the source line
    pub source_line: String,
}

impl Frame {
    pub fn new(source: &SourceFile, context: impl Into<String>, pos: Position) -> Self {
        Self {
            filename: source.name.clone(),
            line: pos.line,
            context: context.into(),
            source_line: source.line_text(pos.line).to_string(),
        }
    }
}

/// Call stack snapshot, outermost frame first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Traceback {
    frames: Vec<Frame>,
}

impl Traceback {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Traceback with a single module-level frame.
    pub fn at_module(source: &SourceFile, pos: Position) -> Self {
        Self::new(vec![Frame::new(source, MODULE_NAME, pos)])
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn innermost(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl fmt::Display for Traceback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceback (most recent call last):")?;
        for frame in &self.frames {
            writeln!(
                f,
                " File: '{}', line {}, in {}",
                frame.filename, frame.line, frame.context
            )?;
            writeln!(f, "    {}", frame.source_line)?;
        }
        Ok(())
    }
}

/// A located failure from any pipeline stage.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: {}", .kind.name(), .kind)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
    pub traceback: Traceback,
}

impl Error {
    pub fn new(kind: impl Into<ErrorKind>, span: Span, traceback: Traceback) -> Self {
        Self {
            kind: kind.into(),
            span,
            traceback,
        }
    }

    /// Error raised outside any call, with a single module frame.
    pub fn at_module(kind: impl Into<ErrorKind>, span: Span, source: &SourceFile) -> Self {
        Self::new(kind, span, Traceback::at_module(source, span.start))
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The message after the `<ErrorKind>:` prefix.
    pub fn details(&self) -> String {
        self.kind.to_string()
    }

    /// Full report: traceback followed by the summary line.
    pub fn render(&self) -> String {
        format!("{}{}\n", self.traceback, self)
    }

    pub fn runtime_error(&self) -> Option<&RuntimeError> {
        match &self.kind {
            ErrorKind::Runtime(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_single_frame() {
        let source = SourceFile::new("tests/errors/div_by_zero.ahk", "MsgBox % 10/0\n");
        let pos = Position::new(9, 1, 10);
        let err = Error::at_module(RuntimeError::DivisionByZero, Span::point(pos), &source);
        assert_eq!(
            err.render(),
            "Traceback (most recent call last):\n \
             File: 'tests/errors/div_by_zero.ahk', line 1, in <module>\n    \
             MsgBox % 10/0\n\
             Runtime Error: Division by zero not allowed.\n"
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::IllegalCharacter("'.'".into()).name(), "Illegal Character");
        assert_eq!(ErrorKind::InvalidSyntax("x".into()).name(), "Invalid Syntax");
        assert_eq!(ErrorKind::UnexpectedEol("x".into()).name(), "Unexpected EOL");
        assert_eq!(
            ErrorKind::from(RuntimeError::IndexOutOfRange).name(),
            "Runtime Error"
        );
    }

    #[test]
    fn test_summary_line() {
        let source = SourceFile::new("t.ahk", "x");
        let err = Error::at_module(
            RuntimeError::KeyNotFound { key: "y".into() },
            Span::default(),
            &source,
        );
        assert_eq!(err.to_string(), "Runtime Error: Key 'y' not found in object.");
        assert_eq!(err.details(), "Key 'y' not found in object.");
    }
}
