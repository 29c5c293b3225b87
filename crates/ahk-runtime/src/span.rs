//! Source locations and the script text they point into

use serde::Serialize;
use std::rc::Rc;

/// A loaded script: its display filename and full text.
///
/// Shared via `Rc` between the lexer, parser and interpreter so that any
/// position can be resolved back to a source line for tracebacks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            text: text.into(),
        })
    }

    /// The trimmed text of a 1-based line, or an empty string past the end.
    pub fn line_text(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|idx| self.text.lines().nth(idx))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// A point in the source: character offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Position of the first character of a file.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

/// Half-open range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at a single position.
    pub fn point(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }
}
