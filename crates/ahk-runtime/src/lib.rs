//! AHK Runtime - core of a small AutoHotKey interpreter
//!
//! This library provides:
//! - Lexical analysis and parsing of AutoHotKey-style scripts
//! - Case-insensitive scopes with `global` propagation
//! - Tree-walking evaluation with tracebacks on failure
//! - The message box contract implemented by front ends

/// AHK runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod context;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod msgbox;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod span;
pub mod symbol;
pub mod token;
pub mod value;

pub use ast::{Program, VersionedProgram, AST_VERSION};
pub use context::{Context, ContextId, Contexts};
pub use error::{Error, ErrorKind, Frame, RuntimeError, Traceback};
pub use interpreter::{Interpreter, Outcome};
pub use lexer::Lexer;
pub use msgbox::{MessageBoxRenderer, MessageBoxRequest, MsgBoxStyle, RecordingRenderer};
pub use parser::Parser;
pub use repl::{ReplCore, ReplResult};
pub use runtime::{compile, run, Runtime, EXIT_FAILURE, EXIT_SUCCESS};
pub use span::{Position, SourceFile, Span};
pub use symbol::{Binding, SymbolTable};
pub use token::{Token, TokenKind};
pub use value::{Number, Value};
