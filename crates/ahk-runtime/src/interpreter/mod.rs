//! AST interpreter (tree-walking)
//!
//! Statements run against a [`ContextId`] in the [`Contexts`] arena. Each
//! statement yields an [`Outcome`] that the driver uses for debug echoing;
//! expressions yield [`Value`]s. The first failing sub-evaluation aborts the
//! whole statement and the error is returned with a traceback snapshot.

mod command;
mod expr;
mod stmt;

use crate::ast::{Program, Stmt};
use crate::context::{ContextId, Contexts};
use crate::error::{Error, ErrorKind};
use crate::msgbox::{MessageBoxRenderer, RecordingRenderer};
use crate::span::{SourceFile, Span};
use crate::symbol::SymbolTable;
use crate::value::Value;
use ahk_config::AhkConfig;
use std::rc::Rc;

/// Control flow signal for `return`
#[derive(Debug, Clone, PartialEq)]
pub(super) enum ControlFlow {
    None,
    Return(Value),
}

/// Result of executing one statement
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// An expression statement's value
    Value(Value),
    /// Description of a side effect (assignment, declaration, message box)
    Message(String),
    /// Results of the statements in the branch an `if` took
    Branch(Vec<Outcome>),
    Empty,
}

impl Outcome {
    /// Values produced directly or inside taken branches, in order
    pub fn values(&self) -> Vec<&Value> {
        match self {
            Outcome::Value(value) => vec![value],
            Outcome::Branch(outcomes) => outcomes.iter().flat_map(Outcome::values).collect(),
            Outcome::Message(_) | Outcome::Empty => Vec::new(),
        }
    }
}

/// Interpreter state
pub struct Interpreter {
    pub(super) contexts: Contexts,
    pub(super) control_flow: ControlFlow,
    pub(super) config: AhkConfig,
    /// Debug messages recorded since the last [`Interpreter::take_echoes`]
    pub(super) echoes: Vec<String>,
    pub(super) renderer: Box<dyn MessageBoxRenderer>,
}

impl Interpreter {
    /// Create an interpreter for a script, with default configuration
    pub fn new(source: Rc<SourceFile>) -> Self {
        Self::with_config(source, AhkConfig::default())
    }

    pub fn with_config(source: Rc<SourceFile>, config: AhkConfig) -> Self {
        Self {
            contexts: Contexts::new(source),
            control_flow: ControlFlow::None,
            config,
            echoes: Vec::new(),
            renderer: Box::new(RecordingRenderer::new()),
        }
    }

    /// Replace the message box renderer
    pub fn set_renderer(&mut self, renderer: Box<dyn MessageBoxRenderer>) {
        self.renderer = renderer;
    }

    pub fn debug(&self) -> bool {
        self.config.run.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.run.debug = debug;
    }

    pub fn config(&self) -> &AhkConfig {
        &self.config
    }

    /// Point tracebacks and default titles at new script text.
    /// Module bindings are kept.
    pub fn set_source(&mut self, source: Rc<SourceFile>) {
        self.contexts.set_source(source);
    }

    /// Forget every binding, keeping configuration and renderer
    pub fn reset(&mut self) {
        self.contexts = Contexts::new(Rc::clone(self.contexts.source()));
        self.control_flow = ControlFlow::None;
        self.echoes.clear();
    }

    /// Module-level bindings
    pub fn globals(&self) -> &SymbolTable {
        &self.contexts.module().symbols
    }

    /// Run every top-level statement in order, stopping at the first error
    pub fn interpret(&mut self, program: &Program) -> Result<Vec<Outcome>, Error> {
        let mut outcomes = Vec::with_capacity(program.statements.len());
        for stmt in &program.statements {
            outcomes.push(self.execute(stmt)?);
        }
        Ok(outcomes)
    }

    /// Run one statement in the module context
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Outcome, Error> {
        self.control_flow = ControlFlow::None;
        let result = self.eval_statement(stmt, ContextId::MODULE);
        if result.is_err() {
            self.unwind();
        }
        result
    }

    /// Drain the debug messages recorded so far
    pub fn take_echoes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.echoes)
    }

    /// Record a debug message when debug mode is on
    pub(super) fn echo(&mut self, message: &str) {
        if self.debug() {
            self.echoes.push(message.to_string());
        }
    }

    /// Build a located error with a traceback from `ctx`
    pub(super) fn error(&self, kind: impl Into<ErrorKind>, span: Span, ctx: ContextId) -> Error {
        Error::new(kind, span, self.contexts.traceback(ctx, span.start))
    }

    /// Drop any call contexts left behind by a failed statement
    fn unwind(&mut self) {
        while self.contexts.call_depth() > 0 {
            self.contexts.pop();
        }
        self.control_flow = ControlFlow::None;
    }
}
