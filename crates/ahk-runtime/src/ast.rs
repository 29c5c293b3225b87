//! Abstract Syntax Tree (AST) definitions
//!
//! Nodes carry their source span. The tree is immutable once parsed;
//! unquoted-string interpolation happens at evaluation time.

use crate::span::Span;
use crate::value::Number;
use serde::Serialize;

/// AST schema version
///
/// Included in JSON dumps. Increment when making breaking changes to the
/// AST structure.
pub const AST_VERSION: u32 = 1;

/// A parsed script: its top-level statements in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Versioned AST wrapper for JSON serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionedProgram<'a> {
    pub ast_version: u32,
    pub program: &'a Program,
}

impl<'a> VersionedProgram<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            ast_version: AST_VERSION,
            program,
        }
    }

    /// Serialize to a pretty JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// `name := expr`, `global name := expr`, or `name = text`
    VarAssign(VarAssign),
    /// `target.key := expr` / `target[key] := expr`
    ObjectAssign(ObjectAssign),
    If(IfStmt),
    FunctionDeclare(FunctionDecl),
    Return(ReturnStmt),
    Command(CommandStmt),
    /// A bare expression, including call statements
    Expr(ExprStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarAssign(s) => s.span,
            Stmt::ObjectAssign(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::FunctionDeclare(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Command(s) => s.span,
            Stmt::Expr(s) => s.span,
        }
    }
}

/// Identifier with its source location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarAssign {
    pub name: Identifier,
    pub value: Expr,
    /// Declared with the `global` keyword
    pub global: bool,
    pub span: Span,
}

/// Assignment through an access chain.
///
/// For `a.b[c] := v` the object is `a.b` and the key is `[c]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectAssign {
    pub object: Expr,
    pub key: AccessKey,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Option<Block>,
    pub span: Span,
}

/// Function declaration.
///
/// Parameters are kept as expressions; the interpreter rejects anything
/// that is not a plain identifier when the declaration executes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Vec<Expr>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandStmt {
    pub command: Command,
    pub span: Span,
}

/// Built-in command invocations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Command {
    MsgBox(MsgBoxArgs),
}

/// Arguments of `MsgBox`; omitted arguments take their defaults at run time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MsgBoxArgs {
    pub options: Option<NumberLiteral>,
    pub title: Option<Expr>,
    pub text: Option<Expr>,
    pub timeout: Option<NumberLiteral>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Array(ArrayLiteral),
    AssociativeArray(AssocArrayLiteral),
    Variable(Identifier),
    Access(AccessExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Ternary(TernaryExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Number(n) => n.span,
            Expr::String(s) => s.span,
            Expr::Boolean(b) => b.span,
            Expr::Array(a) => a.span,
            Expr::AssociativeArray(a) => a.span,
            Expr::Variable(id) => id.span,
            Expr::Access(a) => a.span,
            Expr::Binary(b) => b.span,
            Expr::Unary(u) => u.span,
            Expr::Ternary(t) => t.span,
            Expr::Call(c) => c.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLiteral {
    pub value: Number,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringLiteral {
    pub value: String,
    /// Unquoted text: `%name%` references are expanded when evaluated
    pub interpolate: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssocArrayLiteral {
    pub entries: Vec<AssocEntry>,
    pub span: Span,
}

/// `key: value` inside `{}`; a bare identifier key is parsed as a string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssocEntry {
    pub key: Expr,
    pub value: Expr,
}

/// One link of an access chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AccessKey {
    /// `.name`: the literal member name
    Member(Identifier),
    /// `[expr]` or `.123`: an evaluated key
    Index(Box<Expr>),
}

impl AccessKey {
    pub fn span(&self) -> Span {
        match self {
            AccessKey::Member(id) => id.span,
            AccessKey::Index(expr) => expr.span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessExpr {
    pub object: Box<Expr>,
    pub key: AccessKey,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Concat,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Concat => ".",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

/// `condition ? then_expr : else_expr`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Identifier,
    pub args: Vec<Expr>,
    pub span: Span,
}
