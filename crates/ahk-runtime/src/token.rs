//! Token types for lexical analysis
//!
//! Defines the token vocabulary shared by the lexer and the parser.

use crate::span::Span;
use serde::Serialize;

/// Commands understood by the interpreter.
pub const COMMANDS: &[&str] = &["MsgBox"];

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source text of this token; for strings, the unescaped contents
    pub lexeme: String,
    /// Source location
    pub span: Span,
    /// Whether whitespace separated this token from the previous one
    pub leading_space: bool,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            leading_space: false,
        }
    }

    pub fn with_leading_space(mut self, leading_space: bool) -> Self {
        self.leading_space = leading_space;
        self
    }
}

/// Classification of token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Literals
    Identifier,
    /// Integer literal (`42`)
    Decimal,
    /// Hexadecimal literal (`0x1F`)
    Hexadecimal,
    /// Float literal (`3.14`)
    Float,
    /// `true` / `false`
    Boolean,
    /// Quoted string literal
    String,
    /// Raw text: the right side of `=` or a command argument
    UnquotedString,

    // Keywords
    Global,
    And,
    Or,
    Not,
    If,
    Else,
    Return,

    /// A built-in command name such as `MsgBox`
    Command,

    // Assignment
    /// `:=`
    Assignment,
    /// `=`
    LegacyAssignment,

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Dot,
    Percent,
    QuestionMark,

    // Punctuation
    LParen,
    RParen,
    LSquare,
    RSquare,
    LCurve,
    RCurve,
    Comma,
    Colon,
    /// Reserved; `;` always opens a line comment.
    Semicolon,
    BlockCommentStart,
    BlockCommentEnd,

    // Structure
    Sof,
    Eol,
    Eof,
    /// Any character outside the vocabulary
    Unknown,
}

impl TokenKind {
    /// Check if a string is a keyword, returning the corresponding token kind
    pub fn is_keyword(s: &str) -> Option<TokenKind> {
        match s {
            "global" => Some(TokenKind::Global),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "not" => Some(TokenKind::Not),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "return" => Some(TokenKind::Return),
            "true" | "false" => Some(TokenKind::Boolean),
            _ if COMMANDS.contains(&s) => Some(TokenKind::Command),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            TokenKind::Decimal | TokenKind::Hexadecimal | TokenKind::Float
        )
    }

    /// Tokens that terminate a statement line.
    pub fn is_line_end(&self) -> bool {
        matches!(self, TokenKind::Eol | TokenKind::Eof)
    }

    /// Get a human-readable name for this token kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Decimal => "integer",
            TokenKind::Hexadecimal => "hexadecimal",
            TokenKind::Float => "float",
            TokenKind::Boolean => "boolean",
            TokenKind::String => "string",
            TokenKind::UnquotedString => "text",
            TokenKind::Global => "global",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Command => "command",
            TokenKind::Assignment => ":=",
            TokenKind::LegacyAssignment => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Dot => ".",
            TokenKind::Percent => "%",
            TokenKind::QuestionMark => "?",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LSquare => "[",
            TokenKind::RSquare => "]",
            TokenKind::LCurve => "{",
            TokenKind::RCurve => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::BlockCommentStart => "/*",
            TokenKind::BlockCommentEnd => "*/",
            TokenKind::Sof => "start of file",
            TokenKind::Eol => "end of line",
            TokenKind::Eof => "end of file",
            TokenKind::Unknown => "unknown character",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_token_creation() {
        let span = Span::new(Position::new(0, 1, 1), Position::new(2, 1, 3));
        let token = Token::new(TokenKind::Decimal, "42", span);
        assert_eq!(token.kind, TokenKind::Decimal);
        assert_eq!(token.lexeme, "42");
        assert!(!token.leading_space);
        assert!(token.with_leading_space(true).leading_space);
    }

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::is_keyword("global"), Some(TokenKind::Global));
        assert_eq!(TokenKind::is_keyword("and"), Some(TokenKind::And));
        assert_eq!(TokenKind::is_keyword("or"), Some(TokenKind::Or));
        assert_eq!(TokenKind::is_keyword("not"), Some(TokenKind::Not));
        assert_eq!(TokenKind::is_keyword("if"), Some(TokenKind::If));
        assert_eq!(TokenKind::is_keyword("else"), Some(TokenKind::Else));
        assert_eq!(TokenKind::is_keyword("return"), Some(TokenKind::Return));
        assert_eq!(TokenKind::is_keyword("true"), Some(TokenKind::Boolean));
        assert_eq!(TokenKind::is_keyword("MsgBox"), Some(TokenKind::Command));
    }

    #[test]
    fn test_keywords_match_exact_text() {
        assert_eq!(TokenKind::is_keyword("If"), None);
        assert_eq!(TokenKind::is_keyword("TRUE"), None);
        assert_eq!(TokenKind::is_keyword("msgbox"), None);
        assert_eq!(TokenKind::is_keyword("ifx"), None);
    }

    #[test]
    fn test_token_kind_as_str() {
        assert_eq!(TokenKind::Assignment.as_str(), ":=");
        assert_eq!(TokenKind::BlockCommentStart.as_str(), "/*");
        assert_eq!(TokenKind::Eol.as_str(), "end of line");
    }
}
