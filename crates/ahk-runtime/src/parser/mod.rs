//! Parsing (tokens to AST)
//!
//! Recursive descent over the token stream. Parsing stops at the first
//! error; there is no recovery.

mod command;
mod expr;
mod stmt;

use crate::ast::*;
use crate::error::{Error, ErrorKind};
use crate::lexer::Lexer;
use crate::span::SourceFile;
use crate::token::{Token, TokenKind};
use std::rc::Rc;

pub(crate) type ParseResult<T> = Result<T, Error>;

/// Deepest nesting of parentheses, literals, unary operators and blocks
pub const MAX_NESTING: usize = 100;

/// Parser state for building an AST from tokens
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) source: Rc<SourceFile>,
    /// Current nesting level, see [`MAX_NESTING`]
    depth: usize,
}

impl Parser {
    /// Create a parser over a token stream produced by the [`Lexer`]
    pub fn new(tokens: Vec<Token>, source: Rc<SourceFile>) -> Self {
        Self {
            tokens,
            current: 0,
            source,
            depth: 0,
        }
    }

    /// Parse the whole token stream into a program
    pub fn parse(mut self) -> ParseResult<Program> {
        self.match_token(TokenKind::Sof);
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.check(TokenKind::Eof) {
                break;
            }
            if let Some(stmt) = self.statement()? {
                statements.push(stmt);
            }
            self.end_statement(false)?;
        }

        log::debug!("parsed {} top-level statements", statements.len());
        Ok(Program { statements })
    }

    // === Token helpers ===

    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    pub(super) fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Token `offset` positions ahead, clamped to the final `Eof`
    pub(super) fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.current + offset).min(last)]
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    pub(super) fn consume_identifier(&mut self, message: &str) -> ParseResult<Identifier> {
        let token = self.consume(TokenKind::Identifier, message)?;
        Ok(Identifier {
            name: token.lexeme.clone(),
            span: token.span,
        })
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current + 1 >= self.tokens.len() || self.check(TokenKind::Eof)
    }

    pub(super) fn skip_newlines(&mut self) {
        while self.match_token(TokenKind::Eol) {}
    }

    /// Require a statement terminator: end of line, end of file, or a
    /// closing brace when inside a block. Only the end of line is consumed.
    pub(super) fn end_statement(&mut self, in_block: bool) -> ParseResult<()> {
        match self.peek().kind {
            TokenKind::Eol => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            TokenKind::RCurve if in_block => Ok(()),
            _ => Err(self.error("Expected end of line.")),
        }
    }

    /// Parse one nesting level deeper
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("Expression nested too deeply."));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Syntax error at the current token
    pub(super) fn error(&self, message: &str) -> Error {
        let token = self.peek();
        let kind = if token.kind.is_line_end() {
            ErrorKind::UnexpectedEol(message.to_string())
        } else {
            ErrorKind::InvalidSyntax(message.to_string())
        };
        Error::at_module(kind, token.span, &self.source)
    }
}

/// Convenience wrapper: lex and parse `text` as the script named `filename`
pub fn parse(text: &str, filename: &str) -> ParseResult<Program> {
    let source = SourceFile::new(filename, text);
    let tokens = Lexer::new(Rc::clone(&source)).tokenize()?;
    Parser::new(tokens, source).parse()
}
