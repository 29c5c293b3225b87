//! Lexical analysis (tokenization)
//!
//! Converts script text into a token stream that always starts with `Sof` and
//! ends with `Eof`. Two constructs switch the lexer into raw-text mode for the
//! rest of a line: the legacy `=` assignment and command arguments.

use crate::error::{Error, ErrorKind};
use crate::span::{Position, SourceFile, Span};
use crate::token::{Token, TokenKind};
use std::rc::Rc;

mod literals;

pub(crate) use literals::unescape;

/// Characters allowed in identifiers besides ASCII letters and digits.
const IDENTIFIER_SYMBOLS: &str = "@#_$";

/// Lexer state for tokenizing a script
pub struct Lexer {
    /// The script being tokenized
    pub(super) source: Rc<SourceFile>,
    /// Characters of source code
    pub(super) chars: Vec<char>,
    /// Current position in chars
    pub(super) current: usize,
    /// Current line number (1-indexed)
    pub(super) line: usize,
    /// Current column number (1-indexed)
    pub(super) column: usize,
    /// Start of the token being scanned
    pub(super) start: Position,
    /// Whether blanks preceded the token being scanned
    leading_space: bool,
    /// Tokens emitted so far
    tokens: Vec<Token>,
}

impl Lexer {
    /// Create a new lexer for the given script
    pub fn new(source: Rc<SourceFile>) -> Self {
        let chars: Vec<char> = source.text.chars().collect();
        Self {
            source,
            chars,
            current: 0,
            line: 1,
            column: 1,
            start: Position::start(),
            leading_space: false,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the script, stopping at the first lexical error
    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        self.start = self.position();
        self.push(TokenKind::Sof, "");

        loop {
            self.leading_space = self.skip_blanks();
            self.start = self.position();

            if self.is_at_end() {
                self.push(TokenKind::Eof, "");
                break;
            }

            let c = self.advance();
            match c {
                ';' => self.skip_line_comment(),
                '\n' => self.push(TokenKind::Eol, "\n"),
                '(' => self.push(TokenKind::LParen, "("),
                ')' => self.push(TokenKind::RParen, ")"),
                '[' => self.push(TokenKind::LSquare, "["),
                ']' => self.push(TokenKind::RSquare, "]"),
                '{' => self.push(TokenKind::LCurve, "{"),
                '}' => self.push(TokenKind::RCurve, "}"),
                ',' => self.push(TokenKind::Comma, ","),
                '+' => self.push(TokenKind::Plus, "+"),
                '-' => self.push(TokenKind::Minus, "-"),
                '.' => self.push(TokenKind::Dot, "."),
                '%' => self.push(TokenKind::Percent, "%"),
                '?' => self.push(TokenKind::QuestionMark, "?"),
                '*' => {
                    if self.match_char('/') {
                        self.push(TokenKind::BlockCommentEnd, "*/");
                    } else {
                        self.push(TokenKind::Multiply, "*");
                    }
                }
                '/' => {
                    if self.peek() == Some('*') {
                        self.advance();
                        if self.at_line_start() && self.rest_of_line_is_blank() {
                            self.block_comment()?;
                        } else {
                            self.push(TokenKind::BlockCommentStart, "/*");
                        }
                    } else {
                        self.push(TokenKind::Divide, "/");
                    }
                }
                ':' => {
                    if self.match_char('=') {
                        self.push(TokenKind::Assignment, ":=");
                    } else if self.is_at_end() {
                        return Err(self.illegal_character(':', self.start));
                    } else {
                        self.push(TokenKind::Colon, ":");
                    }
                }
                '=' => {
                    self.push(TokenKind::LegacyAssignment, "=");
                    self.unquoted_rest_of_line();
                }
                '"' => {
                    let token = self.string()?;
                    self.tokens.push(token);
                }
                c if c.is_ascii_digit() => {
                    let token = self.number(c)?;
                    self.tokens.push(token);
                }
                c if is_identifier_start(c) => {
                    let token = self.identifier(c);
                    let is_command = token.kind == TokenKind::Command;
                    self.tokens.push(token);
                    if is_command {
                        self.command_arguments();
                    }
                }
                other => self.push(TokenKind::Unknown, other.to_string()),
            }
        }

        log::debug!(
            "lexed {} tokens from '{}'",
            self.tokens.len(),
            self.source.name
        );
        Ok(self.tokens)
    }

    /// Skip spaces, tabs and carriage returns; report whether any were skipped
    fn skip_blanks(&mut self) -> bool {
        let mut skipped = false;
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.advance();
            skipped = true;
        }
        skipped
    }

    fn skip_line_comment(&mut self) {
        while !matches!(self.peek(), None | Some('\n')) {
            self.advance();
        }
    }

    /// True when the token being scanned is the first on its line
    fn at_line_start(&self) -> bool {
        matches!(
            self.tokens.last().map(|t| t.kind),
            None | Some(TokenKind::Sof) | Some(TokenKind::Eol)
        )
    }

    fn rest_of_line_is_blank(&self) -> bool {
        self.chars[self.current..]
            .iter()
            .take_while(|c| **c != '\n')
            .all(|c| c.is_whitespace())
    }

    /// Skip a block comment whose `/*` opener stands alone on its line.
    ///
    /// Emits the opener and closer tokens but none of the text between them.
    /// The closer must also stand alone on its line.
    fn block_comment(&mut self) -> Result<(), Error> {
        self.push(TokenKind::BlockCommentStart, "/*");
        loop {
            self.skip_line_comment();
            if self.is_at_end() {
                return Err(Error::at_module(
                    ErrorKind::IllegalCharacter("Expected '*/'".to_string()),
                    Span::point(self.position()),
                    &self.source,
                ));
            }
            self.advance();
            self.skip_blanks();
            if self.peek() == Some('*') && self.peek_next() == Some('/') {
                let close_start = self.position();
                self.advance();
                self.advance();
                if self.rest_of_line_is_blank() {
                    self.start = close_start;
                    self.push(TokenKind::BlockCommentEnd, "*/");
                    return Ok(());
                }
            }
        }
    }

    /// Capture everything up to the end of the line as raw text
    fn unquoted_rest_of_line(&mut self) {
        self.start = self.position();
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(self.advance());
        }
        let text = text.trim_end_matches('\r');
        self.push(TokenKind::UnquotedString, unescape(text));
    }

    /// Lex the argument list following a command name.
    ///
    /// A `%` followed by a blank hands the line back to the expression lexer.
    /// Otherwise the line is split on commas into raw text segments, with a
    /// blank-preceded `;` ending the list.
    fn command_arguments(&mut self) {
        self.skip_blanks();
        if matches!(self.peek(), None | Some('\n')) {
            return;
        }
        if self.peek() == Some('%') && matches!(self.peek_next(), Some(' ' | '\t')) {
            return;
        }

        if self.peek() == Some(',') {
            self.start = self.position();
            self.advance();
            self.push(TokenKind::Comma, ",");
        }

        self.start = self.position();
        let mut segment = String::new();
        let mut previous_blank = true;
        while let Some(c) = self.peek() {
            match c {
                '\n' => break,
                ';' if previous_blank => {
                    self.skip_line_comment();
                    break;
                }
                ',' => {
                    self.push(TokenKind::UnquotedString, unescape(&segment));
                    segment.clear();
                    self.start = self.position();
                    self.advance();
                    self.push(TokenKind::Comma, ",");
                    self.start = self.position();
                }
                _ => {
                    segment.push(c);
                    self.advance();
                }
            }
            previous_blank = matches!(c, ' ' | '\t');
        }
        let segment = segment.trim_end_matches('\r');
        self.push(TokenKind::UnquotedString, unescape(segment));
    }

    /// Advance to the next character
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    pub(super) fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    pub(super) fn position(&self) -> Position {
        Position::new(self.current, self.line, self.column)
    }

    /// Build a token spanning from the marked start to the current position
    pub(super) fn make_token(&self, kind: TokenKind, lexeme: impl Into<String>) -> Token {
        Token::new(kind, lexeme, Span::new(self.start, self.position()))
            .with_leading_space(self.leading_space)
    }

    fn push(&mut self, kind: TokenKind, lexeme: impl Into<String>) {
        let token = self.make_token(kind, lexeme);
        self.tokens.push(token);
    }

    pub(super) fn illegal_character(&self, c: char, at: Position) -> Error {
        let end = Position::new(at.offset + 1, at.line, at.column + 1);
        Error::at_module(
            ErrorKind::IllegalCharacter(format!("'{}'", c)),
            Span::new(at, end),
            &self.source,
        )
    }
}

/// Convenience wrapper: tokenize `text` as the script named `filename`
pub fn tokenize(text: &str, filename: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(SourceFile::new(filename, text)).tokenize()
}

pub(super) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || IDENTIFIER_SYMBOLS.contains(c)
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || IDENTIFIER_SYMBOLS.contains(c)
}
