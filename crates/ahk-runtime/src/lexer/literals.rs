//! Literal scanning: strings, numbers and identifiers

use super::{is_identifier_char, Lexer};
use crate::error::{Error, ErrorKind};
use crate::span::Span;
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Scan a quoted string; the opening `"` has been consumed.
    ///
    /// `""` inside the string produces a literal quote. Strings end at the
    /// line break.
    pub(super) fn string(&mut self) -> Result<Token, Error> {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(Error::at_module(
                        ErrorKind::IllegalCharacter("Expected '\"'".to_string()),
                        Span::new(self.start, self.position()),
                        &self.source,
                    ));
                }
                Some('"') => {
                    self.advance();
                    if self.peek() == Some('"') {
                        self.advance();
                        value.push('"');
                    } else {
                        break;
                    }
                }
                Some(_) => value.push(self.advance()),
            }
        }
        Ok(self.make_token(TokenKind::String, unescape(&value)))
    }

    /// Scan a number literal whose first digit has been consumed.
    ///
    /// A single `.` followed by a digit makes a float; `0x` makes a
    /// hexadecimal. Any other mix of `.`, `x` and hex letters is an error at
    /// the offending character.
    pub(super) fn number(&mut self, first: char) -> Result<Token, Error> {
        let mut text = String::from(first);
        let mut has_dot = false;
        let mut has_x = false;

        while let Some(c) = self.peek() {
            let at = self.position();
            match c {
                '0'..='9' => {}
                '.' => {
                    let next_is_digit = self.peek_next().is_some_and(|n| n.is_ascii_digit());
                    if has_dot || has_x || !next_is_digit {
                        return Err(self.illegal_character(c, at));
                    }
                    has_dot = true;
                }
                'x' => {
                    if has_x || text != "0" {
                        return Err(self.illegal_character(c, at));
                    }
                    has_x = true;
                }
                c if c.is_ascii_hexdigit() => {
                    if !has_x {
                        return Err(self.illegal_character(c, at));
                    }
                }
                _ => break,
            }
            text.push(self.advance());
        }

        if has_x && text.len() == 2 {
            return Err(self.illegal_character('x', self.start));
        }

        let kind = if has_x {
            TokenKind::Hexadecimal
        } else if has_dot {
            TokenKind::Float
        } else {
            TokenKind::Decimal
        };
        Ok(self.make_token(kind, text))
    }

    /// Scan an identifier, keyword, boolean or command name.
    pub(super) fn identifier(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        while let Some(c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            text.push(self.advance());
        }

        let kind = TokenKind::is_keyword(&text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind, text)
    }
}

/// Resolve backtick escapes: `` `n ``, `` `t ``, `` `r `` and a doubled backtick.
///
/// Unknown sequences are kept as written.
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '`' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('`') => out.push('`'),
            _ => {
                out.push('`');
                continue;
            }
        }
        chars.next();
    }
    out
}
