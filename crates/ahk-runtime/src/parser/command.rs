//! Command parsing
//!
//! `MsgBox` takes either a single `%`-prefixed expression or up to four
//! comma-separated raw-text arguments: options, title, text, timeout. The
//! positional form is only used when there are at least two arguments and
//! the first is empty or numeric; otherwise the whole line is the text.

use super::expr::parse_number;
use super::{ParseResult, Parser};
use crate::ast::*;
use crate::error::{Error, ErrorKind};
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::value::Number;

const MSGBOX_MAX_ARGS: usize = 4;

impl Parser {
    pub(super) fn command_statement(&mut self) -> ParseResult<Stmt> {
        let command = self.advance().clone();
        match command.lexeme.as_str() {
            "MsgBox" => self.msgbox(command.span),
            other => Err(Error::at_module(
                ErrorKind::InvalidSyntax(format!("Unknown command '{}'.", other)),
                command.span,
                &self.source,
            )),
        }
    }

    fn msgbox(&mut self, start: Span) -> ParseResult<Stmt> {
        if self.match_token(TokenKind::Percent) {
            let text = self.expression()?;
            let span = start.merge(text.span());
            return Ok(msgbox_stmt(
                MsgBoxArgs {
                    text: Some(text),
                    ..MsgBoxArgs::default()
                },
                span,
            ));
        }

        self.match_token(TokenKind::Comma);
        let mut segments: Vec<Token> = Vec::new();
        while self.check(TokenKind::UnquotedString) {
            segments.push(self.advance().clone());
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        let span = segments.last().map_or(start, |t| start.merge(t.span));
        let args = match segments.as_slice() {
            [] => MsgBoxArgs::default(),
            [options, rest @ ..] if !rest.is_empty() && is_option_like(options) => {
                self.positional_msgbox(&segments)?
            }
            _ => MsgBoxArgs {
                text: Some(joined_text(&segments)),
                ..MsgBoxArgs::default()
            },
        };
        Ok(msgbox_stmt(args, span))
    }

    fn positional_msgbox(&self, segments: &[Token]) -> ParseResult<MsgBoxArgs> {
        if segments.len() > MSGBOX_MAX_ARGS {
            return Err(Error::at_module(
                ErrorKind::InvalidSyntax(format!(
                    "MsgBox accepts at most {} arguments.",
                    MSGBOX_MAX_ARGS
                )),
                segments[MSGBOX_MAX_ARGS].span,
                &self.source,
            ));
        }

        let arg = |i: usize| segments.get(i).filter(|t| !t.lexeme.trim().is_empty());

        let options = match arg(0) {
            Some(token) => Some(self.numeric_arg(token, "options", false)?),
            None => None,
        };
        let timeout = match arg(3) {
            Some(token) => Some(self.numeric_arg(token, "timeout", true)?),
            None => None,
        };

        Ok(MsgBoxArgs {
            options,
            title: arg(1).map(text_expr),
            text: arg(2).map(text_expr),
            timeout,
        })
    }

    fn numeric_arg(&self, token: &Token, what: &str, allow_float: bool) -> ParseResult<NumberLiteral> {
        match number_from_text(token.lexeme.trim()) {
            Some(Number::Float(_)) if !allow_float => {}
            Some(value) => {
                return Ok(NumberLiteral {
                    value,
                    span: token.span,
                })
            }
            None => {}
        }
        Err(Error::at_module(
            ErrorKind::InvalidSyntax(format!(
                "Expected a number for the MsgBox {}.",
                what
            )),
            token.span,
            &self.source,
        ))
    }
}

fn msgbox_stmt(args: MsgBoxArgs, span: Span) -> Stmt {
    Stmt::Command(CommandStmt {
        command: Command::MsgBox(args),
        span,
    })
}

fn is_option_like(token: &Token) -> bool {
    let text = token.lexeme.trim();
    text.is_empty() || number_from_text(text).is_some()
}

/// Interpret raw argument text as a decimal, float or hexadecimal number
fn number_from_text(text: &str) -> Option<Number> {
    let kind = if text.starts_with("0x") {
        TokenKind::Hexadecimal
    } else if text.contains('.') {
        TokenKind::Float
    } else {
        TokenKind::Decimal
    };
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    parse_number(kind, text)
}

fn text_expr(token: &Token) -> Expr {
    Expr::String(StringLiteral {
        value: token.lexeme.trim().to_string(),
        interpolate: true,
        span: token.span,
    })
}

/// Rejoin raw segments that turned out to be one piece of text
fn joined_text(segments: &[Token]) -> Expr {
    let value = segments
        .iter()
        .map(|t| t.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let span = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => first.span.merge(last.span),
        _ => Span::default(),
    };
    Expr::String(StringLiteral {
        value: value.trim().to_string(),
        interpolate: true,
        span,
    })
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::parse;
    use crate::value::Number;
    use pretty_assertions::assert_eq;

    fn msgbox(source: &str) -> MsgBoxArgs {
        match parse(source, "t.ahk").unwrap().statements.remove(0) {
            Stmt::Command(CommandStmt {
                command: Command::MsgBox(args),
                ..
            }) => args,
            other => panic!("expected MsgBox, got {:?}", other),
        }
    }

    fn text_of(expr: &Option<Expr>) -> Option<&str> {
        match expr {
            Some(Expr::String(s)) => Some(s.value.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_expression_form() {
        let args = msgbox("MsgBox % 10 / 2");
        assert!(matches!(args.text, Some(Expr::Binary(_))));
        assert!(args.title.is_none());
    }

    #[test]
    fn test_plain_text_form() {
        let args = msgbox("MsgBox Hello, World!");
        assert_eq!(text_of(&args.text), Some("Hello, World!"));
        assert!(args.options.is_none());
    }

    #[test]
    fn test_positional_form() {
        let args = msgbox("MsgBox, 0x4, My Title, Proceed?, 2.5");
        assert_eq!(args.options.map(|n| n.value), Some(Number::Hexadecimal(4)));
        assert_eq!(text_of(&args.title), Some("My Title"));
        assert_eq!(text_of(&args.text), Some("Proceed?"));
        assert_eq!(args.timeout.map(|n| n.value), Some(Number::Float(2.5)));
    }

    #[test]
    fn test_positional_form_with_empty_options() {
        let args = msgbox("MsgBox, , Title, Text");
        assert!(args.options.is_none());
        assert_eq!(text_of(&args.title), Some("Title"));
    }

    #[test]
    fn test_bare_msgbox() {
        assert_eq!(msgbox("MsgBox"), MsgBoxArgs::default());
    }

    #[test]
    fn test_too_many_arguments() {
        let err = parse("MsgBox 1, a, b, 3, extra", "t.ahk").unwrap_err();
        assert_eq!(err.details(), "MsgBox accepts at most 4 arguments.");
    }

    #[test]
    fn test_bad_timeout() {
        let err = parse("MsgBox 1, a, b, soon", "t.ahk").unwrap_err();
        assert_eq!(err.details(), "Expected a number for the MsgBox timeout.");
    }
}
