//! Expression parsing
//!
//! Precedence, loosest first:
//! ternary `?:`, additive `+ - .`, multiplicative `* / and or`,
//! unary `+ - not`, then atoms with their access chains.

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::error::{Error, ErrorKind};
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::value::Number;

const EXPECTED_ATOM: &str = "Expected int, float, hexadecimal, string, an object or a comment.";

impl Parser {
    /// `term (("+" | "-" | ".") term)* ("?" expr ":" expr)?`
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        self.nested(Self::additive)
    }

    fn additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.term()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                TokenKind::Dot => BinaryOp::Concat,
                _ => break,
            };
            self.advance();
            let right = self.term()?;
            left = binary(op, left, right);
        }

        if self.match_token(TokenKind::QuestionMark) {
            let then_expr = self.expression()?;
            self.consume(TokenKind::Colon, "Expected ':'.")?;
            let else_expr = self.expression()?;
            let span = left.span().merge(else_expr.span());
            left = Expr::Ternary(TernaryExpr {
                condition: Box::new(left),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span,
            });
        }

        Ok(left)
    }

    /// `expr (("and" | "or") expr)*` as used by `if`
    pub(super) fn condition(&mut self) -> ParseResult<Expr> {
        let mut left = self.expression()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::And => BinaryOp::And,
                TokenKind::Or => BinaryOp::Or,
                _ => break,
            };
            self.advance();
            let right = self.expression()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `factor (("*" | "/" | "and" | "or") factor)*`
    fn term(&mut self) -> ParseResult<Expr> {
        let mut left = self.factor()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Multiply => BinaryOp::Mul,
                TokenKind::Divide => BinaryOp::Div,
                TokenKind::And => BinaryOp::And,
                TokenKind::Or => BinaryOp::Or,
                _ => break,
            };
            self.advance();
            let right = self.factor()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `("+" | "-" | "not") factor | atom`
    fn factor(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Not => UnaryOp::Not,
            _ => return self.atom(),
        };
        let start = self.advance().span;
        let operand = self.nested(Self::factor)?;
        let span = start.merge(operand.span());
        Ok(Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span,
        }))
    }

    fn atom(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Decimal | TokenKind::Hexadecimal | TokenKind::Float => {
                self.advance();
                Ok(Expr::Number(self.number_literal(&token)?))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::String(StringLiteral {
                    value: token.lexeme,
                    interpolate: false,
                    span: token.span,
                }))
            }
            TokenKind::Boolean => {
                self.advance();
                Ok(Expr::Boolean(BooleanLiteral {
                    value: token.lexeme == "true",
                    span: token.span,
                }))
            }
            TokenKind::Identifier => {
                let next = self.peek_at(1);
                let expr = if next.kind == TokenKind::LParen && !next.leading_space {
                    self.call()?
                } else {
                    self.advance();
                    Expr::Variable(Identifier {
                        name: token.lexeme,
                        span: token.span,
                    })
                };
                self.access_chain(expr)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.consume(TokenKind::RParen, "Expected ')'.")?;
                Ok(inner)
            }
            TokenKind::LSquare => {
                let array = self.array_literal()?;
                self.access_chain(array)
            }
            TokenKind::LCurve => {
                let object = self.assoc_array_literal()?;
                self.access_chain(object)
            }
            _ => Err(self.error(EXPECTED_ATOM)),
        }
    }

    /// `name "(" args ")"`
    fn call(&mut self) -> ParseResult<Expr> {
        let callee = self.consume_identifier("Expected a function name.")?;
        self.consume(TokenKind::LParen, "Expected '('.")?;
        let args = self.arguments()?;
        let end = self.tokens[self.current - 1].span;
        let span = callee.span.merge(end);
        Ok(Expr::Call(CallExpr { callee, args, span }))
    }

    /// Comma-separated expressions up to and including the closing `)`
    pub(super) fn arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen, "Expected ')'.")?;
        Ok(args)
    }

    /// Repeatedly wrap `expr` in access nodes for attached `.key` and `[key]`.
    ///
    /// A dot only continues the chain when it touches both its object and
    /// an identifier or number; otherwise it is left for concatenation.
    fn access_chain(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        loop {
            let key = if self.is_member_dot() {
                self.advance();
                let token = self.advance().clone();
                if token.kind == TokenKind::Identifier {
                    AccessKey::Member(Identifier {
                        name: token.lexeme,
                        span: token.span,
                    })
                } else {
                    let number = self.number_literal(&token)?;
                    AccessKey::Index(Box::new(Expr::Number(number)))
                }
            } else if self.check(TokenKind::LSquare) && !self.peek().leading_space {
                self.advance();
                if self.check(TokenKind::RSquare) {
                    return Err(self.error("Expected a key inside '[]'."));
                }
                let key = self.expression()?;
                self.consume(TokenKind::RSquare, "Expected ']'.")?;
                AccessKey::Index(Box::new(key))
            } else {
                break;
            };

            let end = self.tokens[self.current - 1].span;
            let span = expr.span().merge(end);
            expr = Expr::Access(AccessExpr {
                object: Box::new(expr),
                key,
                span,
            });
        }
        Ok(expr)
    }

    fn is_member_dot(&self) -> bool {
        let dot = self.peek();
        let key = self.peek_at(1);
        dot.kind == TokenKind::Dot
            && !dot.leading_space
            && !key.leading_space
            && matches!(
                key.kind,
                TokenKind::Identifier | TokenKind::Decimal | TokenKind::Hexadecimal
            )
    }

    /// `"[" (expr ("," expr)*)? "]"`
    fn array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.advance().span;
        let mut elements = Vec::new();

        if !self.check(TokenKind::RSquare) {
            loop {
                elements.push(self.expression()?);
                if self.match_token(TokenKind::Comma) {
                    continue;
                }
                if !self.check(TokenKind::RSquare) {
                    return Err(self.error("Expected ',' or ']'."));
                }
                break;
            }
        }

        let end = self.consume(TokenKind::RSquare, "Expected ']'.")?.span;
        Ok(Expr::Array(ArrayLiteral {
            elements,
            span: start.merge(end),
        }))
    }

    /// `"{" (key ":" expr ("," key ":" expr)*)? "}"`
    fn assoc_array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.advance().span;
        let mut entries = Vec::new();

        if !self.check(TokenKind::RCurve) {
            loop {
                let key = self.assoc_key()?;
                self.consume(TokenKind::Colon, "Expected ':'.")?;
                let value = self.expression()?;
                entries.push(AssocEntry { key, value });
                if self.match_token(TokenKind::Comma) {
                    continue;
                }
                if !self.check(TokenKind::RCurve) {
                    return Err(self.error("Expected ',' or '}'."));
                }
                break;
            }
        }

        let end = self.consume(TokenKind::RCurve, "Expected '}'.")?.span;
        Ok(Expr::AssociativeArray(AssocArrayLiteral {
            entries,
            span: start.merge(end),
        }))
    }

    /// A bare identifier directly before `:` names a string key
    fn assoc_key(&mut self) -> ParseResult<Expr> {
        if self.check(TokenKind::Identifier) && self.peek_at(1).kind == TokenKind::Colon {
            let token = self.advance().clone();
            return Ok(Expr::String(StringLiteral {
                value: token.lexeme,
                interpolate: false,
                span: token.span,
            }));
        }
        self.expression()
    }

    pub(super) fn number_literal(&self, token: &Token) -> ParseResult<NumberLiteral> {
        match parse_number(token.kind, &token.lexeme) {
            Some(value) => Ok(NumberLiteral {
                value,
                span: token.span,
            }),
            None => Err(Error::at_module(
                ErrorKind::InvalidSyntax(format!(
                    "Number '{}' is out of range.",
                    token.lexeme
                )),
                token.span,
                &self.source,
            )),
        }
    }
}

/// Convert number literal text of the given kind
pub(super) fn parse_number(kind: TokenKind, text: &str) -> Option<Number> {
    match kind {
        TokenKind::Decimal => text.parse().ok().map(Number::Decimal),
        TokenKind::Float => text.parse().ok().map(Number::Float),
        TokenKind::Hexadecimal => {
            let digits = text.strip_prefix("0x")?;
            i64::from_str_radix(digits, 16).ok().map(Number::Hexadecimal)
        }
        _ => None,
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span: Span = left.span().merge(right.span());
    Expr::Binary(BinaryExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}
