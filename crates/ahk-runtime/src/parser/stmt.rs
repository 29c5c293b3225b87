//! Statement parsing

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::TokenKind;

impl Parser {
    /// Parse one statement. Block comments parse to `None`.
    pub(super) fn statement(&mut self) -> ParseResult<Option<Stmt>> {
        let stmt = match self.peek().kind {
            TokenKind::BlockCommentStart => {
                self.advance();
                self.consume(TokenKind::BlockCommentEnd, "Expected '*/'.")?;
                return Ok(None);
            }
            TokenKind::Global => self.global_assignment()?,
            TokenKind::Return => self.return_statement()?,
            TokenKind::If => Stmt::If(self.if_statement()?),
            TokenKind::Command => self.command_statement()?,
            TokenKind::Identifier => self.identifier_statement()?,
            _ => self.expression_statement()?,
        };
        Ok(Some(stmt))
    }

    /// `{` statements `}`, with line breaks allowed anywhere between statements
    pub(super) fn block(&mut self) -> ParseResult<Block> {
        self.nested(Self::block_body)
    }

    fn block_body(&mut self) -> ParseResult<Block> {
        let start = self.consume(TokenKind::LCurve, "Expected '{'.")?.span;
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.check(TokenKind::RCurve) || self.check(TokenKind::Eof) {
                break;
            }
            if let Some(stmt) = self.statement()? {
                statements.push(stmt);
            }
            self.end_statement(true)?;
        }

        let end = self.consume(TokenKind::RCurve, "Expected '}'.")?.span;
        Ok(Block {
            statements,
            span: start.merge(end),
        })
    }

    /// `global name := expr`
    fn global_assignment(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        let name = self.consume_identifier("Expected a variable name after 'global'.")?;
        self.consume(TokenKind::Assignment, "Expected ':='.")?;
        let value = self.expression()?;
        let span = start.merge(value.span());
        Ok(Stmt::VarAssign(VarAssign {
            name,
            value,
            global: true,
            span,
        }))
    }

    /// `return` with an optional value
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        let value = if self.peek().kind.is_line_end() || self.check(TokenKind::RCurve) {
            None
        } else {
            Some(self.expression()?)
        };
        let span = value.as_ref().map_or(start, |v| start.merge(v.span()));
        Ok(Stmt::Return(ReturnStmt { value, span }))
    }

    /// `if condition { ... } [else { ... } | else if ...]`
    fn if_statement(&mut self) -> ParseResult<IfStmt> {
        let start = self.advance().span;
        let condition = self.condition()?;
        self.skip_newlines();
        let then_branch = self.block()?;

        let checkpoint = self.current;
        self.skip_newlines();
        let else_branch = if self.match_token(TokenKind::Else) {
            self.skip_newlines();
            if self.check(TokenKind::If) {
                let nested = self.if_statement()?;
                let span = nested.span;
                Some(Block {
                    statements: vec![Stmt::If(nested)],
                    span,
                })
            } else {
                Some(self.block()?)
            }
        } else {
            self.current = checkpoint;
            None
        };

        let end = else_branch.as_ref().map_or(then_branch.span, |b| b.span);
        Ok(IfStmt {
            condition,
            then_branch,
            else_branch,
            span: start.merge(end),
        })
    }

    /// Statements that begin with an identifier: assignments, function
    /// declarations, calls, and access-chain assignments.
    fn identifier_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek_at(1).kind {
            TokenKind::Assignment => {
                let name = self.consume_identifier("Expected a variable name.")?;
                self.advance();
                let value = self.expression()?;
                let span = name.span.merge(value.span());
                Ok(Stmt::VarAssign(VarAssign {
                    name,
                    value,
                    global: false,
                    span,
                }))
            }
            TokenKind::LegacyAssignment => {
                let name = self.consume_identifier("Expected a variable name.")?;
                self.advance();
                let text = self.consume(TokenKind::UnquotedString, "Expected text after '='.")?;
                let value = Expr::String(StringLiteral {
                    value: text.lexeme.clone(),
                    interpolate: true,
                    span: text.span,
                });
                let span = name.span.merge(value.span());
                Ok(Stmt::VarAssign(VarAssign {
                    name,
                    value,
                    global: false,
                    span,
                }))
            }
            TokenKind::LParen => match self.function_declaration()? {
                Some(decl) => Ok(Stmt::FunctionDeclare(decl)),
                None => self.expression_statement(),
            },
            _ => self.expression_statement(),
        }
    }

    /// Try `name(params) { body }`. When no body follows the parameter list
    /// the parser rewinds and returns `None` so the caller can parse a call.
    fn function_declaration(&mut self) -> ParseResult<Option<FunctionDecl>> {
        let checkpoint = self.current;
        let name = self.consume_identifier("Expected a function name.")?;
        self.consume(TokenKind::LParen, "Expected '('.")?;
        let params = self.arguments()?;

        self.skip_newlines();
        if !self.check(TokenKind::LCurve) {
            self.current = checkpoint;
            return Ok(None);
        }

        let body = self.block()?;
        let span = name.span.merge(body.span);
        Ok(Some(FunctionDecl {
            name,
            params,
            body,
            span,
        }))
    }

    /// A bare expression, or an access chain followed by `:=`
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;

        if !self.check(TokenKind::Assignment) {
            let span = expr.span();
            return Ok(Stmt::Expr(ExprStmt { expr, span }));
        }

        match expr {
            Expr::Access(access) => {
                self.advance();
                let value = self.expression()?;
                let span = access.span.merge(value.span());
                Ok(Stmt::ObjectAssign(ObjectAssign {
                    object: *access.object,
                    key: access.key,
                    value,
                    span,
                }))
            }
            _ => Err(self.error("Cannot assign this type to anything.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn first(source: &str) -> Stmt {
        parse(source, "t.ahk").unwrap().statements.remove(0)
    }

    #[test]
    fn test_var_assign() {
        match first("Count := 10") {
            Stmt::VarAssign(assign) => {
                assert_eq!(assign.name.name, "Count");
                assert!(!assign.global);
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_global_assign() {
        match first("global total := 1") {
            Stmt::VarAssign(assign) => assert!(assign.global),
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_assign_is_interpolated_text() {
        match first("a = hello %b%") {
            Stmt::VarAssign(VarAssign {
                value: Expr::String(s),
                ..
            }) => {
                assert_eq!(s.value, " hello %b%");
                assert!(s.interpolate);
            }
            other => panic!("expected text assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_function_declaration_with_brace_on_next_line() {
        match first("add(a, b)\n{\n  return a + b\n}") {
            Stmt::FunctionDeclare(decl) => {
                assert_eq!(decl.name.name, "add");
                assert_eq!(decl.params.len(), 2);
                assert_eq!(decl.body.statements.len(), 1);
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_call_statement() {
        match first("add(1, 2)\nx := 1") {
            Stmt::Expr(ExprStmt {
                expr: Expr::Call(call),
                ..
            }) => assert_eq!(call.args.len(), 2),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_object_assign_splits_last_key() {
        match first("a.b[1] := 5") {
            Stmt::ObjectAssign(assign) => {
                assert!(matches!(assign.key, AccessKey::Index(_)));
                match assign.object {
                    Expr::Access(inner) => {
                        assert!(matches!(inner.key, AccessKey::Member(ref id) if id.name == "b"))
                    }
                    other => panic!("expected access, got {:?}", other),
                }
            }
            other => panic!("expected object assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_assigning_to_expression_is_rejected() {
        let err = parse("a + b := 1", "t.ahk").unwrap_err();
        assert_eq!(err.details(), "Cannot assign this type to anything.");
    }

    #[test]
    fn test_if_else_across_lines() {
        match first("if x\n{\n  a := 1\n}\nelse\n{\n  a := 2\n}") {
            Stmt::If(stmt) => assert!(stmt.else_branch.is_some()),
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_else_if_chain() {
        match first("if a {\n} else if b {\n} else {\n}") {
            Stmt::If(stmt) => {
                let else_branch = stmt.else_branch.unwrap();
                assert!(matches!(
                    else_branch.statements.as_slice(),
                    [Stmt::If(IfStmt { else_branch: Some(_), .. })]
                ));
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else_leaves_next_statement() {
        let program = parse("if a {\n  b := 1\n}\nc := 2", "t.ahk").unwrap();
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_return_without_value() {
        let program = parse("f() {\n  return\n}", "t.ahk").unwrap();
        match &program.statements[0] {
            Stmt::FunctionDeclare(decl) => {
                assert!(matches!(
                    decl.body.statements.as_slice(),
                    [Stmt::Return(ReturnStmt { value: None, .. })]
                ));
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_closing_brace() {
        let err = parse("if a {\n  b := 1\n", "t.ahk").unwrap_err();
        assert_eq!(err.details(), "Expected '}'.");
    }

    #[test]
    fn test_deeply_nested_blocks_are_rejected() {
        let depth = 500;
        let source = format!("{}{}", "if 1 {\n".repeat(depth), "}\n".repeat(depth));
        let err = parse(&source, "t.ahk").unwrap_err();
        assert_eq!(err.details(), "Expression nested too deeply.");
    }
}
