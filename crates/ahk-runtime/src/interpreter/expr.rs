//! Expression evaluation

use crate::ast::*;
use crate::context::ContextId;
use crate::error::{Error, RuntimeError};
use crate::interpreter::{ControlFlow, Interpreter};
use crate::lexer::is_identifier_char;
use crate::span::Span;
use crate::value::{Function, Value, ValueArray, ValueMap};
use std::rc::Rc;

impl Interpreter {
    /// Evaluate an expression in context `ctx`
    pub(super) fn eval_expr(&mut self, expr: &Expr, ctx: ContextId) -> Result<Value, Error> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(n.value)),
            Expr::String(s) if s.interpolate => {
                let text = self.interpolate(&s.value, s.span, ctx)?;
                Ok(Value::string(text))
            }
            Expr::String(s) => Ok(Value::string(s.value.as_str())),
            Expr::Boolean(b) => Ok(Value::Boolean(b.value)),
            Expr::Array(arr) => self.eval_array_literal(arr, ctx),
            Expr::AssociativeArray(map) => self.eval_assoc_literal(map, ctx),
            Expr::Variable(id) => self.get_variable(id, ctx),
            Expr::Access(access) => self.eval_access(access, ctx),
            Expr::Binary(binary) => self.eval_binary(binary, ctx),
            Expr::Unary(unary) => self.eval_unary(unary, ctx),
            Expr::Ternary(ternary) => {
                let condition = self.eval_expr(&ternary.condition, ctx)?;
                if condition.is_truthy() {
                    self.eval_expr(&ternary.then_expr, ctx)
                } else {
                    self.eval_expr(&ternary.else_expr, ctx)
                }
            }
            Expr::Call(call) => self.eval_call(call, ctx),
        }
    }

    fn get_variable(&self, id: &Identifier, ctx: ContextId) -> Result<Value, Error> {
        self.contexts
            .lookup(ctx, &id.name)
            .cloned()
            .ok_or_else(|| self.undefined(&id.name, id.span, ctx))
    }

    fn undefined(&self, name: &str, span: Span, ctx: ContextId) -> Error {
        self.error(
            RuntimeError::Undefined {
                name: name.to_string(),
            },
            span,
            ctx,
        )
    }

    fn eval_array_literal(&mut self, arr: &ArrayLiteral, ctx: ContextId) -> Result<Value, Error> {
        let mut elements = Vec::with_capacity(arr.elements.len());
        for element in &arr.elements {
            elements.push(self.eval_expr(element, ctx)?);
        }
        Ok(Value::Array(ValueArray::from_vec(elements)))
    }

    fn eval_assoc_literal(
        &mut self,
        literal: &AssocArrayLiteral,
        ctx: ContextId,
    ) -> Result<Value, Error> {
        let map = ValueMap::new();
        for entry in &literal.entries {
            let key = self.eval_expr(&entry.key, ctx)?;
            let value = self.eval_expr(&entry.value, ctx)?;
            map.insert(&key, value)
                .map_err(|e| self.error(e, entry.key.span(), ctx))?;
        }
        Ok(Value::AssociativeArray(map))
    }

    /// Evaluate one link of an access chain to the key value
    pub(super) fn eval_access_key(
        &mut self,
        key: &AccessKey,
        ctx: ContextId,
    ) -> Result<Value, Error> {
        match key {
            AccessKey::Member(id) => Ok(Value::string(id.name.as_str())),
            AccessKey::Index(expr) => self.eval_expr(expr, ctx),
        }
    }

    fn eval_access(&mut self, access: &AccessExpr, ctx: ContextId) -> Result<Value, Error> {
        let object = self.eval_expr(&access.object, ctx)?;
        let key = self.eval_access_key(&access.key, ctx)?;
        object
            .get(&key)
            .map_err(|e| self.error(e, access.key.span(), ctx))
    }

    /// Both operands are always evaluated, left first
    fn eval_binary(&mut self, binary: &BinaryExpr, ctx: ContextId) -> Result<Value, Error> {
        let left = self.eval_expr(&binary.left, ctx)?;
        let right = self.eval_expr(&binary.right, ctx)?;

        let result = match binary.op {
            BinaryOp::Add => left.add(&right),
            BinaryOp::Sub => left.sub(&right),
            BinaryOp::Mul => left.mul(&right),
            BinaryOp::Div => left.div(&right),
            BinaryOp::Concat => left.concat(&right),
            BinaryOp::And => Ok(left.and(&right)),
            BinaryOp::Or => Ok(left.or(&right)),
        };
        result.map_err(|e| self.error(e, binary.span, ctx))
    }

    fn eval_unary(&mut self, unary: &UnaryExpr, ctx: ContextId) -> Result<Value, Error> {
        let operand = self.eval_expr(&unary.operand, ctx)?;
        let result = match unary.op {
            UnaryOp::Plus => operand.unary_plus(),
            UnaryOp::Minus => operand.negate(),
            UnaryOp::Not => Ok(operand.not()),
        };
        result.map_err(|e| self.error(e, unary.span, ctx))
    }

    fn eval_call(&mut self, call: &CallExpr, ctx: ContextId) -> Result<Value, Error> {
        let func = match self.contexts.lookup(ctx, &call.callee.name) {
            Some(Value::Function(func)) => Rc::clone(func),
            Some(_) => {
                return Err(self.error(
                    RuntimeError::NotAFunction {
                        name: call.callee.name.clone(),
                    },
                    call.callee.span,
                    ctx,
                ))
            }
            None => return Err(self.undefined(&call.callee.name, call.callee.span, ctx)),
        };

        if func.params.len() != call.args.len() {
            return Err(self.error(
                RuntimeError::ParameterMismatch {
                    name: func.name.clone(),
                    expected: func.params.len(),
                    given: call.args.len(),
                },
                call.span,
                ctx,
            ));
        }

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg, ctx)?);
        }

        let limit = self.config.run.max_call_depth;
        if self.contexts.call_depth() >= limit {
            return Err(self.error(RuntimeError::CallDepthExceeded { limit }, call.span, ctx));
        }

        self.call_function(&func, args, call.span, ctx)
    }

    /// Run a user function in a fresh context entered from `caller`.
    ///
    /// On error the context is left in place; `Interpreter::execute` unwinds
    /// after the traceback has been captured.
    fn call_function(
        &mut self,
        func: &Function,
        args: Vec<Value>,
        call_site: Span,
        caller: ContextId,
    ) -> Result<Value, Error> {
        let source = Rc::clone(&func.source);
        let frame = self.contexts.push(&func.name, caller, call_site.start, source);
        for (param, arg) in func.params.iter().zip(args) {
            self.contexts.bind_local(frame, param, arg);
        }

        self.eval_block(&func.body.statements, frame)?;

        let result = match std::mem::replace(&mut self.control_flow, ControlFlow::None) {
            ControlFlow::Return(value) => value,
            ControlFlow::None => Value::empty_string(),
        };
        self.contexts.pop();
        Ok(result)
    }

    /// Replace each `%name%` with the display form of `name`'s value.
    /// A `%` that does not open a well-formed reference is kept as text.
    pub(super) fn interpolate(
        &self,
        text: &str,
        span: Span,
        ctx: ContextId,
    ) -> Result<String, Error> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('%') {
                Some(end) if end > 0 && after[..end].chars().all(is_identifier_char) => {
                    let name = &after[..end];
                    let value = self
                        .contexts
                        .lookup(ctx, name)
                        .ok_or_else(|| self.undefined(name, span, ctx))?;
                    out.push_str(&value.to_string());
                    rest = &after[end + 1..];
                }
                _ => {
                    out.push('%');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}
