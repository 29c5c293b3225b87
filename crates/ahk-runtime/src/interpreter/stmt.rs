//! Statement execution

use crate::ast::*;
use crate::context::ContextId;
use crate::error::{Error, RuntimeError};
use crate::interpreter::{ControlFlow, Interpreter, Outcome};
use crate::value::{Function, Value};
use std::rc::Rc;

impl Interpreter {
    /// Execute a statement
    pub(super) fn eval_statement(&mut self, stmt: &Stmt, ctx: ContextId) -> Result<Outcome, Error> {
        match stmt {
            Stmt::VarAssign(assign) => self.eval_var_assign(assign, ctx),
            Stmt::ObjectAssign(assign) => self.eval_object_assign(assign, ctx),
            Stmt::If(if_stmt) => self.eval_if(if_stmt, ctx),
            Stmt::FunctionDeclare(decl) => self.eval_function_declare(decl, ctx),
            Stmt::Return(ret) => self.eval_return(ret, ctx),
            Stmt::Command(command) => self.eval_command(command, ctx),
            Stmt::Expr(expr_stmt) => Ok(Outcome::Value(self.eval_expr(&expr_stmt.expr, ctx)?)),
        }
    }

    /// Run statements in order until one returns
    pub(super) fn eval_block(&mut self, statements: &[Stmt], ctx: ContextId) -> Result<Vec<Outcome>, Error> {
        let mut outcomes = Vec::with_capacity(statements.len());
        for stmt in statements {
            outcomes.push(self.eval_statement(stmt, ctx)?);
            if matches!(self.control_flow, ControlFlow::Return(_)) {
                break;
            }
        }
        Ok(outcomes)
    }

    fn eval_var_assign(&mut self, assign: &VarAssign, ctx: ContextId) -> Result<Outcome, Error> {
        let value = self.eval_expr(&assign.value, ctx)?;
        let message = format!(
            "'{}' inside '{}' has been assigned the value '{}'.",
            assign.name.name,
            self.contexts.get(ctx).display_name,
            value
        );
        self.contexts
            .assign(ctx, &assign.name.name, value, assign.global);
        self.echo(&message);
        Ok(Outcome::Message(message))
    }

    fn eval_object_assign(&mut self, assign: &ObjectAssign, ctx: ContextId) -> Result<Outcome, Error> {
        let object = self.eval_expr(&assign.object, ctx)?;
        let key = self.eval_access_key(&assign.key, ctx)?;
        let value = self.eval_expr(&assign.value, ctx)?;
        let message = format!("Key '{}' was assigned the value {}.", key, value);
        object
            .set(&key, value)
            .map_err(|e| self.error(e, assign.key.span(), ctx))?;
        self.echo(&message);
        Ok(Outcome::Message(message))
    }

    fn eval_if(&mut self, if_stmt: &IfStmt, ctx: ContextId) -> Result<Outcome, Error> {
        let condition = self.eval_expr(&if_stmt.condition, ctx)?;
        let branch = if condition.is_truthy() {
            Some(&if_stmt.then_branch)
        } else {
            if_stmt.else_branch.as_ref()
        };

        match branch {
            Some(block) => Ok(Outcome::Branch(self.eval_block(&block.statements, ctx)?)),
            None => Ok(Outcome::Empty),
        }
    }

    fn eval_function_declare(&mut self, decl: &FunctionDecl, ctx: ContextId) -> Result<Outcome, Error> {
        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            match param {
                Expr::Variable(id) => params.push(id.name.clone()),
                other => return Err(self.error(RuntimeError::InvalidParameter, other.span(), ctx)),
            }
        }

        let func = Function {
            name: decl.name.name.clone(),
            params,
            body: decl.body.clone(),
            source: Rc::clone(&self.contexts.get(ctx).source),
        };
        self.contexts
            .bind_local(ctx, &decl.name.name, Value::Function(Rc::new(func)));

        let message = format!("Function with name '{}' has been declared.", decl.name.name);
        self.echo(&message);
        Ok(Outcome::Message(message))
    }

    fn eval_return(&mut self, ret: &ReturnStmt, ctx: ContextId) -> Result<Outcome, Error> {
        if ctx.is_module() {
            return Err(self.error(RuntimeError::ReturnOutsideFunction, ret.span, ctx));
        }

        let value = match &ret.value {
            Some(expr) => self.eval_expr(expr, ctx)?,
            None => Value::empty_string(),
        };
        self.control_flow = ControlFlow::Return(value);
        Ok(Outcome::Empty)
    }
}
