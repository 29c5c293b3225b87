//! Runtime value representation
//!
//! Values are cheap to clone: strings are reference-counted, containers are
//! shared handles, and functions are reference-counted declarations. Value
//! operations return [`RuntimeError`]s without positions; the interpreter
//! locates them.

mod collections;
mod number;

pub use collections::{HashKey, ValueArray, ValueMap};
pub use number::Number;

use crate::ast::Block;
use crate::error::RuntimeError;
use crate::span::SourceFile;
use std::fmt;
use std::rc::Rc;

/// A user-defined function captured at declaration time
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    /// Script text the declaration was read from
    pub source: Rc<SourceFile>,
}

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    Number(Number),
    String(Rc<String>),
    Boolean(bool),
    Array(ValueArray),
    AssociativeArray(ValueMap),
    Function(Rc<Function>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Rc::new(s.into()))
    }

    pub fn decimal(n: i64) -> Self {
        Value::Number(Number::Decimal(n))
    }

    pub fn empty_string() -> Self {
        Value::string("")
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::AssociativeArray(_) => "associative array",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness used by conditions, `not`, `and` and `or`
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::Boolean(b) => *b,
            Value::Array(arr) => !arr.is_empty(),
            Value::AssociativeArray(map) => !map.is_empty(),
            Value::Function(_) => true,
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.arith(other, "+", Number::add)
    }

    pub fn sub(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.arith(other, "-", Number::sub)
    }

    pub fn mul(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.arith(other, "*", Number::mul)
    }

    pub fn div(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.arith(other, "/", Number::div)
    }

    fn arith(
        &self,
        other: &Value,
        op: &'static str,
        apply: fn(Number, Number) -> Result<Number, RuntimeError>,
    ) -> Result<Value, RuntimeError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => apply(*a, *b).map(Value::Number),
            // A hex operand reports hex mixing even against non-numbers
            (Value::Number(n), _) | (_, Value::Number(n)) if n.is_hex() => {
                apply(*n, Number::Decimal(0)).map(Value::Number)
            }
            _ => Err(RuntimeError::TypeMismatch {
                op,
                left: self.type_name(),
                right: other.type_name(),
            }),
        }
    }

    /// `.` concatenation; both sides must be strings
    pub fn concat(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::string(joined))
            }
            _ => Err(RuntimeError::InvalidConcatenation),
        }
    }

    pub fn and(&self, other: &Value) -> Value {
        Value::Boolean(self.is_truthy() && other.is_truthy())
    }

    pub fn or(&self, other: &Value) -> Value {
        Value::Boolean(self.is_truthy() || other.is_truthy())
    }

    pub fn not(&self) -> Value {
        Value::Boolean(!self.is_truthy())
    }

    pub fn negate(&self) -> Result<Value, RuntimeError> {
        match self {
            Value::Number(n) => n.negate().map(Value::Number),
            other => Err(RuntimeError::InvalidOperand {
                op: "-",
                found: other.type_name(),
            }),
        }
    }

    pub fn unary_plus(&self) -> Result<Value, RuntimeError> {
        match self {
            Value::Number(_) => Ok(self.clone()),
            other => Err(RuntimeError::InvalidOperand {
                op: "+",
                found: other.type_name(),
            }),
        }
    }

    /// Read `self[key]`
    pub fn get(&self, key: &Value) -> Result<Value, RuntimeError> {
        match self {
            Value::Array(arr) => arr.get(key),
            Value::AssociativeArray(map) => map.get(key),
            other => Err(RuntimeError::NotAnObject {
                value: other.to_string(),
            }),
        }
    }

    /// Write `self[key] := value`
    pub fn set(&self, key: &Value, value: Value) -> Result<(), RuntimeError> {
        match self {
            Value::Array(arr) => arr.set(key, value),
            Value::AssociativeArray(map) => map.insert(key, value),
            other => Err(RuntimeError::NotAnObject {
                value: other.to_string(),
            }),
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<usize>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Function(func) => write!(f, "{}({})", func.name, func.params.join(",")),
            Value::Array(arr) => {
                if open.contains(&arr.addr()) {
                    return f.write_str("[...]");
                }
                open.push(arr.addr());
                f.write_str("[")?;
                for (i, item) in arr.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    item.fmt_nested(f, open)?;
                }
                open.pop();
                f.write_str("]")
            }
            Value::AssociativeArray(map) => {
                if open.contains(&map.addr()) {
                    return f.write_str("{...}");
                }
                open.push(map.addr());
                f.write_str("{")?;
                for (i, (key, item)) in map.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:", key)?;
                    item.fmt_nested(f, open)?;
                }
                open.pop();
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::AssociativeArray(a), Value::AssociativeArray(b)) => {
                a.ptr_eq(b) || *a.borrow() == *b.borrow()
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
