//! Numeric values: decimal, float and hexadecimal
//!
//! Hexadecimal numbers only combine with other hexadecimal numbers. Decimal
//! arithmetic is checked; decimal division always yields a float.

use crate::error::RuntimeError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Number {
    Decimal(i64),
    Float(f64),
    Hexadecimal(i64),
}

#[derive(Debug, Clone, Copy)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
}

impl Arith {
    fn hex_error(self) -> RuntimeError {
        let operation = match self {
            Arith::Add => "addition",
            Arith::Sub => "subtraction",
            Arith::Mul => "multiplication",
            Arith::Div => "division",
        };
        RuntimeError::InvalidHexOperation { operation }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Decimal(n) | Number::Hexadecimal(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// The integer value, if this number is a decimal or hexadecimal
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Number::Decimal(n) | Number::Hexadecimal(n) => Some(n),
            Number::Float(_) => None,
        }
    }

    /// The integral value usable as an array index; floats qualify when
    /// they have no fractional part and fit in an `i64`
    pub fn as_index(&self) -> Option<i64> {
        match *self {
            Number::Decimal(n) | Number::Hexadecimal(n) => Some(n),
            Number::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }

    pub fn is_hex(&self) -> bool {
        matches!(self, Number::Hexadecimal(_))
    }

    pub fn add(self, other: Number) -> Result<Number, RuntimeError> {
        self.apply(other, Arith::Add)
    }

    pub fn sub(self, other: Number) -> Result<Number, RuntimeError> {
        self.apply(other, Arith::Sub)
    }

    pub fn mul(self, other: Number) -> Result<Number, RuntimeError> {
        self.apply(other, Arith::Mul)
    }

    pub fn div(self, other: Number) -> Result<Number, RuntimeError> {
        self.apply(other, Arith::Div)
    }

    pub fn negate(self) -> Result<Number, RuntimeError> {
        match self {
            Number::Decimal(n) => n
                .checked_neg()
                .map(Number::Decimal)
                .ok_or(RuntimeError::IntegerOverflow),
            Number::Hexadecimal(n) => n
                .checked_neg()
                .map(Number::Hexadecimal)
                .ok_or(RuntimeError::IntegerOverflow),
            Number::Float(f) => Ok(Number::Float(-f)),
        }
    }

    fn apply(self, other: Number, op: Arith) -> Result<Number, RuntimeError> {
        if self.is_hex() != other.is_hex() {
            return Err(op.hex_error());
        }
        if matches!(op, Arith::Div) && other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }

        match (self, other) {
            (Number::Hexadecimal(a), Number::Hexadecimal(b)) => {
                checked_integer(a, b, op).map(Number::Hexadecimal)
            }
            (Number::Decimal(a), Number::Decimal(b)) => match op {
                Arith::Div => Ok(Number::Float(a as f64 / b as f64)),
                _ => checked_integer(a, b, op).map(Number::Decimal),
            },
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                Ok(Number::Float(match op {
                    Arith::Add => a + b,
                    Arith::Sub => a - b,
                    Arith::Mul => a * b,
                    Arith::Div => a / b,
                }))
            }
        }
    }
}

fn checked_integer(a: i64, b: i64, op: Arith) -> Result<i64, RuntimeError> {
    let result = match op {
        Arith::Add => a.checked_add(b),
        Arith::Sub => a.checked_sub(b),
        Arith::Mul => a.checked_mul(b),
        Arith::Div => a.checked_div(b),
    };
    result.ok_or(RuntimeError::IntegerOverflow)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Decimal(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{:?}", x),
            Number::Hexadecimal(n) if n < 0 => write!(f, "-0x{:x}", n.unsigned_abs()),
            Number::Hexadecimal(n) => write!(f, "0x{:x}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Number::Decimal(10), "10")]
    #[case(Number::Float(10.0), "10.0")]
    #[case(Number::Float(0.5), "0.5")]
    #[case(Number::Hexadecimal(30), "0x1e")]
    #[case(Number::Hexadecimal(-1), "-0x1")]
    fn test_display(#[case] number: Number, #[case] expected: &str) {
        assert_eq!(number.to_string(), expected);
    }

    #[rstest]
    #[case(Number::Decimal(3), Some(3))]
    #[case(Number::Hexadecimal(16), Some(16))]
    #[case(Number::Float(2.0), Some(2))]
    #[case(Number::Float(-1.0), Some(-1))]
    #[case(Number::Float(2.5), None)]
    #[case(Number::Float(f64::INFINITY), None)]
    fn test_as_index(#[case] number: Number, #[case] expected: Option<i64>) {
        assert_eq!(number.as_index(), expected);
    }

    #[test]
    fn test_decimal_division_is_float() {
        let result = Number::Decimal(20).div(Number::Decimal(2)).unwrap();
        assert_eq!(result, Number::Float(10.0));
    }

    #[test]
    fn test_hex_stays_hex() {
        let sum = Number::Hexadecimal(0xf).add(Number::Hexadecimal(0xf)).unwrap();
        assert_eq!(sum, Number::Hexadecimal(0x1e));
        let quotient = Number::Hexadecimal(7).div(Number::Hexadecimal(2)).unwrap();
        assert_eq!(quotient, Number::Hexadecimal(3));
    }

    #[rstest]
    #[case(Number::Hexadecimal(1), Number::Decimal(1))]
    #[case(Number::Float(1.5), Number::Hexadecimal(1))]
    fn test_hex_mixing_is_rejected(#[case] a: Number, #[case] b: Number) {
        assert_eq!(
            a.mul(b).unwrap_err().to_string(),
            "Invalid Hexadecimal multiplication"
        );
    }

    #[rstest]
    #[case(Number::Decimal(0))]
    #[case(Number::Float(0.0))]
    fn test_division_by_zero(#[case] zero: Number) {
        assert_eq!(
            Number::Decimal(1).div(zero),
            Err(RuntimeError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(
            Number::Decimal(i64::MAX).add(Number::Decimal(1)),
            Err(RuntimeError::IntegerOverflow)
        );
    }

    #[test]
    fn test_mixed_decimal_float_promotes() {
        assert_eq!(
            Number::Decimal(1).add(Number::Float(0.5)).unwrap(),
            Number::Float(1.5)
        );
    }
}
