//! Property tests for literals, concatenation, arrays, scoping and division

mod common;

use ahk_runtime::{Number, RuntimeError, Value};
use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use proptest::prelude::*;

/// Text that survives a round trip through a quoted literal
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _,.!?]{0,12}"
}

proptest! {
    #[test]
    fn integer_literals_evaluate_to_decimals(n in 0i64..=i64::MAX) {
        let source = n.to_string();
        let first = eval(&source).unwrap();
        let second = eval(&source).unwrap();
        prop_assert_eq!(first.clone(), Some(Value::Number(Number::Decimal(n))));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn concatenation_is_associative(a in plain_text(), b in plain_text(), c in plain_text()) {
        let left = eval(&format!("(\"{}\" . \"{}\") . \"{}\"", a, b, c)).unwrap();
        let right = eval(&format!("\"{}\" . (\"{}\" . \"{}\")", a, b, c)).unwrap();
        prop_assert_eq!(left.clone(), right);
        prop_assert_eq!(left, Some(Value::string(format!("{}{}{}", a, b, c))));
    }

    #[test]
    fn concatenation_with_a_number_fails(s in plain_text(), n in 0i64..1000) {
        let err = runtime_error(&format!("\"{}\" . {}", s, n));
        prop_assert_eq!(err, RuntimeError::InvalidConcatenation);
    }

    #[test]
    fn array_set_then_get(len in 1usize..8, pick in 0usize..8, v in -1000i64..1000) {
        let index = pick % len + 1;
        let elements = vec!["0"; len].join(", ");
        let source = format!("a := [{}]\na[{}] := {}\na[{}]", elements, index, v, index);
        prop_assert_eq!(eval(&source).unwrap(), Some(Value::decimal(v)));
    }

    #[test]
    fn array_access_out_of_range_is_an_error(len in 0usize..6, extra in 1usize..5) {
        let elements = vec!["1"; len].join(", ");
        let source = format!("a := [{}]\na[{}]", elements, len + extra);
        prop_assert_eq!(runtime_error(&source), RuntimeError::IndexOutOfRange);
    }

    #[test]
    fn global_writes_escape_the_call(v in -1000i64..1000) {
        let source = format!("f() {{\n  global shared := {}\n  local := 1\n}}\nf()\nshared", v);
        prop_assert_eq!(eval(&source).unwrap(), Some(Value::decimal(v)));

        let source = format!("f() {{\n  local := {}\n}}\nf()\nlocal", v);
        prop_assert_eq!(
            runtime_error(&source),
            RuntimeError::Undefined { name: "local".into() }
        );
    }

    #[test]
    fn division_by_zero_never_panics(n in 0i64..100_000, hex in any::<bool>()) {
        let source = if hex {
            format!("0x{:x} / 0x0", n)
        } else {
            format!("{} / 0", n)
        };
        prop_assert_eq!(runtime_error(&source), RuntimeError::DivisionByZero);
    }
}
