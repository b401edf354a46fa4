//! Binary operator implementations for the evaluator.
//!
//! Both operands are always evaluated before dispatch; `&&` and `|` do not
//! short-circuit. Division and modulo follow IEEE-754, so dividing by zero
//! yields `Infinity`, `-Infinity` or `NaN` rather than an error.

use slang_ir::BinaryOp;

use crate::errors::type_mismatch;
use crate::{EvalResult, Value};

/// Apply `op` to two evaluated operands.
pub fn evaluate_binary(left: &Value, op: BinaryOp, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(numeric(*a, op, *b)),
        _ => match op {
            BinaryOp::Add if is_string(left) || is_string(right) => {
                Ok(Value::string(format!("{left}{right}")))
            }
            BinaryOp::Eq => Ok(Value::Boolean(left == right)),
            BinaryOp::NotEq => Ok(Value::Boolean(left != right)),
            BinaryOp::And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
            BinaryOp::Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
            _ => Err(type_mismatch(op, left, right)),
        },
    }
}

fn numeric(a: f64, op: BinaryOp, b: f64) -> Value {
    match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Mod => Value::Number(a % b),
        BinaryOp::Eq => Value::Boolean(a == b),
        BinaryOp::NotEq => Value::Boolean(a != b),
        BinaryOp::Lt => Value::Boolean(a < b),
        BinaryOp::Gt => Value::Boolean(a > b),
        BinaryOp::And => Value::Boolean(a != 0.0 && b != 0.0),
        BinaryOp::Or => Value::Boolean(a != 0.0 || b != 0.0),
    }
}

#[inline]
fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EvalError, ObjectValue};

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn eval(left: &Value, op: BinaryOp, right: &Value) -> Value {
        match evaluate_binary(left, op, right) {
            Ok(value) => value,
            Err(err) => panic!("{left:?} {op} {right:?} failed: {err}"),
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval(&num(2.0), BinaryOp::Add, &num(3.0)), num(5.0));
        assert_eq!(eval(&num(2.0), BinaryOp::Sub, &num(3.0)), num(-1.0));
        assert_eq!(eval(&num(2.0), BinaryOp::Mul, &num(3.0)), num(6.0));
        assert_eq!(eval(&num(3.0), BinaryOp::Div, &num(2.0)), num(1.5));
        assert_eq!(eval(&num(7.0), BinaryOp::Mod, &num(3.0)), num(1.0));
        assert_eq!(eval(&num(-7.0), BinaryOp::Mod, &num(3.0)), num(-1.0));
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        assert_eq!(
            eval(&num(1.0), BinaryOp::Div, &num(0.0)),
            num(f64::INFINITY)
        );
        assert_eq!(
            eval(&num(-1.0), BinaryOp::Div, &num(0.0)),
            num(f64::NEG_INFINITY)
        );
        let nan = |v: Value| v.as_number().is_some_and(f64::is_nan);
        assert!(nan(eval(&num(0.0), BinaryOp::Div, &num(0.0))));
        assert!(nan(eval(&num(5.0), BinaryOp::Mod, &num(0.0))));
    }

    #[test]
    fn comparisons() {
        assert_eq!(eval(&num(1.0), BinaryOp::Lt, &num(2.0)), Value::Boolean(true));
        assert_eq!(eval(&num(1.0), BinaryOp::Gt, &num(2.0)), Value::Boolean(false));
        assert_eq!(eval(&num(2.0), BinaryOp::Eq, &num(2.0)), Value::Boolean(true));
        assert_eq!(
            eval(&Value::from("a"), BinaryOp::NotEq, &Value::from("b")),
            Value::Boolean(true)
        );
        assert_eq!(
            eval(&Value::Null, BinaryOp::Eq, &Value::Null),
            Value::Boolean(true)
        );
    }

    #[test]
    fn mismatched_types_compare_unequal() {
        assert_eq!(
            eval(&num(1.0), BinaryOp::Eq, &Value::from("1")),
            Value::Boolean(false)
        );
        assert_eq!(
            eval(&Value::Null, BinaryOp::NotEq, &Value::Boolean(false)),
            Value::Boolean(true)
        );
    }

    #[test]
    fn objects_compare_by_identity() {
        let object = Value::Object(ObjectValue::new());
        assert_eq!(eval(&object, BinaryOp::Eq, &object), Value::Boolean(true));
        assert_eq!(
            eval(&object, BinaryOp::Eq, &Value::Object(ObjectValue::new())),
            Value::Boolean(false)
        );
    }

    #[test]
    fn string_concatenation_uses_display_text() {
        assert_eq!(
            eval(&Value::from("a"), BinaryOp::Add, &Value::from("b")),
            Value::from("ab")
        );
        assert_eq!(
            eval(&Value::from("n = "), BinaryOp::Add, &num(4.0)),
            Value::from("n = 4")
        );
        assert_eq!(
            eval(&Value::Boolean(true), BinaryOp::Add, &Value::from("!")),
            Value::from("true!")
        );
        assert_eq!(
            eval(&Value::Null, BinaryOp::Add, &Value::from("")),
            Value::from("null")
        );
    }

    #[test]
    fn logical_operators_use_truthiness() {
        assert_eq!(
            eval(&num(1.0), BinaryOp::And, &Value::from("x")),
            Value::Boolean(true)
        );
        assert_eq!(
            eval(&num(1.0), BinaryOp::And, &num(0.0)),
            Value::Boolean(false)
        );
        assert_eq!(
            eval(&Value::Null, BinaryOp::Or, &Value::Object(ObjectValue::new())),
            Value::Boolean(true)
        );
        assert_eq!(
            eval(&Value::from(""), BinaryOp::Or, &Value::Boolean(false)),
            Value::Boolean(false)
        );
    }

    #[test]
    fn other_combinations_are_type_mismatches() {
        assert_eq!(
            evaluate_binary(&Value::from("a"), BinaryOp::Sub, &num(1.0)),
            Err(EvalError::TypeMismatch {
                op: BinaryOp::Sub,
                left: "string",
                right: "number",
            })
        );
        assert!(evaluate_binary(&Value::Null, BinaryOp::Lt, &num(1.0)).is_err());
        assert!(evaluate_binary(&Value::Boolean(true), BinaryOp::Add, &num(1.0)).is_err());
    }
}
