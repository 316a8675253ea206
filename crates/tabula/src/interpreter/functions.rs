//! Built-in function catalog.
//!
//! Every body receives its arguments already evaluated and matched against
//! the signature, so argument counts are at least the declared arity. Error
//! arguments only reach bodies through `All` parameters.

use std::f64::consts::PI;

use crate::interpreter::EvalError;
use crate::interpreter::registry::{Parameter, Signature};
use crate::types::number::parse_float_prefix;
use crate::types::{ErrorCode, Value, ValueType};

/// Build the signatures of all built-in functions.
pub(crate) fn builtin_signatures() -> Result<Vec<Signature>, EvalError> {
    use ValueType::{All, Any, Boolean, Number, String};

    Ok(vec![
        Signature::new("MAX", vec![Parameter::variadic("value", Number)], Number, max)?,
        Signature::new("MIN", vec![Parameter::variadic("value", Number)], Number, min)?,
        Signature::new("SUM", vec![Parameter::variadic("value", Number)], Number, sum)?,
        Signature::new("PROD", vec![Parameter::variadic("value", Number)], Number, prod)?,
        Signature::new("CONCAT", vec![Parameter::variadic("value", String)], String, concat)?,
        Signature::new("AND", vec![Parameter::variadic("value", Boolean)], Boolean, and)?,
        Signature::new("OR", vec![Parameter::variadic("value", Boolean)], Boolean, or)?,
        Signature::new("NOT", vec![Parameter::new("value", Boolean)], Boolean, not)?,
        Signature::new("PI", vec![], Number, pi)?,
        Signature::new("VALUE", vec![Parameter::new("value", String)], Number, value)?,
        Signature::new("ISNAN", vec![Parameter::new("value", Number)], Boolean, is_nan)?,
        Signature::new(
            "IF",
            vec![
                Parameter::new("condition", Any),
                Parameter::new("if_true", Any),
                Parameter::new("if_false", Any),
            ],
            Any,
            if_,
        )?,
        Signature::new("ISERROR", vec![Parameter::new("value", All)], Boolean, is_error)?,
        Signature::new(
            "IFERROR",
            vec![
                Parameter::new("value", All),
                Parameter::new("value_if_error", Any),
            ],
            Any,
            if_error,
        )?,
    ])
}

/// Fold numeric coercions; a NaN anywhere makes the result NaN.
fn fold_numbers(args: &[Value], init: f64, f: impl Fn(f64, f64) -> f64) -> f64 {
    args.iter().map(Value::as_number).fold(init, |acc, n| {
        if acc.is_nan() || n.is_nan() {
            f64::NAN
        } else {
            f(acc, n)
        }
    })
}

fn max(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Number(fold_numbers(&args, f64::NEG_INFINITY, f64::max)))
}

fn min(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Number(fold_numbers(&args, f64::INFINITY, f64::min)))
}

fn sum(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Number(args.iter().map(Value::as_number).sum()))
}

fn prod(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Number(args.iter().map(Value::as_number).product()))
}

fn concat(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::String(args.iter().map(Value::as_string).collect()))
}

fn and(args: Vec<Value>) -> Result<Value, EvalError> {
    for arg in &args {
        if !arg.as_boolean()? {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

fn or(args: Vec<Value>) -> Result<Value, EvalError> {
    for arg in &args {
        if arg.as_boolean()? {
            return Ok(Value::Boolean(true));
        }
    }
    Ok(Value::Boolean(false))
}

fn not(args: Vec<Value>) -> Result<Value, EvalError> {
    first(&args).as_boolean().map(|b| Value::Boolean(!b))
}

fn pi(_args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Number(PI))
}

fn value(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(match first(&args) {
        Value::Number(n) => Value::Number(*n),
        Value::String(s) => Value::Number(parse_float_prefix(s)),
        Value::Boolean(_) | Value::Error(_) => Value::Error(ErrorCode::Value),
    })
}

fn is_nan(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(match first(&args) {
        Value::Number(n) => Value::Boolean(n.is_nan()),
        _ => Value::Error(ErrorCode::Value),
    })
}

fn if_(args: Vec<Value>) -> Result<Value, EvalError> {
    let mut args = args.into_iter();
    let condition = args.next().unwrap_or(Value::Error(ErrorCode::Value));
    let if_true = args.next().unwrap_or(Value::Error(ErrorCode::Value));
    let if_false = args.next().unwrap_or(Value::Error(ErrorCode::Value));
    Ok(if condition.as_boolean()? { if_true } else { if_false })
}

fn is_error(args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Boolean(first(&args).is_error()))
}

fn if_error(args: Vec<Value>) -> Result<Value, EvalError> {
    let mut args = args.into_iter();
    let value = args.next().unwrap_or(Value::Error(ErrorCode::Value));
    let fallback = args.next().unwrap_or(Value::Error(ErrorCode::Value));
    Ok(if value.is_error() { fallback } else { value })
}

/// The first argument. Arity is checked before bodies run; a missing
/// argument reads as `#VALUE`.
fn first(args: &[Value]) -> &Value {
    const MISSING: &Value = &Value::Error(ErrorCode::Value);
    args.first().unwrap_or(MISSING)
}
