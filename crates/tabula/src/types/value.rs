use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::de::{Deserializer, Error as DeError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::ErrorCode;
use super::number::{format_number, parse_number_strict};
use crate::interpreter::EvalError;

/// The type of a [`Value`], or a constraint in a function signature.
///
/// `Any` and `All` only appear in signatures. `Any` admits every value but an
/// error argument still short-circuits the call; `All` admits errors too and
/// passes them to the function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Error,
    Any,
    All,
}

impl ValueType {
    /// Whether a parameter of this type receives error values.
    pub fn admits_errors(self) -> bool {
        self == ValueType::All
    }
}

/// A runtime value produced by formula evaluation.
///
/// # Example
///
/// ```
/// use tabula::{ErrorCode, Value};
///
/// let n: Value = 3.into();
/// assert_eq!(n.as_number(), 3.0);
///
/// let flag: Value = true.into();
/// assert_eq!(flag.to_string(), "TRUE");
///
/// let err = Value::error(ErrorCode::DivZero);
/// assert_eq!(err.to_string(), "#DIV/0");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Error(ErrorCode),
}

impl Value {
    pub fn error(code: ErrorCode) -> Value {
        Value::Error(code)
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Error(_) => ValueType::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Numeric coercion: booleans are 1 or 0, strings and errors are NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(b) => f64::from(u8::from(*b)),
            Value::String(_) | Value::Error(_) => f64::NAN,
        }
    }

    /// Truthiness: non-zero numbers and non-empty strings are true.
    ///
    /// Errors have no truth value.
    pub fn as_boolean(&self) -> Result<bool, EvalError> {
        match self {
            Value::Number(n) => Ok(*n != 0.0),
            Value::String(s) => Ok(!s.is_empty()),
            Value::Boolean(b) => Ok(*b),
            Value::Error(code) => Err(EvalError::NotBoolean { code: *code }),
        }
    }

    /// Canonical text of the payload.
    pub fn as_string(&self) -> Cow<'_, str> {
        match self {
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::String(s) => Cow::Borrowed(s),
            Value::Boolean(true) => Cow::Borrowed("TRUE"),
            Value::Boolean(false) => Cow::Borrowed("FALSE"),
            Value::Error(code) => Cow::Owned(code.to_string()),
        }
    }

    /// Numeric coercion as a value, `#N/A` when the coercion fails.
    pub fn to_number(&self) -> Value {
        let n = self.as_number();
        if n.is_nan() {
            Value::Error(ErrorCode::NotAvailable)
        } else {
            Value::Number(n)
        }
    }

    pub fn to_boolean(&self) -> Result<Value, EvalError> {
        self.as_boolean().map(Value::Boolean)
    }

    pub fn to_string_value(&self) -> Value {
        Value::String(self.as_string().into_owned())
    }

    /// Ordering used by `<`, `<=`, `>` and `>=`.
    ///
    /// Values of the same type compare naturally. Mixed types compare as
    /// numbers, with strings parsed as a whole (blank is 0) and booleans as
    /// 1 or 0. `None` means unordered, which makes every ordering test false.
    pub fn relational_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => self.relational_number().partial_cmp(&other.relational_number()),
        }
    }

    fn relational_number(&self) -> f64 {
        match self {
            Value::String(s) => parse_number_strict(s),
            other => other.as_number(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.as_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Error(code) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &code.to_string())?;
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Number(f64),
    Boolean(bool),
    String(String),
    Error { error: String },
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ValueRepr::deserialize(deserializer)? {
            ValueRepr::Number(n) => Value::Number(n),
            ValueRepr::Boolean(b) => Value::Boolean(b),
            ValueRepr::String(s) => Value::String(s),
            ValueRepr::Error { error } => Value::Error(error.parse().map_err(D::Error::custom)?),
        })
    }
}

// From implementations for common types

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<ErrorCode> for Value {
    fn from(code: ErrorCode) -> Self {
        Value::Error(code)
    }
}
