pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    ErrorRecovery, EvalContext, EvalError, FunctionRegistry, Interpreter, ParserState, Scope,
    compute_suggestions,
};
pub use types::{ErrorCode, Value, ValueType};

/// Evaluate `expression` against `scope` with a default [`Interpreter`].
///
/// # Example
///
/// ```
/// use tabula::{evaluate, scope};
///
/// assert_eq!(evaluate("2+3*4", &scope! {}), "14");
/// assert_eq!(evaluate("CONCAT(name, \"!\")", &scope! { "name" => "Ada" }), "Ada!");
/// ```
pub fn evaluate(expression: &str, scope: &Scope) -> String {
    Interpreter::new().evaluate(expression, scope)
}

/// Creates a [`Scope`] from name-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// numbers, booleans, strings, or error codes directly.
///
/// # Example
///
/// ```
/// use tabula::{ErrorCode, Value, scope};
///
/// let s = scope! { "count" => 3, "name" => "Alice", "bad" => ErrorCode::Name };
/// assert_eq!(s.len(), 3);
/// assert_eq!(s["count"], Value::Number(3.0));
/// assert_eq!(s["bad"].to_string(), "#NAME");
/// ```
#[macro_export]
macro_rules! scope {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
