use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use thiserror::Error;

/// Canonical error codes produced by formula evaluation.
///
/// Every code renders as `#` followed by its upper-case name, for example
/// `#DIV/0`. Errors are ordinary values: they flow through operators and
/// function arguments until something (such as `IFERROR`) handles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Generic fault: bad operand types, missing arguments, malformed input.
    Value,
    /// Unrecognized or leftover token.
    Token,
    /// Unbound identifier or unknown function.
    Name,
    /// Division by zero.
    DivZero,
    /// Malformed numeric literal.
    Num,
    /// Failed numeric coercion.
    NotAvailable,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::Value,
        ErrorCode::Token,
        ErrorCode::Name,
        ErrorCode::DivZero,
        ErrorCode::Num,
        ErrorCode::NotAvailable,
    ];

    /// The code without its `#` prefix.
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::Value => "VALUE",
            ErrorCode::Token => "TOKEN",
            ErrorCode::Name => "NAME",
            ErrorCode::DivZero => "DIV/0",
            ErrorCode::Num => "NUM?",
            ErrorCode::NotAvailable => "N/A",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.code())
    }
}

/// Returned when text does not name one of the canonical error codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error code '{0}'")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    /// Accepts `#DIV/0`, `div/0` and any other casing, with or without `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix('#').unwrap_or(s).to_uppercase();
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.code() == bare)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}
