mod error_code;
pub mod number;
mod value;

pub use error_code::{ErrorCode, UnknownErrorCode};
pub use value::{Value, ValueType};
