//! Expression tokenizer and operator tables.
//!
//! The evaluator works directly on the token sequence; there is no separate
//! syntax tree. Token categories are decided by position during evaluation.

pub mod operators;
mod token;

pub use token::tokenize;
