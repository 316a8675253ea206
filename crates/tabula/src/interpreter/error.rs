//! Error types for the formula interpreter.
//!
//! Formula-level errors such as `#DIV/0` are ordinary [`Value`]s. The types
//! here describe faults: situations where evaluation cannot continue at all.
//! The interpreter reports every fault to callers as `#VALUE`.
//!
//! [`Value`]: crate::Value

use thiserror::Error;

use crate::types::ErrorCode;

/// A fault that aborts evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The grammar required a specific token.
    #[error("expected '{expected}', found '{found}' at token {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    /// The grammar required a token but the input ended.
    #[error("expected '{expected}', found end of input")]
    UnexpectedEnd { expected: String },

    /// An error value was used where a truth value was needed.
    #[error("{code} has no boolean value")]
    NotBoolean { code: ErrorCode },

    /// An error argument was passed where the function declares no parameter.
    #[error("function '{function}' has no parameter at position {index}")]
    MissingParameter { function: String, index: usize },

    /// Maximum nesting depth exceeded.
    #[error("maximum nesting depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },

    /// A function signature failed validation when the registry was built.
    #[error("invalid signature for '{function}': {reason}")]
    InvalidSignature { function: String, reason: String },
}

/// Suggest up to three names close to `target`, closest first.
///
/// Names within edit distance 1 are accepted for targets of up to three
/// characters; longer targets accept distance 2.
pub fn compute_suggestions(target: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let target = target.to_lowercase();

    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(|name| (strsim::levenshtein(&target, &name.to_lowercase()), *name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_unstable();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}
