//! Evaluation context for tracking state during recursive evaluation.

use std::collections::HashMap;

use crate::interpreter::{EvalError, FunctionRegistry};
use crate::parser::operators::SPACE;
use crate::types::Value;

/// Variable bindings visible to an expression.
pub type Scope = HashMap<String, Value>;

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What the evaluator does with the rest of a construct after an operand or
/// argument has short-circuited to an error value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorRecovery {
    /// Parse and discard the remaining operands or arguments (and the closing
    /// bracket of a call), then return the first error.
    #[default]
    Surface,
    /// Return the error immediately and leave the remaining tokens
    /// unconsumed. The top-level leftover check then reports `#TOKEN`.
    Strand,
}

/// Parser state at the end of an evaluation, kept for inspection in debug
/// mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserState {
    /// Tokens of the evaluated expression.
    pub tokens: Vec<String>,
    /// Index of the first token the evaluator did not consume.
    pub position: usize,
    /// The bindings the expression was evaluated against.
    pub scope: Scope,
}

impl ParserState {
    /// The tokens left unconsumed.
    pub fn remaining(&self) -> &[String] {
        self.tokens.get(self.position..).unwrap_or_default()
    }
}

/// Evaluation context carrying state through recursive evaluation.
///
/// The context owns the token sequence and cursor for one evaluation and
/// borrows the scope and function registry. It is created at call entry and
/// dropped (or turned into a [`ParserState`]) when the call returns.
pub struct EvalContext<'a> {
    /// Tokens of the expression being evaluated.
    tokens: Vec<String>,
    /// Index of the current token.
    position: usize,
    /// Variable bindings.
    scope: &'a Scope,
    /// Built-in functions.
    registry: &'a FunctionRegistry,
    /// Handling of tokens after a short-circuit.
    recovery: ErrorRecovery,
    /// Current nesting depth.
    depth: usize,
    /// Maximum allowed depth.
    max_depth: usize,
}

impl<'a> EvalContext<'a> {
    /// Create a context positioned at the first token.
    pub fn new(tokens: Vec<String>, scope: &'a Scope, registry: &'a FunctionRegistry) -> Self {
        Self {
            tokens,
            position: 0,
            scope,
            registry,
            recovery: ErrorRecovery::default(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the recovery policy.
    pub fn with_recovery(mut self, recovery: ErrorRecovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The current token, or `""` past the end.
    pub fn current(&self) -> &str {
        self.tokens.get(self.position).map_or("", String::as_str)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn recovery(&self) -> ErrorRecovery {
        self.recovery
    }

    pub fn registry(&self) -> &'a FunctionRegistry {
        self.registry
    }

    /// Look up a binding, returning an independent copy.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scope.get(name).cloned()
    }

    /// Consume `expected` and skip any whitespace after it.
    pub fn consume(&mut self, expected: &str) -> Result<(), EvalError> {
        self.consume_raw(expected)?;
        while self.current() == SPACE {
            self.position += 1;
        }
        Ok(())
    }

    /// Consume `expected` without skipping whitespace.
    ///
    /// Used while scanning string literals, where spaces are content.
    pub fn consume_raw(&mut self, expected: &str) -> Result<(), EvalError> {
        if self.is_at_end() {
            return Err(EvalError::UnexpectedEnd {
                expected: expected.to_string(),
            });
        }
        if self.current() != expected {
            return Err(EvalError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current().to_string(),
                position: self.position,
            });
        }
        self.position += 1;
        Ok(())
    }

    /// Consume whatever the current token is and return it.
    pub fn take_current(&mut self) -> Result<String, EvalError> {
        let token = self.current().to_string();
        self.consume(&token)?;
        Ok(token)
    }

    /// Run `f` one nesting level deeper.
    ///
    /// Returns an error if the maximum depth would be exceeded.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Capture the terminal state for inspection.
    pub fn into_state(self) -> ParserState {
        ParserState {
            tokens: self.tokens,
            position: self.position,
            scope: self.scope.clone(),
        }
    }
}
