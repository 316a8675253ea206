//! User-facing formula interpreter.

use std::time::Instant;

use bon::Builder;
use parking_lot::Mutex;

use crate::interpreter::context::DEFAULT_MAX_DEPTH;
use crate::interpreter::evaluator::eval_expression;
use crate::interpreter::{
    ErrorRecovery, EvalContext, EvalError, FunctionRegistry, ParserState, Scope,
};
use crate::parser::tokenize;
use crate::types::{ErrorCode, Value};

/// Evaluates formulas against variable scopes.
///
/// Every call tokenizes and evaluates its own expression in a fresh context,
/// so one interpreter can serve many threads. Evaluation never panics and
/// always produces text: the value's canonical form or an error code.
///
/// # Example
///
/// ```
/// use tabula::{Interpreter, scope};
///
/// let interpreter = Interpreter::new();
/// let vars = scope! { "price" => 4, "qty" => 3 };
///
/// assert_eq!(interpreter.evaluate("price * qty + 1", &vars), "13");
/// assert_eq!(interpreter.evaluate("price / 0", &vars), "#DIV/0");
/// ```
///
/// The builder configures debug mode, error recovery and nesting depth:
///
/// ```
/// use tabula::{ErrorRecovery, Interpreter, Scope};
///
/// let interpreter = Interpreter::builder()
///     .recovery(ErrorRecovery::Strand)
///     .max_depth(32)
///     .build();
///
/// assert_eq!(interpreter.evaluate("IF(1/0, 1, 2)", &Scope::new()), "#TOKEN");
/// ```
#[derive(Builder)]
pub struct Interpreter {
    /// When set, evaluations are timed and logged through `tracing`, faults
    /// are logged, and the final parser state of the last call is kept for
    /// inspection through [`Interpreter::last_state`].
    #[builder(default)]
    debug: bool,

    /// What to do with the rest of a construct after a short-circuit.
    #[builder(default)]
    recovery: ErrorRecovery,

    /// Maximum nesting depth of brackets, call arguments and operator chains.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Terminal parser state of the last call made in debug mode.
    #[builder(skip)]
    last_state: Mutex<Option<ParserState>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Turn debug mode on or off. Turning it off drops the retained state.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        if !debug {
            self.last_state.get_mut().take();
        }
    }

    pub fn recovery(&self) -> ErrorRecovery {
        self.recovery
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate `expression` and render the result as text.
    ///
    /// Blank expressions produce an empty string. Faults render as `#VALUE`.
    pub fn evaluate(&self, expression: &str, scope: &Scope) -> String {
        match self.evaluate_value(expression, scope) {
            Ok(value) => value.to_string(),
            Err(_) => ErrorCode::Value.to_string(),
        }
    }

    /// Evaluate `expression` and return the value itself.
    ///
    /// Blank expressions produce an empty string value.
    ///
    /// # Errors
    ///
    /// Returns the fault that aborted evaluation, such as a missing closing
    /// bracket or quote, or a nesting depth beyond the configured maximum.
    pub fn evaluate_value(&self, expression: &str, scope: &Scope) -> Result<Value, EvalError> {
        let started = Instant::now();
        let tokens = tokenize(expression);
        if tokens.is_empty() {
            self.finish(None);
            return Ok(Value::String(String::new()));
        }

        let token_count = tokens.len();
        let registry = FunctionRegistry::builtin()?;
        let mut ctx = EvalContext::new(tokens, scope, registry)
            .with_recovery(self.recovery)
            .with_max_depth(self.max_depth);
        let result = eval_expression(&mut ctx);

        if self.debug {
            let elapsed = started.elapsed();
            match &result {
                Ok(value) => tracing::debug!(
                    expression,
                    tokens = token_count,
                    result = %value,
                    ?elapsed,
                    "evaluated"
                ),
                Err(fault) => tracing::error!(
                    expression,
                    position = ctx.position(),
                    %fault,
                    ?elapsed,
                    "evaluation fault"
                ),
            }
        }
        self.finish(Some(ctx));
        result
    }

    /// Evaluate `expression` with delivery deferred until the future is
    /// polled.
    ///
    /// The evaluation itself is synchronous; no work happens concurrently.
    pub async fn evaluate_async(&self, expression: &str, scope: &Scope) -> String {
        self.evaluate(expression, scope)
    }

    /// Discard any parser state retained by debug mode.
    pub fn clear(&self) {
        self.last_state.lock().take();
    }

    /// Parser state at the end of the last debug-mode evaluation.
    ///
    /// Calls made with debug mode off clear it.
    pub fn last_state(&self) -> Option<ParserState> {
        self.last_state.lock().clone()
    }

    fn finish(&self, ctx: Option<EvalContext<'_>>) {
        let mut last_state = self.last_state.lock();
        *last_state = match ctx {
            Some(ctx) if self.debug => Some(ctx.into_state()),
            _ => None,
        };
    }
}
