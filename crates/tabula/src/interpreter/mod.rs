//! Formula interpreter.
//!
//! This module provides the evaluation engine: the per-call evaluation
//! context, the built-in function registry, the grammar evaluator and the
//! user-facing [`Interpreter`].

mod context;
mod engine;
mod error;
mod evaluator;
mod functions;
mod registry;

pub use context::{DEFAULT_MAX_DEPTH, ErrorRecovery, EvalContext, ParserState, Scope};
pub use engine::Interpreter;
pub use error::{EvalError, compute_suggestions};
pub use evaluator::eval_expression;
pub use registry::{FunctionBody, FunctionRegistry, Parameter, Signature};
