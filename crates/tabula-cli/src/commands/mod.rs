//! CLI command implementations.

mod batch;
mod eval;
mod options;
mod tokens;

pub use batch::{run_batch, BatchArgs};
pub use eval::{run_eval, EvalArgs};
pub use tokens::{run_tokens, TokensArgs};
