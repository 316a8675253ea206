//! Implementation of the `tabula eval` command.

use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tabula::{ErrorCode, Value};

use super::options::EvalOptions;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Formula to evaluate
    pub expression: String,

    #[command(flatten)]
    pub options: EvalOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with a data error status when the result is an error code
    #[arg(long)]
    pub fail_on_error: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult<'a> {
    pub expression: &'a str,
    pub result: String,
    pub value: &'a Value,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs, verbose: bool) -> miette::Result<i32> {
    let scope = args.options.load_scope()?;
    let interpreter = args.options.interpreter(verbose);

    // Faults are logged by the interpreter in verbose runs.
    let value = interpreter
        .evaluate_value(&args.expression, &scope)
        .unwrap_or(Value::Error(ErrorCode::Value));

    if args.json {
        let output = EvalResult {
            expression: &args.expression,
            result: value.to_string(),
            value: &value,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else if value.is_error() {
        println!("{}", value.if_supports_color(Stream::Stdout, |v| v.red()));
    } else {
        println!("{value}");
    }

    if args.fail_on_error && value.is_error() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
