//! Implementation of the `tabula batch` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{miette, IntoDiagnostic};
use serde::Serialize;
use tabula::{ErrorCode, Interpreter, Scope, Value};

use super::options::EvalOptions;
use crate::output::table::{format_batch_table, BatchRow};

/// Prefix of comment lines in batch files.
const COMMENT: &str = "//";

/// Arguments for the batch command.
#[derive(Debug, clap::Args)]
pub struct BatchArgs {
    /// File with one formula per line; blank lines and `//` comments are skipped
    pub file: PathBuf,

    #[command(flatten)]
    pub options: EvalOptions,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with a data error status if any result is an error code
    #[arg(long)]
    pub fail_on_error: bool,
}

/// JSON output for one batch line.
#[derive(Debug, Serialize)]
struct BatchJson<'a> {
    line: usize,
    expression: &'a str,
    result: String,
    value: &'a Value,
}

/// Run the batch command.
pub fn run_batch(args: BatchArgs, verbose: bool) -> miette::Result<i32> {
    let content = read_to_string(&args.file)
        .map_err(|e| miette!("Cannot read batch file {}: {}", args.file.display(), e))?;
    let scope = args.options.load_scope()?;
    let interpreter = args.options.interpreter(verbose);

    let rows = evaluate_lines(&interpreter, &content, &scope);
    tracing::debug!(
        file = %args.file.display(),
        formulas = rows.len(),
        "batch evaluated"
    );

    if args.json {
        let json_data: Vec<BatchJson<'_>> = rows
            .iter()
            .map(|row| BatchJson {
                line: row.line,
                expression: &row.expression,
                result: row.value.to_string(),
                value: &row.value,
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json_data).into_diagnostic()?
        );
    } else {
        println!("{}", format_batch_table(&rows));
    }

    if args.fail_on_error && rows.iter().any(|row| row.value.is_error()) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Evaluate every formula line of `content`.
fn evaluate_lines(interpreter: &Interpreter, content: &str, scope: &Scope) -> Vec<BatchRow> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let expression = line.trim();
            if expression.is_empty() || expression.starts_with(COMMENT) {
                return None;
            }
            let value = interpreter
                .evaluate_value(expression, scope)
                .unwrap_or(Value::Error(ErrorCode::Value));
            Some(BatchRow {
                line: index + 1,
                expression: expression.to_string(),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tabula::scope;
    use tempfile::NamedTempFile;

    use super::*;

    fn batch_args(file: &NamedTempFile, fail_on_error: bool) -> BatchArgs {
        BatchArgs {
            file: file.path().to_path_buf(),
            options: EvalOptions {
                vars: vec![("rate".to_string(), "0.5".to_string())],
                scope: None,
                strand_errors: false,
                max_depth: None,
            },
            json: true,
            fail_on_error,
        }
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let content = "// totals\n1+1\n\n   \n  // indented comment\nx*2\n";
        let rows = evaluate_lines(&Interpreter::new(), content, &scope! { "x" => 4 });

        let lines: Vec<usize> = rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 6]);
        assert_eq!(rows[0].value, Value::Number(2.0));
        assert_eq!(rows[1].expression, "x*2");
        assert_eq!(rows[1].value, Value::Number(8.0));
    }

    #[test]
    fn faults_become_value_errors() {
        let rows = evaluate_lines(&Interpreter::new(), "(1\n1/0", &Scope::new());
        assert_eq!(rows[0].value, Value::Error(ErrorCode::Value));
        assert_eq!(rows[1].value, Value::Error(ErrorCode::DivZero));
    }

    #[test]
    fn lines_are_independent() {
        let rows = evaluate_lines(&Interpreter::new(), "1 1\n2+2", &Scope::new());
        assert_eq!(rows[0].value, Value::Error(ErrorCode::Token));
        assert_eq!(rows[1].value, Value::Number(4.0));
    }

    #[test]
    fn fail_on_error_sets_the_exit_code() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "10*rate\n1/0").unwrap();
        assert_eq!(run_batch(batch_args(&file, true), false).unwrap(), exitcode::DATAERR);
        assert_eq!(run_batch(batch_args(&file, false), false).unwrap(), exitcode::OK);
    }

    #[test]
    fn missing_file_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        let mut args = batch_args(&file, false);
        args.file = file.path().with_extension("missing");
        assert!(run_batch(args, false).is_err());
    }
}
