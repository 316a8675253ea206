//! Options shared by the commands that evaluate formulas.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use tabula::types::number::parse_number_strict;
use tabula::{ErrorCode, ErrorRecovery, Interpreter, Scope, Value};

use crate::output::ScopeDiagnostic;

/// Variable bindings and interpreter settings.
#[derive(Debug, clap::Args)]
pub struct EvalOptions {
    /// Variables in name=value format (repeatable)
    #[arg(short = 'v', long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// JSON object file with variable bindings
    #[arg(long, env = "TABULA_SCOPE")]
    pub scope: Option<PathBuf>,

    /// Leave tokens after a short-circuit unconsumed, reporting #TOKEN
    #[arg(long)]
    pub strand_errors: bool,

    /// Maximum nesting depth of a formula
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl EvalOptions {
    /// Build the scope: the scope file first, then `--var` bindings on top.
    pub fn load_scope(&self) -> miette::Result<Scope> {
        let mut scope = match &self.scope {
            Some(path) => read_scope_file(path)?,
            None => Scope::new(),
        };
        for (name, text) in &self.vars {
            scope.insert(name.clone(), parse_value(text));
        }
        tracing::debug!(bindings = scope.len(), "scope loaded");
        Ok(scope)
    }

    /// Build an interpreter. Verbose runs evaluate in debug mode.
    pub fn interpreter(&self, verbose: bool) -> Interpreter {
        let recovery = if self.strand_errors {
            ErrorRecovery::Strand
        } else {
            ErrorRecovery::Surface
        };
        Interpreter::builder()
            .debug(verbose)
            .recovery(recovery)
            .maybe_max_depth(self.max_depth)
            .build()
    }
}

/// Parse a name=value binding.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable '{s}': expected name=value"))?;
    if name.is_empty() {
        return Err(format!("invalid variable '{s}': name is empty"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Interpret command-line text as a value.
///
/// `true` and `false` in any case are booleans, numeric text is a number,
/// `#CODE` is an error value and anything else is a string.
pub fn parse_value(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if text.starts_with('#') {
        if let Ok(code) = text.parse::<ErrorCode>() {
            return Value::Error(code);
        }
    }
    if !text.trim().is_empty() {
        let n = parse_number_strict(text);
        if !n.is_nan() {
            return Value::Number(n);
        }
    }
    Value::String(text.to_string())
}

fn read_scope_file(path: &Path) -> miette::Result<Scope> {
    let content = read_to_string(path)
        .map_err(|e| miette::miette!("Cannot read scope file {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| ScopeDiagnostic::from_json_error(path, &content, &e).into())
}
