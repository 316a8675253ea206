//! Implementation of the `tabula tokens` command.

use miette::IntoDiagnostic;
use tabula::parser::tokenize;

use crate::output::table::format_token_table;

/// Arguments for the tokens command.
#[derive(Debug, clap::Args)]
pub struct TokensArgs {
    /// Formula to tokenize
    pub expression: String,

    /// Output as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Run the tokens command.
pub fn run_tokens(args: TokensArgs) -> miette::Result<i32> {
    let tokens = tokenize(&args.expression);
    if args.json {
        println!("{}", serde_json::to_string(&tokens).into_diagnostic()?);
    } else if tokens.is_empty() {
        println!("(no tokens)");
    } else {
        println!("{}", format_token_table(&tokens));
    }
    Ok(exitcode::OK)
}
