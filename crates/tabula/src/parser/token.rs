//! Expression tokenizer using winnow.
//!
//! Splits an expression into operator, punctuation, quote, space and
//! literal-run tokens. Whitespace runs collapse to one space first, so a
//! space token always stands for "some whitespace here".

use winnow::combinator::{alt, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, take_till};

use super::operators::{MULTI_CHAR_OPERATORS, SEPARATOR_CHARS, SPACE, is_separator};

/// Split an expression into tokens.
///
/// # Example
///
/// ```
/// use tabula::parser::tokenize;
///
/// assert_eq!(tokenize("A1 <= 10"), vec!["A1", " ", "<=", " ", "10"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    let mut remaining = normalized.as_str();
    // Every character starts some alternative, so the scan cannot stall.
    let tokens: Vec<&str> = repeat(0.., token)
        .parse_next(&mut remaining)
        .unwrap_or_default();
    tokens.into_iter().map(str::to_string).collect()
}

/// Trim the text and collapse each whitespace run into a single space.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(SPACE)
}

fn token<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((multi_char_operator, separator, literal_run)).parse_next(input)
}

/// `<=`, `<>` and `>=`, which must win over their one-character prefixes.
fn multi_char_operator<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt(MULTI_CHAR_OPERATORS).parse_next(input)
}

fn separator<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    one_of(SEPARATOR_CHARS).take().parse_next(input)
}

fn literal_run<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., is_separator).parse_next(input)
}
