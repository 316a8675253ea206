//! Number text conversion.
//!
//! Numbers print the way spreadsheet hosts expect them: integral values have
//! no fraction, very large and very small magnitudes switch to exponent form,
//! and non-finite values print as `NaN`, `Infinity` and `-Infinity`.

use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::one_of;

/// Smallest magnitude printed without an exponent.
const PLAIN_MIN: f64 = 1e-6;
/// Magnitudes at or above this print with an exponent.
const PLAIN_MAX: f64 = 1e21;

/// Format a number as canonical text.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Also covers negative zero.
        return "0".to_string();
    }
    if (PLAIN_MIN..PLAIN_MAX).contains(&n.abs()) {
        return format!("{n}");
    }

    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Parse a numeric literal token: `digits [. digits]` or `. digits`.
///
/// Returns `None` for anything else, including signs and exponents, which
/// the tokenizer never leaves inside a literal run.
pub fn parse_decimal_literal(token: &str) -> Option<f64> {
    mantissa
        .take()
        .parse(token)
        .ok()
        .and_then(|text: &str| text.parse().ok())
}

/// Parse the longest numeric prefix of `text`, skipping leading whitespace.
///
/// `"12abc"` is 12, `" 3.5"` is 3.5, `"-Infinity"` is negative infinity and
/// text without a numeric prefix is NaN.
pub fn parse_float_prefix(text: &str) -> f64 {
    let mut input = text.trim_start();
    float_text
        .parse_next(&mut input)
        .ok()
        .and_then(|matched| matched.parse().ok())
        .unwrap_or(f64::NAN)
}

/// Parse the whole of `text` as a number, ignoring surrounding whitespace.
///
/// Blank text is 0; anything that is not entirely numeric is NaN.
pub fn parse_number_strict(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    float_text
        .parse(trimmed)
        .ok()
        .and_then(|matched| matched.parse().ok())
        .unwrap_or(f64::NAN)
}

fn float_text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        (opt(sign), "Infinity").take(),
        (opt(sign), mantissa, opt(exponent)).take(),
    ))
    .parse_next(input)
}

fn sign(input: &mut &str) -> ModalResult<char> {
    one_of(['+', '-']).parse_next(input)
}

fn mantissa(input: &mut &str) -> ModalResult<()> {
    alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())).parse_next(input)
}

fn exponent(input: &mut &str) -> ModalResult<()> {
    (one_of(['e', 'E']), opt(sign), digit1)
        .void()
        .parse_next(input)
}
