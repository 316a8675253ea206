//! Tests for the expression tokenizer.

use tabula::parser::tokenize;

// =============================================================================
// Operators and separators
// =============================================================================

#[test]
fn splits_arithmetic() {
    assert_eq!(tokenize("2+3*4"), vec!["2", "+", "3", "*", "4"]);
    assert_eq!(tokenize("8/2-1^3"), vec!["8", "/", "2", "-", "1", "^", "3"]);
}

#[test]
fn multi_char_comparisons_are_never_split() {
    assert_eq!(tokenize("a<=b"), vec!["a", "<=", "b"]);
    assert_eq!(tokenize("a<>b"), vec!["a", "<>", "b"]);
    assert_eq!(tokenize("a>=b"), vec!["a", ">=", "b"]);
}

#[test]
fn single_char_comparisons() {
    assert_eq!(tokenize("a<b"), vec!["a", "<", "b"]);
    assert_eq!(tokenize("a>b"), vec!["a", ">", "b"]);
    assert_eq!(tokenize("a=b"), vec!["a", "=", "b"]);
}

#[test]
fn separated_comparison_characters_stay_separate() {
    assert_eq!(tokenize("a< =b"), vec!["a", "<", " ", "=", "b"]);
    assert_eq!(tokenize("a=<b"), vec!["a", "=", "<", "b"]);
    assert_eq!(tokenize("a<<=b"), vec!["a", "<", "<=", "b"]);
}

#[test]
fn punctuation_and_quotes() {
    assert_eq!(
        tokenize("IF(x,'y',\"z\")"),
        vec!["IF", "(", "x", ",", "'", "y", "'", ",", "\"", "z", "\"", ")"]
    );
    assert_eq!(tokenize("a&b"), vec!["a", "&", "b"]);
}

// =============================================================================
// Whitespace
// =============================================================================

#[test]
fn whitespace_runs_collapse_to_one_space() {
    assert_eq!(
        tokenize("  1 \t\n+\r\n   2  "),
        vec!["1", " ", "+", " ", "2"]
    );
}

#[test]
fn whitespace_inside_strings_collapses_too() {
    assert_eq!(tokenize("\"a    b\""), vec!["\"", "a", " ", "b", "\""]);
}

#[test]
fn blank_input_has_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" \t\n ").is_empty());
}

// =============================================================================
// Literal runs
// =============================================================================

#[test]
fn literal_runs_keep_dots_and_letters_together() {
    assert_eq!(tokenize("A1.5_x"), vec!["A1.5_x"]);
    assert_eq!(tokenize("1.5e3"), vec!["1.5e3"]);
    assert_eq!(tokenize("$%!"), vec!["$%!"]);
}

#[test]
fn exponent_sign_splits_a_literal() {
    assert_eq!(tokenize("1e-3"), vec!["1e", "-", "3"]);
}

#[test]
fn snapshot_of_call_expression() {
    insta::assert_snapshot!(tokenize("MAX(1, x^2)").join("|"), @"MAX|(|1|,| |x|^|2|)");
}

#[test]
fn snapshot_of_mixed_expression() {
    insta::assert_snapshot!(
        tokenize("total>=10 & \"ok\"").join("|"),
        @r#"total|>=|10| |&| |"|ok|""#
    );
}
