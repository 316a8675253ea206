//! Tests for formula evaluation: precedence, operators, literals and
//! variables.

use tabula::{ErrorCode, Scope, evaluate, scope};

fn eval(expression: &str) -> String {
    evaluate(expression, &Scope::new())
}

// =============================================================================
// Precedence and associativity
// =============================================================================

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(eval("2+3*4"), "14");
    assert_eq!(eval("(2+3)*4"), "20");
    assert_eq!(eval("2*3+4"), "10");
}

#[test]
fn exponentiation_is_right_associative() {
    assert_eq!(eval("2^3^2"), "512");
    assert_eq!(eval("(2^3)^2"), "64");
}

#[test]
fn other_tiers_are_left_associative() {
    assert_eq!(eval("10-4-3"), "3");
    assert_eq!(eval("100/10/5"), "2");
}

#[test]
fn unary_binds_tighter_than_power() {
    assert_eq!(eval("-2^2"), "4");
    assert_eq!(eval("2^-1"), "0.5");
}

#[test]
fn concatenation_sits_between_comparison_and_sum() {
    assert_eq!(eval("1+2&3"), "33");
    assert_eq!(eval("1&2=\"12\""), "TRUE");
}

#[test]
fn comparison_is_loosest() {
    assert_eq!(eval("1+1=2"), "TRUE");
    assert_eq!(eval("2*3>5"), "TRUE");
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn unary_operators() {
    assert_eq!(eval("-5+3"), "-2");
    assert_eq!(eval("--5"), "5");
    assert_eq!(eval("+-+4"), "-4");
    assert_eq!(eval("-0"), "0");
}

#[test]
fn unary_on_non_number_is_a_value_error() {
    assert_eq!(eval("-TRUE"), "#VALUE");
    assert_eq!(eval("-\"a\""), "#VALUE");
}

#[test]
fn division_by_zero() {
    assert_eq!(eval("1/0"), "#DIV/0");
    assert_eq!(eval("0/0"), "#DIV/0");
    assert_eq!(eval("1/(2-2)"), "#DIV/0");
}

#[test]
fn booleans_coerce_to_numbers() {
    assert_eq!(eval("TRUE+TRUE"), "2");
    assert_eq!(eval("FALSE*5"), "0");
}

#[test]
fn strings_coerce_to_nan() {
    assert_eq!(eval("\"a\"+1"), "NaN");
    assert_eq!(eval("\"2\"*3"), "NaN");
}

#[test]
fn powers() {
    assert_eq!(eval("2^10"), "1024");
    assert_eq!(eval("0^0"), "1");
    assert_eq!(eval("(-8)^(1/3)"), "NaN");
    assert_eq!(eval("2^0.5"), "1.4142135623730951");
}

// =============================================================================
// Number rendering
// =============================================================================

#[test]
fn floating_point_results_render_shortest() {
    assert_eq!(eval("0.1+0.2"), "0.30000000000000004");
    assert_eq!(eval("1/3"), "0.3333333333333333");
}

#[test]
fn large_and_small_numbers_use_exponent_form() {
    assert_eq!(eval("10^21"), "1e+21");
    assert_eq!(eval("10^20"), "100000000000000000000");
    assert_eq!(eval("1/10000000"), "1e-7");
    assert_eq!(eval("1/1000000"), "0.000001");
}

#[test]
fn overflow_renders_infinity() {
    assert_eq!(eval("10^400"), "Infinity");
    assert_eq!(eval("-10^400"), "Infinity");
    assert_eq!(eval("0-10^400"), "-Infinity");
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn number_literals() {
    assert_eq!(eval("42"), "42");
    assert_eq!(eval(".5+1"), "1.5");
    assert_eq!(eval("1."), "1");
    assert_eq!(eval("007"), "7");
}

#[test]
fn malformed_number_literals() {
    assert_eq!(eval("1.2.3"), "#NUM?");
    assert_eq!(eval("1e5"), "#NUM?");
    assert_eq!(eval("."), "#NUM?");
    assert_eq!(eval("2abc"), "#NUM?");
}

#[test]
fn boolean_literals_ignore_case() {
    assert_eq!(eval("true"), "TRUE");
    assert_eq!(eval("False"), "FALSE");
}

#[test]
fn string_literals() {
    assert_eq!(eval("\"hello world\""), "hello world");
    assert_eq!(eval("\"a    b\""), "a b");
    assert_eq!(eval("\"\""), "");
    assert_eq!(eval("\"1+2\""), "1+2");
    assert_eq!(eval("\"it's\""), "it's");
}

#[test]
fn single_quote_is_not_a_string_delimiter() {
    assert_eq!(eval("'a'"), "#TOKEN");
}

// =============================================================================
// Concatenation
// =============================================================================

#[test]
fn concatenation() {
    assert_eq!(eval("\"a\"&\"b\""), "ab");
    assert_eq!(eval("\"x\" & 1 & TRUE"), "x1TRUE");
    assert_eq!(eval("1/4&\"\""), "0.25");
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn numeric_comparisons() {
    assert_eq!(eval("1<2"), "TRUE");
    assert_eq!(eval("1=1"), "TRUE");
    assert_eq!(eval("1<>1"), "FALSE");
    assert_eq!(eval("1<=1"), "TRUE");
    assert_eq!(eval("2>=3"), "FALSE");
    assert_eq!(eval("3>2"), "TRUE");
}

#[test]
fn equality_requires_matching_types() {
    assert_eq!(eval("\"a\"=\"a\""), "TRUE");
    assert_eq!(eval("1=\"1\""), "FALSE");
    assert_eq!(eval("TRUE=1"), "FALSE");
    assert_eq!(eval("1<>\"1\""), "TRUE");
}

#[test]
fn nan_is_never_equal() {
    assert_eq!(eval("VALUE(\"x\")=VALUE(\"x\")"), "FALSE");
}

#[test]
fn string_ordering_is_lexical() {
    assert_eq!(eval("\"b\">\"a\""), "TRUE");
    assert_eq!(eval("\"B\"<\"a\""), "TRUE");
    assert_eq!(eval("\"10\"<\"9\""), "TRUE");
}

#[test]
fn mixed_type_ordering_is_numeric() {
    assert_eq!(eval("\"10\">9"), "TRUE");
    assert_eq!(eval("\"\"<1"), "TRUE");
    assert_eq!(eval("TRUE>0"), "TRUE");
    assert_eq!(eval("TRUE>=1"), "TRUE");
}

#[test]
fn mixed_type_ordering_with_non_numeric_text_is_false() {
    assert_eq!(eval("\"abc\"<1"), "FALSE");
    assert_eq!(eval("\"abc\">=1"), "FALSE");
}

// =============================================================================
// Variables and calls
// =============================================================================

#[test]
fn unbound_variable_is_a_name_error() {
    assert_eq!(eval("X+1"), "#NAME");
}

#[test]
fn bound_variables() {
    let vars = scope! { "x" => 3, "rate_2" => 0.5, "_label" => "n", "A1" => true };
    assert_eq!(evaluate("x * rate_2", &vars), "1.5");
    assert_eq!(evaluate("_label & x", &vars), "n3");
    assert_eq!(evaluate("IF(A1, x * 2, 0)", &vars), "6");
}

#[test]
fn variables_are_case_sensitive() {
    let vars = scope! { "x" => 1 };
    assert_eq!(evaluate("X", &vars), "#NAME");
}

#[test]
fn bound_error_values_propagate() {
    let vars = scope! { "bad" => ErrorCode::NotAvailable };
    assert_eq!(evaluate("bad", &vars), "#N/A");
    assert_eq!(evaluate("bad+1", &vars), "#N/A");
    assert_eq!(evaluate("ISERROR(bad)", &vars), "TRUE");
}

#[test]
fn nested_calls() {
    assert_eq!(eval("MAX(1, SUM(2, 3), 4)"), "5");
    assert_eq!(eval("IF(NOT(FALSE), CONCAT(\"a\", PI()>3), \"no\")"), "aTRUE");
}

// =============================================================================
// Whitespace and blank input
// =============================================================================

#[test]
fn whitespace_is_insignificant_between_tokens() {
    assert_eq!(eval("  1 +   2 "), "3");
    assert_eq!(eval("SUM( 1 ,\n 2 )"), "3");
}

#[test]
fn blank_input_yields_empty_text() {
    assert_eq!(eval(""), "");
    assert_eq!(eval("   \n\t"), "");
}

#[test]
fn adjacent_literals_are_a_token_error() {
    assert_eq!(eval("1 1"), "#TOKEN");
    assert_eq!(eval("\"a\" \"b\""), "#TOKEN");
}
