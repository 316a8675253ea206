//! Operator, keyword and punctuation tables.
//!
//! Binary operators are grouped into precedence tiers, from loosest to
//! tightest: comparison, concatenation, additive, multiplicative, power.
//! Unary `+`/`-` binds tighter than every binary operator.

/// Left bracket opening a group or an argument list.
pub const LEFT_BRACKET: &str = "(";
/// Right bracket closing a group or an argument list.
pub const RIGHT_BRACKET: &str = ")";
/// Separator between call arguments.
pub const COMMA: &str = ",";
/// Delimiter of string literals.
pub const QUOTE: &str = "\"";
/// The single whitespace token left by the tokenizer.
pub const SPACE: &str = " ";
/// String concatenation.
pub const CONCAT: &str = "&";
/// Exponentiation (right-associative).
pub const POWER: &str = "^";

/// Keyword literal for `TRUE`, matched case-insensitively.
pub const KEYWORD_TRUE: &str = "true";
/// Keyword literal for `FALSE`, matched case-insensitively.
pub const KEYWORD_FALSE: &str = "false";

/// Multi-character operators, which the tokenizer tries before any
/// single-character separator.
pub const MULTI_CHAR_OPERATORS: [&str; 3] = ["<=", "<>", ">="];

/// Characters that always end a literal run and form tokens of their own.
pub const SEPARATOR_CHARS: [char; 15] = [
    '<', '>', '=', '(', ')', ',', '"', '\'', '+', '-', '*', '/', '&', '^', ' ',
];

/// Whether `c` splits literal runs.
pub fn is_separator(c: char) -> bool {
    SEPARATOR_CHARS.contains(&c)
}

/// Parse a boolean keyword, ignoring case.
pub fn keyword(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case(KEYWORD_TRUE) {
        Some(true)
    } else if token.eq_ignore_ascii_case(KEYWORD_FALSE) {
        Some(false)
    } else {
        None
    }
}

/// Comparison operators (loosest tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(ComparisonOp::Eq),
            "<>" => Some(ComparisonOp::Ne),
            "<" => Some(ComparisonOp::Lt),
            "<=" => Some(ComparisonOp::Le),
            ">" => Some(ComparisonOp::Gt),
            ">=" => Some(ComparisonOp::Ge),
            _ => None,
        }
    }
}

/// Additive operators, also used as unary sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveOp {
    Plus,
    Minus,
}

impl AdditiveOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(AdditiveOp::Plus),
            "-" => Some(AdditiveOp::Minus),
            _ => None,
        }
    }
}

/// Multiplicative operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicativeOp {
    Times,
    Divide,
}

impl MultiplicativeOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "*" => Some(MultiplicativeOp::Times),
            "/" => Some(MultiplicativeOp::Divide),
            _ => None,
        }
    }
}
