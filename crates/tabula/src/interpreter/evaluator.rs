//! Recursive-descent evaluation of formula tokens.
//!
//! Each grammar rule evaluates directly while it parses; no syntax tree is
//! built. Rules, loosest binding first:
//!
//! ```text
//! comparison := concat (cmpOp concat)*
//! concat     := sum ('&' sum)*
//! sum        := product (addOp product)*
//! product    := power (mulOp power)*
//! power      := factor ('^' power)?
//! factor     := unary | '(' comparison ')' | string | number | boolean
//!             | identifier | call
//! ```
//!
//! Rules return `Ok(Value::Error(..))` for formula errors and `Err` for
//! faults that abort the evaluation.

use std::cmp::Ordering;

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::registry::Signature;
use crate::interpreter::{ErrorRecovery, EvalContext, EvalError};
use crate::parser::operators::{
    AdditiveOp, COMMA, CONCAT, ComparisonOp, LEFT_BRACKET, MultiplicativeOp, POWER, QUOTE,
    RIGHT_BRACKET, keyword,
};
use crate::types::number::parse_decimal_literal;
use crate::types::{ErrorCode, Value};

/// A grammar rule producing one operand.
type Rule = fn(&mut EvalContext<'_>) -> Result<Value, EvalError>;

/// Evaluate a complete expression.
///
/// Any token left after the top-level rule replaces the result with
/// `#TOKEN`, even when the consumed prefix was valid on its own.
pub fn eval_expression(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    let value = eval_comparison(ctx)?;
    if ctx.is_at_end() {
        Ok(value)
    } else {
        Ok(Value::Error(ErrorCode::Token))
    }
}

/// Evaluate the loosest rule. Brackets and call arguments re-enter here.
pub fn eval_comparison(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    ctx.nested(|ctx| fold_chain(ctx, eval_concat, ComparisonOp::from_token, compare))
}

fn eval_concat(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    fold_chain(ctx, eval_sum, concat_op, |(), lhs, rhs| {
        Value::String(format!("{lhs}{rhs}"))
    })
}

fn eval_sum(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    fold_chain(ctx, eval_product, AdditiveOp::from_token, |op, lhs, rhs| {
        let (a, b) = (lhs.as_number(), rhs.as_number());
        Value::Number(match op {
            AdditiveOp::Plus => a + b,
            AdditiveOp::Minus => a - b,
        })
    })
}

fn eval_product(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    fold_chain(ctx, eval_power, MultiplicativeOp::from_token, |op, lhs, rhs| {
        let (a, b) = (lhs.as_number(), rhs.as_number());
        match op {
            MultiplicativeOp::Times => Value::Number(a * b),
            MultiplicativeOp::Divide if b == 0.0 => Value::Error(ErrorCode::DivZero),
            MultiplicativeOp::Divide => Value::Number(a / b),
        }
    })
}

/// `factor ('^' power)?`, right-associative through recursion.
fn eval_power(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    let base = eval_factor(ctx)?;
    if ctx.current() != POWER {
        return Ok(base);
    }
    if base.is_error() && ctx.recovery() == ErrorRecovery::Strand {
        return Ok(base);
    }

    ctx.consume(POWER)?;
    let exponent = ctx.nested(eval_power)?;
    if base.is_error() {
        return Ok(base);
    }
    if exponent.is_error() {
        return Ok(exponent);
    }
    Ok(Value::Number(pow(base.as_number(), exponent.as_number())))
}

/// Evaluate a left-associative chain `operand (op operand)*`.
///
/// The first error operand, or the first error produced by `apply`, decides
/// the chain's value.
fn fold_chain<Op>(
    ctx: &mut EvalContext<'_>,
    operand: Rule,
    operator: fn(&str) -> Option<Op>,
    apply: fn(Op, Value, Value) -> Value,
) -> Result<Value, EvalError> {
    let mut lhs = operand(ctx)?;
    if lhs.is_error() {
        return finish_chain(ctx, lhs, operand, operator);
    }

    while let Some(op) = operator(ctx.current()) {
        ctx.take_current()?;
        let rhs = operand(ctx)?;
        if rhs.is_error() {
            return finish_chain(ctx, rhs, operand, operator);
        }
        lhs = apply(op, lhs, rhs);
        if lhs.is_error() {
            return finish_chain(ctx, lhs, operand, operator);
        }
    }
    Ok(lhs)
}

/// Return `error` as the value of a chain, consuming the chain's remaining
/// operands first when recovering.
fn finish_chain<Op>(
    ctx: &mut EvalContext<'_>,
    error: Value,
    operand: Rule,
    operator: fn(&str) -> Option<Op>,
) -> Result<Value, EvalError> {
    if ctx.recovery() == ErrorRecovery::Surface {
        while operator(ctx.current()).is_some() {
            ctx.take_current()?;
            operand(ctx)?;
        }
    }
    Ok(error)
}

fn concat_op(token: &str) -> Option<()> {
    (token == CONCAT).then_some(())
}

fn compare(op: ComparisonOp, lhs: Value, rhs: Value) -> Value {
    let ordering = || lhs.relational_cmp(&rhs);
    Value::Boolean(match op {
        // Equality needs matching types as well as payloads.
        ComparisonOp::Eq => lhs == rhs,
        ComparisonOp::Ne => lhs != rhs,
        ComparisonOp::Lt => ordering() == Some(Ordering::Less),
        ComparisonOp::Le => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
        ComparisonOp::Gt => ordering() == Some(Ordering::Greater),
        ComparisonOp::Ge => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
    })
}

/// Exponentiation with NaN for a NaN exponent and for `(±1)^(±∞)`.
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

/// What kind of factor the current token starts.
enum FactorKind {
    Unary,
    Bracket,
    String,
    Number,
    Boolean,
    Identifier,
    Unknown,
}

impl FactorKind {
    fn classify(token: &str) -> Self {
        if AdditiveOp::from_token(token).is_some() {
            FactorKind::Unary
        } else if token == LEFT_BRACKET {
            FactorKind::Bracket
        } else if token == QUOTE {
            FactorKind::String
        } else if token.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            FactorKind::Number
        } else if keyword(token).is_some() {
            FactorKind::Boolean
        } else if token.contains(|c: char| c.is_ascii_alphabetic() || c == '_') {
            FactorKind::Identifier
        } else {
            FactorKind::Unknown
        }
    }
}

fn eval_factor(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    match FactorKind::classify(ctx.current()) {
        FactorKind::Unary => eval_unary(ctx),
        FactorKind::Bracket => eval_bracket(ctx),
        FactorKind::String => eval_string(ctx),
        FactorKind::Number => eval_number(ctx),
        FactorKind::Boolean => eval_boolean(ctx),
        FactorKind::Identifier => eval_identifier(ctx),
        FactorKind::Unknown => Ok(Value::Error(ErrorCode::Token)),
    }
}

/// Unary `+` or `-`; chains such as `--5` recurse.
fn eval_unary(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    let Some(op) = AdditiveOp::from_token(ctx.current()) else {
        return Ok(Value::Error(ErrorCode::Token));
    };
    ctx.take_current()?;

    let operand = ctx.nested(eval_factor)?;
    Ok(match (op, operand) {
        (_, error @ Value::Error(_)) => error,
        (AdditiveOp::Plus, Value::Number(n)) => Value::Number(n),
        (AdditiveOp::Minus, Value::Number(n)) => Value::Number(-n),
        (_, Value::String(_) | Value::Boolean(_)) => Value::Error(ErrorCode::Value),
    })
}

fn eval_bracket(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    ctx.consume(LEFT_BRACKET)?;
    let value = eval_comparison(ctx)?;
    ctx.consume(RIGHT_BRACKET)?;
    Ok(value)
}

/// String literal: every token up to the closing quote, verbatim.
fn eval_string(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    ctx.consume_raw(QUOTE)?;
    let mut text = String::new();
    while !ctx.is_at_end() && ctx.current() != QUOTE {
        let token = ctx.current().to_string();
        ctx.consume_raw(&token)?;
        text.push_str(&token);
    }
    ctx.consume(QUOTE)?;
    Ok(Value::String(text))
}

fn eval_number(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    let token = ctx.take_current()?;
    Ok(parse_decimal_literal(&token).map_or(Value::Error(ErrorCode::Num), Value::Number))
}

fn eval_boolean(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    let token = ctx.take_current()?;
    Ok(keyword(&token).map_or(Value::Error(ErrorCode::Value), Value::Boolean))
}

/// A variable reference, or a function call when followed by `(`.
fn eval_identifier(ctx: &mut EvalContext<'_>) -> Result<Value, EvalError> {
    let name = ctx.take_current()?;
    if ctx.current() != LEFT_BRACKET {
        return Ok(ctx.lookup(&name).unwrap_or(Value::Error(ErrorCode::Name)));
    }

    let registry = ctx.registry();
    let Some(signature) = registry.get(&name) else {
        tracing::debug!(
            name = %name,
            suggestions = ?compute_suggestions(&name, &registry.names()),
            "unknown function"
        );
        if ctx.recovery() == ErrorRecovery::Surface {
            skip_argument_list(ctx)?;
        }
        return Ok(Value::Error(ErrorCode::Name));
    };
    eval_call(ctx, signature)
}

/// Match call arguments against `signature` and run its body.
fn eval_call(ctx: &mut EvalContext<'_>, signature: &Signature) -> Result<Value, EvalError> {
    ctx.consume(LEFT_BRACKET)?;

    let mut args = Vec::new();
    if ctx.current() != RIGHT_BRACKET {
        loop {
            if !args.is_empty() {
                ctx.consume(COMMA)?;
            }
            let arg = eval_comparison(ctx)?;
            if arg.is_error() {
                let parameter =
                    signature
                        .parameter_at(args.len())
                        .ok_or_else(|| EvalError::MissingParameter {
                            function: signature.name().to_string(),
                            index: args.len(),
                        })?;
                if !parameter.expected.admits_errors() {
                    if ctx.recovery() == ErrorRecovery::Surface {
                        skip_remaining_arguments(ctx)?;
                    }
                    return Ok(arg);
                }
            }
            args.push(arg);
            if ctx.current() != COMMA {
                break;
            }
        }
    }
    ctx.consume(RIGHT_BRACKET)?;

    if args.len() < signature.arity() {
        return Ok(Value::Error(ErrorCode::Value));
    }
    signature.call(args)
}

/// Parse and discard a whole argument list, brackets included.
fn skip_argument_list(ctx: &mut EvalContext<'_>) -> Result<(), EvalError> {
    ctx.consume(LEFT_BRACKET)?;
    if ctx.current() == RIGHT_BRACKET {
        return ctx.consume(RIGHT_BRACKET);
    }
    eval_comparison(ctx)?;
    skip_remaining_arguments(ctx)
}

/// Parse and discard the arguments after the current one, then the closing
/// bracket.
fn skip_remaining_arguments(ctx: &mut EvalContext<'_>) -> Result<(), EvalError> {
    while ctx.current() == COMMA {
        ctx.consume(COMMA)?;
        eval_comparison(ctx)?;
    }
    ctx.consume(RIGHT_BRACKET)
}
