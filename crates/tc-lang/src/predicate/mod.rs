use orion_error::prelude::*;
use winnow::combinator::cut_err;
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::literal;

use crate::ast::{QueryOperator, QueryPredicate};
use crate::error::{LangReason, LangResult};
use crate::parse_utils::{kw, operand, ws_skip};


/// Numeric comparisons in detection order. Two-character symbols come first
/// so that `>=` is never classified as `>`.
const COMPARISON_PRIORITY: [QueryOperator; 4] = [
    QueryOperator::IsGreaterEqual,
    QueryOperator::IsLessEqual,
    QueryOperator::IsGreater,
    QueryOperator::IsLess,
];

const FIELD_STOP: &[char] = &[':', '<', '>', '=', '(', ')'];
const COMPARE_STOP: &[char] = &['<', '>', '=', '(', ')'];
const VALUE_STOP: &[char] = &[')'];

// ---------------------------------------------------------------------------
// Operator detection
// ---------------------------------------------------------------------------

/// Work out which operator a predicate fragment encodes.
///
/// `NOT (...)` is checked first, then the comparison symbols in
/// [`COMPARISON_PRIORITY`] order; anything else is `IS`. Symbols inside
/// double-quoted text are ignored.
pub fn detect_operator(fragment: &str) -> QueryOperator {
    let mut probe = fragment.trim_start();
    if negation_open(&mut probe).is_ok() {
        return QueryOperator::IsNot;
    }

    let unquoted = strip_quoted(fragment);
    let detected = COMPARISON_PRIORITY
        .into_iter()
        .find(|op| op.symbol().is_some_and(|sym| unquoted.contains(sym)))
        .unwrap_or(QueryOperator::Is);
    log::debug!("predicate {fragment:?} detected as {detected}");
    detected
}

fn negation_open(input: &mut &str) -> ModalResult<()> {
    kw("NOT").parse_next(input)?;
    ws_skip.parse_next(input)?;
    literal("(").parse_next(input)?;
    Ok(())
}

/// Replace every balanced double-quoted span with a single space. A quote
/// with no closing partner is kept as ordinary text.
fn strip_quoted(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while let Some(open) = rest.find('"') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('"') {
            Some(close) => {
                out.push(' ');
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Parse a single-predicate fragment into `{field, operator, value}`.
///
/// Accepted shapes: `"field":"value"` (quotes optional),
/// `NOT ("field":"value")` and `field<op>value` for the comparison symbols.
pub fn parse_predicate(fragment: &str) -> LangResult<QueryPredicate> {
    let operator = detect_operator(fragment);
    let parsed = match operator {
        QueryOperator::Is => is_body.parse(fragment.trim()),
        QueryOperator::IsNot => is_not_body.parse(fragment.trim()),
        op => {
            // `symbol()` is always present for comparison operators.
            let sym = op.symbol().unwrap_or_default();
            (|input: &mut &str| comparison_body(input, sym)).parse(fragment.trim())
        }
    };
    match parsed {
        Ok((field, value)) => Ok(QueryPredicate {
            field,
            operator,
            value,
        }),
        Err(e) => StructError::from(LangReason::Predicate)
            .with_detail(format!("{operator} predicate {fragment:?}: {e}"))
            .err(),
    }
}

fn is_body(input: &mut &str) -> ModalResult<(String, String)> {
    let field = operand(FIELD_STOP).parse_next(input)?;
    ws_skip.parse_next(input)?;
    cut_err(literal(":"))
        .context(StrContext::Expected(StrContextValue::Description("':'")))
        .parse_next(input)?;
    ws_skip.parse_next(input)?;
    let value = cut_err(operand(VALUE_STOP))
        .context(StrContext::Expected(StrContextValue::Description("value")))
        .parse_next(input)?;
    ws_skip.parse_next(input)?;
    Ok((field, value))
}

fn is_not_body(input: &mut &str) -> ModalResult<(String, String)> {
    negation_open.parse_next(input)?;
    ws_skip.parse_next(input)?;
    let pair = is_body.parse_next(input)?;
    cut_err(literal(")"))
        .context(StrContext::Expected(StrContextValue::Description("')'")))
        .parse_next(input)?;
    ws_skip.parse_next(input)?;
    Ok(pair)
}

fn comparison_body(input: &mut &str, sym: &'static str) -> ModalResult<(String, String)> {
    let field = operand(COMPARE_STOP).parse_next(input)?;
    ws_skip.parse_next(input)?;
    cut_err(literal(sym))
        .context(StrContext::Expected(StrContextValue::StringLiteral(sym)))
        .parse_next(input)?;
    ws_skip.parse_next(input)?;
    let value = cut_err(operand(COMPARE_STOP))
        .context(StrContext::Expected(StrContextValue::Description("value")))
        .parse_next(input)?;
    ws_skip.parse_next(input)?;
    Ok((field, value))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a predicate in the canonical fragment form read by
/// [`parse_predicate`].
///
/// Quoted operands have no escape syntax, so a field or value containing
/// `"` cannot be rendered and fails with [`LangReason::Predicate`].
pub fn render_predicate(predicate: &QueryPredicate) -> LangResult<String> {
    let QueryPredicate {
        field,
        operator,
        value,
    } = predicate;
    if let Some(part) = [field, value].into_iter().find(|s| s.contains('"')) {
        return StructError::from(LangReason::Predicate)
            .with_detail(format!("{operator} operand {part:?} contains '\"'"))
            .err();
    }
    let fragment = match operator {
        QueryOperator::Is => format!("\"{field}\":\"{value}\""),
        QueryOperator::IsNot => format!("NOT (\"{field}\":\"{value}\")"),
        op => {
            let sym = op.symbol().unwrap_or_default();
            format!("{}{sym}{}", comparison_operand(field), comparison_operand(value))
        }
    };
    Ok(fragment)
}

fn comparison_operand(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || c == ':' || COMPARE_STOP.contains(&c));
    if needs_quotes {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}
