// Built-in rule evaluation

use crate::{EvalResult, Rule, RuleKind, Temporal, Validate, ValidationContext, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use tracing::warn;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

/// Executes single rules.
///
/// Null handling follows one convention: presence is owned by `Required`,
/// `NotEmpty` and `NotBlank`. Every format or shape rule accepts null, so an
/// optional field is only checked when a value is present.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate `rule` against `value`, a field of `owner`.
    ///
    /// Type-level rules receive the owner itself as `value`.
    pub fn evaluate(
        rule: &Rule,
        value: &Value<'_>,
        owner: &dyn Validate,
        ctx: &ValidationContext,
    ) -> EvalResult {
        match rule.kind() {
            RuleKind::Required => EvalResult::from_bool(!value.is_null()),
            RuleKind::NotEmpty => not_empty(rule, value),
            RuleKind::NotBlank => not_blank(rule, value),
            RuleKind::Size { min, max } => size(rule, value, *min, *max),
            RuleKind::Range { min, max } => range(rule, value, *min, *max),
            RuleKind::Pattern { regex, .. } => pattern(rule, value, regex),
            RuleKind::Temporal(direction) => temporal(rule, value, *direction, ctx),
            RuleKind::Email => email(rule, value),
            RuleKind::CrossField { check, .. } => check(owner),
            RuleKind::Custom { predicate, .. } => EvalResult::from_bool(predicate(value)),
        }
    }
}

/// A rule declared on a value it cannot judge is skipped.
fn unsupported(rule: &Rule, value: &Value<'_>) -> EvalResult {
    warn!(
        rule = rule.name(),
        value_kind = value.kind(),
        "Rule does not apply to this value type, skipping"
    );
    EvalResult::valid()
}

fn not_empty(rule: &Rule, value: &Value<'_>) -> EvalResult {
    match value {
        Value::Null => EvalResult::invalid(),
        Value::Str(s) => EvalResult::from_bool(!s.is_empty()),
        Value::List(items) => EvalResult::from_bool(!items.is_empty()),
        other => unsupported(rule, other),
    }
}

fn not_blank(rule: &Rule, value: &Value<'_>) -> EvalResult {
    match value {
        Value::Null => EvalResult::invalid(),
        Value::Str(s) => EvalResult::from_bool(!s.trim().is_empty()),
        other => unsupported(rule, other),
    }
}

fn size(rule: &Rule, value: &Value<'_>, min: Option<usize>, max: Option<usize>) -> EvalResult {
    let len = match value {
        Value::Null => return EvalResult::valid(),
        Value::Str(s) => s.chars().count(),
        Value::List(items) => items.len(),
        other => return unsupported(rule, other),
    };
    EvalResult::from_bool(min.is_none_or(|min| len >= min) && max.is_none_or(|max| len <= max))
}

fn range(rule: &Rule, value: &Value<'_>, min: Option<i64>, max: Option<i64>) -> EvalResult {
    let ok = match value {
        Value::Null => return EvalResult::valid(),
        Value::Int(n) => min.is_none_or(|min| *n >= min) && max.is_none_or(|max| *n <= max),
        Value::Float(n) => {
            let above = min.is_none_or(|min| {
                matches!(n.partial_cmp(&(min as f64)), Some(Ordering::Greater | Ordering::Equal))
            });
            let below = max.is_none_or(|max| {
                matches!(n.partial_cmp(&(max as f64)), Some(Ordering::Less | Ordering::Equal))
            });
            above && below
        }
        other => return unsupported(rule, other),
    };
    EvalResult::from_bool(ok)
}

fn pattern(rule: &Rule, value: &Value<'_>, regex: &Regex) -> EvalResult {
    match value {
        Value::Null => EvalResult::valid(),
        Value::Str(s) => EvalResult::from_bool(regex.is_match(s)),
        other => unsupported(rule, other),
    }
}

fn temporal(
    rule: &Rule,
    value: &Value<'_>,
    direction: Temporal,
    ctx: &ValidationContext,
) -> EvalResult {
    let ordering = match value {
        Value::Null => return EvalResult::valid(),
        Value::Date(date) => date.cmp(&ctx.today()),
        Value::DateTime(instant) => instant.cmp(&ctx.now()),
        other => return unsupported(rule, other),
    };

    EvalResult::from_bool(match direction {
        Temporal::Past => ordering == Ordering::Less,
        Temporal::Future => ordering == Ordering::Greater,
        Temporal::PastOrPresent => ordering != Ordering::Greater,
        Temporal::FutureOrPresent => ordering != Ordering::Less,
    })
}

/// The empty string counts as absent for email checks.
fn email(rule: &Rule, value: &Value<'_>) -> EvalResult {
    match value {
        Value::Null => EvalResult::valid(),
        Value::Str(s) if s.is_empty() => EvalResult::valid(),
        Value::Str(s) => EvalResult::from_bool(EMAIL_REGEX.is_match(s)),
        other => unsupported(rule, other),
    }
}
