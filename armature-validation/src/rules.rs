// Rule declarations

use crate::{ConfigurationError, FieldPath, GroupId, Validate, Value};
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Predicate of a custom rule, applied to a single value
pub type PredicateFn = Arc<dyn Fn(&Value<'_>) -> bool + Send + Sync>;

/// Predicate of a cross-field rule, applied to the owning object
pub type CrossFieldFn = Arc<dyn Fn(&dyn Validate) -> EvalResult + Send + Sync>;

/// Direction of a temporal constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Past,
    Future,
    PastOrPresent,
    FutureOrPresent,
}

impl Temporal {
    fn name(&self) -> &'static str {
        match self {
            Temporal::Past => "Past",
            Temporal::Future => "Future",
            Temporal::PastOrPresent => "PastOrPresent",
            Temporal::FutureOrPresent => "FutureOrPresent",
        }
    }
}

/// What a rule checks
#[derive(Clone)]
pub enum RuleKind {
    /// Value must be present
    Required,
    /// Value must be present and non-empty (string or sequence)
    NotEmpty,
    /// Value must be a string with at least one non-whitespace character
    NotBlank,
    /// Length of a string (characters) or sequence (elements) within bounds
    Size { min: Option<usize>, max: Option<usize> },
    /// Numeric value within inclusive bounds
    Range { min: Option<i64>, max: Option<i64> },
    /// Whole string matches the expression
    Pattern { source: String, regex: Regex },
    /// Date or instant relative to the validation clock
    Temporal(Temporal),
    /// Well-formed email address
    Email,
    /// Predicate over the owning object
    CrossField {
        name: Cow<'static, str>,
        fields: Vec<String>,
        check: CrossFieldFn,
    },
    /// Named predicate over the value
    Custom {
        name: Cow<'static, str>,
        predicate: PredicateFn,
    },
}

impl RuleKind {
    /// Constraint name reported on violations
    pub fn name(&self) -> &str {
        match self {
            RuleKind::Required => "Required",
            RuleKind::NotEmpty => "NotEmpty",
            RuleKind::NotBlank => "NotBlank",
            RuleKind::Size { .. } => "Size",
            RuleKind::Range { .. } => "Range",
            RuleKind::Pattern { .. } => "Pattern",
            RuleKind::Temporal(t) => t.name(),
            RuleKind::Email => "Email",
            RuleKind::CrossField { name, .. } => name.as_ref(),
            RuleKind::Custom { name, .. } => name.as_ref(),
        }
    }

    fn default_message(&self) -> String {
        match self {
            RuleKind::Required => "must not be null".to_string(),
            RuleKind::NotEmpty => "must not be empty".to_string(),
            RuleKind::NotBlank => "must not be blank".to_string(),
            RuleKind::Size { min, max } => format!(
                "size must be between {} and {}",
                min.unwrap_or(0),
                max.map_or_else(|| "unbounded".to_string(), |m| m.to_string())
            ),
            RuleKind::Range { min: Some(min), max: None } => {
                format!("must be greater than or equal to {}", min)
            }
            RuleKind::Range { min: None, max: Some(max) } => {
                format!("must be less than or equal to {}", max)
            }
            RuleKind::Range { min, max } => format!(
                "must be between {} and {}",
                min.unwrap_or(i64::MIN),
                max.unwrap_or(i64::MAX)
            ),
            RuleKind::Pattern { source, .. } => format!("must match \"{}\"", source),
            RuleKind::Temporal(Temporal::Past) => "must be a past date".to_string(),
            RuleKind::Temporal(Temporal::Future) => "must be a future date".to_string(),
            RuleKind::Temporal(Temporal::PastOrPresent) => {
                "must be a date in the past or in the present".to_string()
            }
            RuleKind::Temporal(Temporal::FutureOrPresent) => {
                "must be a date in the present or in the future".to_string()
            }
            RuleKind::Email => "must be a well-formed email address".to_string(),
            RuleKind::CrossField { name, .. } | RuleKind::Custom { name, .. } => {
                format!("{} constraint failed", name)
            }
        }
    }
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Size { min, max } => write!(f, "Size({:?}, {:?})", min, max),
            RuleKind::Range { min, max } => write!(f, "Range({:?}, {:?})", min, max),
            RuleKind::Pattern { source, .. } => write!(f, "Pattern({})", source),
            RuleKind::CrossField { name, fields, .. } => {
                write!(f, "CrossField({}, {:?})", name, fields)
            }
            RuleKind::Custom { name, .. } => write!(f, "Custom({})", name),
            other => f.write_str(other.name()),
        }
    }
}

/// A single declarative constraint.
///
/// Rules are built once when the registry is assembled and never change
/// afterwards.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    groups: BTreeSet<GroupId>,
    message: String,
}

impl Rule {
    /// Create a rule of the given kind with its default message
    pub fn new(kind: RuleKind) -> Self {
        let message = kind.default_message();
        Self {
            kind,
            groups: BTreeSet::new(),
            message,
        }
    }

    /// Value must not be null
    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    /// Value must not be null or empty
    pub fn not_empty() -> Self {
        Self::new(RuleKind::NotEmpty)
    }

    /// Value must contain a non-whitespace character
    pub fn not_blank() -> Self {
        Self::new(RuleKind::NotBlank)
    }

    /// Length within `min..=max`
    pub fn size(min: Option<usize>, max: Option<usize>) -> Self {
        Self::new(RuleKind::Size { min, max })
    }

    /// Length of at least `min`
    pub fn min_size(min: usize) -> Self {
        Self::size(Some(min), None)
    }

    /// Length of at most `max`
    pub fn max_size(max: usize) -> Self {
        Self::size(None, Some(max))
    }

    /// Number within `min..=max`
    pub fn range(min: Option<i64>, max: Option<i64>) -> Self {
        Self::new(RuleKind::Range { min, max })
    }

    /// Number of at least `min`
    pub fn min(min: i64) -> Self {
        Self::range(Some(min), None)
    }

    /// Number of at most `max`
    pub fn max(max: i64) -> Self {
        Self::range(None, Some(max))
    }

    /// Whole-string match against `pattern`.
    ///
    /// The expression is anchored at both ends, so `[0-9]{6}` only accepts
    /// strings of exactly six digits.
    pub fn try_pattern(pattern: &str) -> Result<Self, ConfigurationError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            ConfigurationError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::new(RuleKind::Pattern {
            source: pattern.to_string(),
            regex,
        }))
    }

    /// Date or instant strictly before now
    pub fn past() -> Self {
        Self::new(RuleKind::Temporal(Temporal::Past))
    }

    /// Date or instant strictly after now
    pub fn future() -> Self {
        Self::new(RuleKind::Temporal(Temporal::Future))
    }

    /// Date or instant not after now
    pub fn past_or_present() -> Self {
        Self::new(RuleKind::Temporal(Temporal::PastOrPresent))
    }

    /// Date or instant not before now
    pub fn future_or_present() -> Self {
        Self::new(RuleKind::Temporal(Temporal::FutureOrPresent))
    }

    /// Well-formed email address
    pub fn email() -> Self {
        Self::new(RuleKind::Email)
    }

    /// Named predicate over a single value.
    ///
    /// The predicate also receives null values. Custom predicates should
    /// accept null and leave presence checks to a [`Rule::required`] or
    /// [`Rule::not_blank`] rule on the same field.
    pub fn custom<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Value<'_>) -> bool + Send + Sync + 'static,
    {
        Self::new(RuleKind::Custom {
            name: name.into(),
            predicate: Arc::new(predicate),
        })
    }

    /// Predicate over the whole owning object, declared at type level.
    ///
    /// `fields` names the fields the predicate reads; the registry checks that
    /// they are declared on the owning type.
    pub fn cross_field<F>(
        name: impl Into<Cow<'static, str>>,
        fields: &[&str],
        check: F,
    ) -> Self
    where
        F: Fn(&dyn Validate) -> EvalResult + Send + Sync + 'static,
    {
        Self::new(RuleKind::CrossField {
            name: name.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            check: Arc::new(check),
        })
    }

    /// Add the rule to a group
    pub fn group(mut self, group: GroupId) -> Self {
        self.groups.insert(group);
        self
    }

    /// Add the rule to several groups
    pub fn groups<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = GroupId>,
    {
        self.groups.extend(groups);
        self
    }

    /// Replace the violation message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// What the rule checks
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Groups the rule is declared in. Empty means the default group only.
    pub fn declared_groups(&self) -> &BTreeSet<GroupId> {
        &self.groups
    }

    /// Violation message
    pub fn violation_message(&self) -> &str {
        &self.message
    }

    /// Constraint name
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Parameters of the constraint, for error payloads
    pub fn params(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut params = serde_json::Map::new();
        match &self.kind {
            RuleKind::Size { min, max } => {
                if let Some(min) = min {
                    params.insert("min".to_string(), (*min).into());
                }
                if let Some(max) = max {
                    params.insert("max".to_string(), (*max).into());
                }
            }
            RuleKind::Range { min, max } => {
                if let Some(min) = min {
                    params.insert("min".to_string(), (*min).into());
                }
                if let Some(max) = max {
                    params.insert("max".to_string(), (*max).into());
                }
            }
            RuleKind::Pattern { source, .. } => {
                params.insert("regexp".to_string(), source.as_str().into());
            }
            RuleKind::CrossField { fields, .. } => {
                params.insert("fields".to_string(), fields.clone().into());
            }
            _ => {}
        }
        params
    }

    /// Check whether the rule may only be declared at type level
    pub fn is_type_level(&self) -> bool {
        matches!(self.kind, RuleKind::CrossField { .. })
    }
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalResult {
    /// Whether the value satisfied the rule
    pub valid: bool,
    /// Message replacing the rule's message
    pub message: Option<String>,
    /// Path, relative to the owning object, replacing the default path
    pub path: Option<FieldPath>,
}

impl EvalResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
            path: None,
        }
    }

    /// A failing result reported with the rule's own message and path
    pub fn invalid() -> Self {
        Self {
            valid: false,
            message: None,
            path: None,
        }
    }

    /// Passing when `ok`, failing otherwise
    pub fn from_bool(ok: bool) -> Self {
        if ok { Self::valid() } else { Self::invalid() }
    }

    /// Report the violation under a different message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Report the violation at a sub-path of the owning object
    pub fn at(mut self, path: impl Into<FieldPath>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messages() {
        assert_eq!(Rule::required().violation_message(), "must not be null");
        assert_eq!(Rule::min(18).violation_message(), "must be greater than or equal to 18");
        assert_eq!(Rule::max(120).violation_message(), "must be less than or equal to 120");
        assert_eq!(Rule::size(Some(2), Some(50)).violation_message(), "size must be between 2 and 50");
        assert_eq!(Rule::past().violation_message(), "must be a past date");
    }

    #[test]
    fn test_message_override_and_groups() {
        let rule = Rule::not_blank()
            .group(GroupId::ON_CREATE)
            .message("name is required");

        assert_eq!(rule.violation_message(), "name is required");
        assert!(rule.declared_groups().contains(&GroupId::ON_CREATE));
        assert_eq!(rule.name(), "NotBlank");
    }

    #[test]
    fn test_ungrouped_rule_has_no_groups() {
        assert!(Rule::email().declared_groups().is_empty());
    }

    #[test]
    fn test_try_pattern_rejects_bad_regex() {
        assert!(Rule::try_pattern("^[0-9]{6}$").is_ok());
        let err = Rule::try_pattern("([a-z").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }

    #[test]
    fn test_params() {
        let params = Rule::size(Some(3), Some(20)).params();
        assert_eq!(params.get("min"), Some(&serde_json::json!(3)));
        assert_eq!(params.get("max"), Some(&serde_json::json!(20)));
        assert!(Rule::email().params().is_empty());
    }

    #[test]
    fn test_cross_field_is_type_level() {
        let rule = Rule::cross_field("Match", &["a", "b"], |_| EvalResult::valid());
        assert!(rule.is_type_level());
        assert!(!Rule::custom("Nop", |_| true).is_type_level());
    }

    #[test]
    fn test_eval_result_builders() {
        let result = EvalResult::invalid()
            .with_message("confirmPassword must match password")
            .at("confirmPassword");
        assert!(!result.valid);
        assert_eq!(result.path.unwrap().to_string(), "confirmPassword");
        assert!(EvalResult::from_bool(true).valid);
    }
}
