// Violation reports

use crate::FieldPath;
use serde::Serialize;
use std::fmt;

/// Message carried by every error envelope
pub const VALIDATION_FAILED: &str = "Validation failed";

/// One failed rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Where in the object graph the rule failed
    pub path: FieldPath,

    /// Error message
    pub message: String,

    /// Constraint that failed
    pub constraint: String,

    /// Value that failed validation, when captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_value: Option<serde_json::Value>,
}

impl Violation {
    /// Create a new violation
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            constraint: "custom".to_string(),
            invalid_value: None,
        }
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.invalid_value = Some(value);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Violation {}

/// All violations found by one validation pass, in traversal order.
///
/// An empty report means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViolationReport {
    violations: Vec<Violation>,
}

impl ViolationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the input was valid
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Check if there are any violations
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get the number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Iterate over violations in traversal order
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Violations recorded at exactly `path`
    pub fn get_field_errors(&self, path: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.path.to_string() == path)
            .collect()
    }

    /// Rendered paths in traversal order, duplicates included
    pub fn paths(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.path.to_string()).collect()
    }

    /// Path to message mapping.
    ///
    /// When several violations share a path the last message wins, keeping
    /// the position where the path first appeared.
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut errors = serde_json::Map::new();
        for violation in &self.violations {
            errors.insert(
                violation.path.to_string(),
                serde_json::Value::String(violation.message.clone()),
            );
        }
        errors
    }

    /// Convert to the error envelope sent to clients
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            message: VALIDATION_FAILED.to_string(),
            errors: self.to_map(),
        }
    }

    /// Convert to a detailed JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.violations.iter().map(|v| {
                serde_json::json!({
                    "path": v.path.to_string(),
                    "message": v.message,
                    "constraint": v.constraint,
                    "value": v.invalid_value,
                })
            }).collect::<Vec<_>>()
        })
    }

    /// Consume the report into its violations
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.violations {
            writeln!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ViolationReport {}

impl From<Vec<Violation>> for ViolationReport {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl<'a> IntoIterator for &'a ViolationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Body returned to clients when validation fails
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub message: String,
    pub errors: serde_json::Map<String, serde_json::Value>,
}

impl ErrorEnvelope {
    /// HTTP status the envelope is sent with
    pub const STATUS: u16 = 400;

    /// Render the envelope as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.message,
            "errors": self.errors,
        })
    }
}
