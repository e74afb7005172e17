// Error types

use thiserror::Error;

/// Problems with rule declarations or validator settings.
///
/// These are detected while the registry is built or the configuration is
/// loaded, before any input is validated, and are not recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Type {0} is registered more than once")]
    DuplicateType(String),

    #[error("Field {field} is declared more than once on {type_name}")]
    DuplicateField { type_name: String, field: String },

    #[error("Rule declared without a target: {0}")]
    MissingTarget(String),

    #[error("Malformed group {group:?} on {target}")]
    MalformedGroup { target: String, group: String },

    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid bounds for {rule} on {target}: min {min} exceeds max {max}")]
    InvalidBounds {
        target: String,
        rule: String,
        min: String,
        max: String,
    },

    #[error("{rule} on {target} must be declared at type level")]
    MisplacedRule { target: String, rule: String },

    #[error("{target} references unknown field {field}")]
    UnknownField { target: String, field: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for configuration and registry building
pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigurationError::DuplicateField {
            type_name: "UserRequest".to_string(),
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "Field name is declared more than once on UserRequest");

        let err = ConfigurationError::UnknownField {
            target: "PasswordMatch on UserRequest".to_string(),
            field: "secret".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "PasswordMatch on UserRequest references unknown field secret"
        );
    }
}
