// User request errors

use armature_validation::{ErrorEnvelope, PipeError, ViolationReport};
use thiserror::Error;

/// Errors answered to user API clients
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{}", .0.message)]
    Validation(ErrorEnvelope),
}

impl UserError {
    /// HTTP status code of the error
    pub fn status(&self) -> u16 {
        match self {
            UserError::NotFound(_) => 404,
            UserError::InvalidBody(_) => 400,
            UserError::Validation(_) => ErrorEnvelope::STATUS,
        }
    }

    /// JSON body of the error response
    pub fn body(&self) -> serde_json::Value {
        match self {
            UserError::Validation(envelope) => envelope.to_json(),
            other => serde_json::json!({ "message": other.to_string() }),
        }
    }
}

impl From<PipeError> for UserError {
    fn from(err: PipeError) -> Self {
        match err {
            PipeError::InvalidJson(reason) => UserError::InvalidBody(reason),
            PipeError::Validation(envelope) => UserError::Validation(envelope),
        }
    }
}

impl From<ViolationReport> for UserError {
    fn from(report: ViolationReport) -> Self {
        UserError::Validation(report.to_envelope())
    }
}

/// Turn a report into a result, failing when it holds any violation
pub fn ensure_valid(report: ViolationReport) -> Result<(), UserError> {
    if report.is_valid() {
        Ok(())
    } else {
        Err(report.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(UserError::NotFound(7).status(), 404);
        assert_eq!(UserError::InvalidBody("eof".to_string()).status(), 400);
        assert_eq!(
            UserError::from(ViolationReport::new()).status(),
            400
        );
    }

    #[test]
    fn test_not_found_body() {
        assert_eq!(
            UserError::NotFound(7).body(),
            serde_json::json!({ "message": "User not found: 7" })
        );
    }

    #[test]
    fn test_ensure_valid() {
        assert!(ensure_valid(ViolationReport::new()).is_ok());
    }
}
