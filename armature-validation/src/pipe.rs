// Validation pipe for request bodies

use crate::{ErrorEnvelope, GroupId, Validate, Validator, ViolationReport};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors produced by [`ValidationPipe::parse`]
#[derive(Debug, Clone, Error)]
pub enum PipeError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("{}", .0.message)]
    Validation(ErrorEnvelope),
}

impl PipeError {
    /// Status code an HTTP layer should answer with
    pub fn status(&self) -> u16 {
        ErrorEnvelope::STATUS
    }

    /// JSON body an HTTP layer should answer with
    pub fn body(&self) -> serde_json::Value {
        match self {
            PipeError::InvalidJson(reason) => serde_json::json!({ "message": reason }),
            PipeError::Validation(envelope) => envelope.to_json(),
        }
    }
}

/// Validation pipe that parses and validates request bodies
pub struct ValidationPipe;

impl ValidationPipe {
    /// Parse a JSON body and validate it under `groups`
    pub fn parse<T>(body: &[u8], validator: &Validator, groups: &[GroupId]) -> Result<T, PipeError>
    where
        T: DeserializeOwned + Validate,
    {
        let parsed: T =
            serde_json::from_slice(body).map_err(|e| PipeError::InvalidJson(e.to_string()))?;

        let report = validator.validate(&parsed, groups);
        if !report.is_valid() {
            debug!(
                type_name = parsed.type_name(),
                violations = report.len(),
                "Request body rejected"
            );
            return Err(PipeError::Validation(report.to_envelope()));
        }

        Ok(parsed)
    }

    /// Translate a report into the JSON error body
    pub fn error_body(report: &ViolationReport) -> serde_json::Value {
        report.to_envelope().to_json()
    }
}
