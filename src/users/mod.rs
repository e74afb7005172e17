//! User request validation
//!
//! Create requests are checked under [`GroupId::ON_CREATE`], updates under
//! [`GroupId::ON_UPDATE`]. Path and query parameters of the user operations
//! are checked as [`Arguments`](armature_validation::Arguments), with
//! violations reported as `operation.param`.

mod constraints;
mod dto;
mod error;
pub mod params;
mod rules;

pub use constraints::{no_whitespace, password_match};
pub use dto::{Address, UserRequest};
pub use error::{UserError, ensure_valid};
pub use rules::registry;

use armature_validation::{
    ConfigurationError, GroupId, ValidationPipe, Validator, ValidatorConfig, ViolationReport,
};
use tracing::debug;

/// Validates the inputs of every user operation
#[derive(Debug, Clone)]
pub struct UserValidation {
    validator: Validator,
}

impl UserValidation {
    /// Create with the default validator configuration
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create with an explicit validator configuration
    pub fn with_config(config: ValidatorConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            validator: Validator::with_config(registry()?, config),
        })
    }

    /// Underlying validator
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validate a user under explicit groups
    pub fn check(&self, user: &UserRequest, groups: &[GroupId]) -> ViolationReport {
        self.validator.validate(user, groups)
    }

    /// Parse and validate a create request body
    pub fn create(&self, body: &[u8]) -> Result<UserRequest, UserError> {
        let user = ValidationPipe::parse(body, &self.validator, &[GroupId::ON_CREATE])?;
        debug!("Create request accepted");
        Ok(user)
    }

    /// Parse and validate an update request body, then validate the id.
    ///
    /// Body violations are reported first; the id is checked only once the
    /// body is accepted.
    pub fn update(&self, id: i64, body: &[u8]) -> Result<UserRequest, UserError> {
        let user = ValidationPipe::parse(body, &self.validator, &[GroupId::ON_UPDATE])?;
        ensure_valid(self.validator.validate_arguments(&params::update(id), &[]))?;
        debug!(id, "Update request accepted");
        Ok(user)
    }

    /// Validate the id of a lookup
    pub fn get(&self, id: i64) -> Result<(), UserError> {
        ensure_valid(self.validator.validate_arguments(&params::get(id), &[]))
    }

    /// Validate search parameters and return the effective limit
    pub fn search(&self, q: &str, limit: Option<i64>) -> Result<i64, UserError> {
        ensure_valid(
            self.validator
                .validate_arguments(&params::search(q, limit), &[]),
        )?;
        Ok(limit.unwrap_or(params::DEFAULT_LIMIT))
    }

    /// Validate the id of a deletion
    pub fn delete(&self, id: i64) -> Result<(), UserError> {
        ensure_valid(self.validator.validate_arguments(&params::delete(id), &[]))
    }

    /// Validate a username lookup
    pub fn by_username(&self, username: &str) -> Result<(), UserError> {
        ensure_valid(
            self.validator
                .validate_arguments(&params::by_username(username), &[]),
        )
    }
}
