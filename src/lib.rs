// Armature Users - validation of user API requests
//
// Declares the user, address and operation parameter rules on top of
// armature-validation, scoped to the create and update validation groups.

// Re-export the validation engine
pub use armature_validation;

pub mod logging;
pub mod users;

// Prelude for common imports
pub mod prelude {
    pub use crate::users::{Address, UserError, UserRequest, UserValidation};
    pub use armature_validation::{
        Arguments, ErrorEnvelope, GroupId, RuleRegistry, Validate, ValidationContext, Validator,
        ValidatorConfig, Value, ViolationReport,
    };
}
