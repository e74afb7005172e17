//! Group-scoped declarative validation for Armature
//!
//! Rules are declared once per type in a [`RuleRegistry`] and applied to
//! object graphs by a [`Validator`]. Every rule may be scoped to validation
//! groups, so the same type can be checked differently on create and on
//! update. Nested objects, sequence elements and cross-field constraints are
//! supported, and all violations of a pass are collected into a
//! [`ViolationReport`].
//!
//! # Examples
//!
//! ## Declaring Rules
//!
//! ```
//! use armature_validation::{GroupId, Rule, RuleRegistry, TypeRules, ValidationRules};
//!
//! let registry = RuleRegistry::builder()
//!     .register(
//!         TypeRules::for_type("Address", &["line1", "city", "pincode"])
//!             .field(
//!                 ValidationRules::for_field("city")
//!                     .add(Rule::not_blank().group(GroupId::ON_CREATE).message("city is required"))
//!                     .add(Rule::max_size(50).message("city must be <= 50 chars")),
//!             )
//!             .field(
//!                 ValidationRules::for_field("pincode")
//!                     .add(Rule::try_pattern("[0-9]{6}").unwrap().message("pincode must be 6 digits")),
//!             ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.field_rules("Address", "city").len(), 2);
//! ```
//!
//! ## Validating an Object
//!
//! ```
//! use armature_validation::*;
//!
//! struct Address {
//!     city: Option<String>,
//! }
//!
//! impl Schema for Address {
//!     const TYPE_NAME: &'static str = "Address";
//!     const FIELDS: &'static [&'static str] = &["city"];
//! }
//!
//! impl Validate for Address {
//!     fn type_name(&self) -> &'static str {
//!         Self::TYPE_NAME
//!     }
//!
//!     fn field(&self, name: &str) -> Value<'_> {
//!         match name {
//!             "city" => Value::from(&self.city),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let registry = RuleRegistry::builder()
//!     .register(TypeRules::of::<Address>().field(
//!         ValidationRules::for_field("city")
//!             .add(Rule::not_blank().group(GroupId::ON_CREATE).message("city is required")),
//!     ))
//!     .build()
//!     .unwrap();
//! let validator = Validator::new(registry);
//!
//! let address = Address { city: None };
//! let report = validator.validate(&address, &[GroupId::ON_CREATE]);
//! assert_eq!(
//!     report.to_envelope().to_json(),
//!     serde_json::json!({
//!         "message": "Validation failed",
//!         "errors": { "city": "city is required" }
//!     })
//! );
//!
//! // OnUpdate does not activate the OnCreate rule.
//! assert!(validator.validate(&address, &[GroupId::ON_UPDATE]).is_valid());
//! ```
//!
//! ## Custom and Cross-Field Rules
//!
//! ```
//! use armature_validation::{EvalResult, Rule, Validate, Value};
//!
//! let no_whitespace = Rule::custom("NoWhitespace", |value| match value {
//!     Value::Str(s) => !s.chars().any(char::is_whitespace),
//!     _ => true,
//! });
//! assert_eq!(no_whitespace.name(), "NoWhitespace");
//!
//! let matching = Rule::cross_field("PasswordMatch", &["password", "confirmPassword"], |owner| {
//!     let same = owner.field("password").as_str() == owner.field("confirmPassword").as_str();
//!     EvalResult::from_bool(same).at("confirmPassword")
//! });
//! assert!(matching.is_type_level());
//! ```

mod config;
mod errors;
mod groups;
mod path;
mod pipe;
mod registry;
mod report;
mod rules;
mod traits;
mod validators;
mod walker;

pub use config::*;
pub use errors::*;
pub use groups::*;
pub use path::*;
pub use pipe::*;
pub use registry::*;
pub use report::*;
pub use rules::*;
pub use traits::*;
pub use validators::*;
pub use walker::*;
