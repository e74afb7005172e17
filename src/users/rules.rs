// User rule declarations

use super::constraints::{no_whitespace, password_match};
use super::dto::{Address, UserRequest};
use super::params;
use armature_validation::{GroupId, Result, Rule, RuleRegistry, TypeRules, ValidationRules};

const BOTH: [GroupId; 2] = [GroupId::ON_CREATE, GroupId::ON_UPDATE];

/// Build the registry holding the user, address and operation parameter
/// rules.
pub fn registry() -> Result<RuleRegistry> {
    RuleRegistry::builder()
        .register(user_rules()?)
        .register(address_rules()?)
        .register(get_params())
        .register(search_params())
        .register(update_params())
        .register(delete_params())
        .register(by_username_params())
        .build()
}

fn user_rules() -> Result<TypeRules> {
    Ok(TypeRules::of::<UserRequest>()
        .field(
            ValidationRules::for_field("id")
                .add(Rule::required().group(GroupId::ON_UPDATE).message("id is required for update"))
                .add(Rule::min(1).group(GroupId::ON_UPDATE).message("id must be >= 1")),
        )
        .field(
            ValidationRules::for_field("name")
                .add(Rule::not_blank().group(GroupId::ON_CREATE).message("name is required"))
                .add(Rule::size(Some(2), Some(50)).groups(BOTH).message("name must be 2..50 characters")),
        )
        .field(
            ValidationRules::for_field("email")
                .add(Rule::not_blank().group(GroupId::ON_CREATE).message("email is required"))
                .add(Rule::email().groups(BOTH).message("email must be valid")),
        )
        .field(
            ValidationRules::for_field("username")
                .add(Rule::not_blank().group(GroupId::ON_CREATE).message("username is required"))
                .add(no_whitespace().groups(BOTH).message("username cannot contain spaces"))
                .add(Rule::size(Some(3), Some(20)).groups(BOTH).message("username must be 3..20 characters"))
                .add(
                    Rule::try_pattern("^[A-Za-z0-9_]+$")?
                        .groups(BOTH)
                        .message("username can contain only letters, digits, underscore"),
                ),
        )
        .field(
            ValidationRules::for_field("age")
                .add(Rule::required().group(GroupId::ON_CREATE).message("age is required"))
                .add(Rule::min(18).groups(BOTH).message("age must be at least 18"))
                .add(Rule::max(120).groups(BOTH).message("age must be <= 120")),
        )
        .field(
            ValidationRules::for_field("dateOfBirth")
                .add(Rule::required().group(GroupId::ON_CREATE).message("dateOfBirth is required"))
                .add(Rule::past().groups(BOTH).message("dateOfBirth must be in the past")),
        )
        .field(
            ValidationRules::for_field("address")
                .add(Rule::required().group(GroupId::ON_CREATE).message("address is required"))
                .cascade(),
        )
        .field(
            ValidationRules::for_field("roles")
                .add(Rule::not_empty().group(GroupId::ON_CREATE).message("roles cannot be empty on create"))
                .each(Rule::not_blank().groups(BOTH).message("role cannot be blank")),
        )
        .field(
            ValidationRules::for_field("password")
                .add(Rule::not_blank().group(GroupId::ON_CREATE).message("password is required"))
                .add(
                    Rule::min_size(8)
                        .group(GroupId::ON_CREATE)
                        .message("password must be at least 8 characters"),
                ),
        )
        .field(
            ValidationRules::for_field("confirmPassword").add(
                Rule::not_blank()
                    .group(GroupId::ON_CREATE)
                    .message("confirmPassword is required"),
            ),
        )
        .constraint(password_match()))
}

fn address_rules() -> Result<TypeRules> {
    Ok(TypeRules::of::<Address>()
        .field(
            ValidationRules::for_field("line1")
                .add(Rule::not_blank().group(GroupId::ON_CREATE).message("line1 is required"))
                .add(Rule::max_size(100).groups(BOTH).message("line1 must be <= 100 chars")),
        )
        .field(
            ValidationRules::for_field("city")
                .add(Rule::not_blank().group(GroupId::ON_CREATE).message("city is required"))
                .add(Rule::max_size(50).groups(BOTH).message("city must be <= 50 chars")),
        )
        .field(
            ValidationRules::for_field("pincode").add(
                Rule::try_pattern("^[0-9]{6}$")?
                    .groups(BOTH)
                    .message("pincode must be 6 digits"),
            ),
        ))
}

fn positive_id() -> ValidationRules {
    ValidationRules::for_field("id").add(Rule::min(1))
}

fn get_params() -> TypeRules {
    TypeRules::for_type(params::GET, params::ID_ARGS).field(positive_id())
}

fn search_params() -> TypeRules {
    TypeRules::for_type(params::SEARCH, params::SEARCH_ARGS)
        .field(ValidationRules::for_field("q").add(Rule::not_blank().message("q is required")))
        .field(
            ValidationRules::for_field("limit")
                .add(Rule::min(1))
                .add(Rule::max(100)),
        )
}

fn update_params() -> TypeRules {
    TypeRules::for_type(params::UPDATE, params::ID_ARGS).field(positive_id())
}

fn delete_params() -> TypeRules {
    TypeRules::for_type(params::DELETE, params::ID_ARGS).field(positive_id())
}

fn by_username_params() -> TypeRules {
    TypeRules::for_type(params::BY_USERNAME, params::BY_USERNAME_ARGS).field(
        ValidationRules::for_field("username")
            .add(Rule::not_blank().message("username is required"))
            .add(no_whitespace().message("username cannot contain spaces")),
    )
}
