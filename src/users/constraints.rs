// Custom user constraints

use armature_validation::{EvalResult, GroupId, Rule, Validate, Value};

/// Rejects strings containing any whitespace character.
///
/// Null passes; presence is checked by a separate `not_blank` rule.
pub fn no_whitespace() -> Rule {
    Rule::custom("NoWhitespace", |value| match value {
        Value::Str(s) => !s.chars().any(char::is_whitespace),
        _ => true,
    })
    .message("must not contain whitespace")
}

/// `password` and `confirmPassword` must be equal.
///
/// Checked on create only. A missing password on either side passes, since
/// the required checks report it. A mismatch is reported at
/// `confirmPassword`.
pub fn password_match() -> Rule {
    Rule::cross_field(
        "PasswordMatch",
        &["password", "confirmPassword"],
        check_passwords,
    )
    .group(GroupId::ON_CREATE)
    .message("password and confirmPassword must match")
}

fn check_passwords(user: &dyn Validate) -> EvalResult {
    let (Some(password), Some(confirm)) = (
        user.field("password").as_str(),
        user.field("confirmPassword").as_str(),
    ) else {
        return EvalResult::valid();
    };

    if password == confirm {
        EvalResult::valid()
    } else {
        EvalResult::invalid()
            .with_message("confirmPassword must match password")
            .at("confirmPassword")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserRequest;
    use armature_validation::{Evaluator, ValidationContext};

    fn run(rule: &Rule, value: Value<'_>, owner: &dyn Validate) -> EvalResult {
        Evaluator::evaluate(rule, &value, owner, &ValidationContext::new())
    }

    #[test]
    fn test_no_whitespace() {
        let rule = no_whitespace();
        let user = UserRequest::default();

        assert!(run(&rule, Value::Str("abc_1"), &user).valid);
        assert!(run(&rule, Value::Null, &user).valid);
        assert!(!run(&rule, Value::Str("ab c"), &user).valid);
        assert!(!run(&rule, Value::Str("tab\there"), &user).valid);
        assert!(!run(&rule, Value::Str("line\nbreak"), &user).valid);
    }

    #[test]
    fn test_password_match() {
        let rule = password_match();
        assert!(rule.declared_groups().contains(&GroupId::ON_CREATE));

        let mut user = UserRequest {
            password: Some("secret123".to_string()),
            confirm_password: Some("secret123".to_string()),
            ..Default::default()
        };
        assert!(run(&rule, Value::Null, &user).valid);

        user.confirm_password = Some("secret124".to_string());
        let result = run(&rule, Value::Null, &user);
        assert!(!result.valid);
        assert_eq!(result.message.as_deref(), Some("confirmPassword must match password"));
        assert_eq!(result.path.map(|p| p.to_string()).as_deref(), Some("confirmPassword"));

        user.password = None;
        assert!(run(&rule, Value::Null, &user).valid);
    }
}
