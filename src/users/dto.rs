// User request payloads

use armature_validation::{Schema, Validate, Value};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of the create and update user requests.
///
/// Every field is optional on the wire; which ones are required depends on
/// the validation group the request is checked under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub age: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    pub roles: Option<Vec<String>>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl Schema for UserRequest {
    const TYPE_NAME: &'static str = "UserRequest";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "username",
        "age",
        "dateOfBirth",
        "address",
        "roles",
        "password",
        "confirmPassword",
    ];
}

impl Validate for UserRequest {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn field(&self, name: &str) -> Value<'_> {
        match name {
            "id" => Value::from(&self.id),
            "name" => Value::from(&self.name),
            "email" => Value::from(&self.email),
            "username" => Value::from(&self.username),
            "age" => Value::from(&self.age),
            "dateOfBirth" => Value::from(&self.date_of_birth),
            "address" => match &self.address {
                Some(address) => Value::Object(address),
                None => Value::Null,
            },
            "roles" => Value::from(&self.roles),
            "password" => Value::from(&self.password),
            "confirmPassword" => Value::from(&self.confirm_password),
            _ => Value::Null,
        }
    }
}

/// Postal address nested in a [`UserRequest`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
}

impl Schema for Address {
    const TYPE_NAME: &'static str = "Address";
    const FIELDS: &'static [&'static str] = &["line1", "city", "pincode"];
}

impl Validate for Address {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn field(&self, name: &str) -> Value<'_> {
        match name {
            "line1" => Value::from(&self.line1),
            "city" => Value::from(&self.city),
            "pincode" => Value::from(&self.pincode),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let user: UserRequest = serde_json::from_str(
            r#"{
                "name": "Alice",
                "dateOfBirth": "1990-04-01",
                "confirmPassword": "secret123",
                "address": {"line1": "1 Main St", "pincode": "560001"}
            }"#,
        )
        .unwrap();

        assert_eq!(user.date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 1));
        assert_eq!(user.confirm_password.as_deref(), Some("secret123"));
        assert_eq!(user.field("confirmPassword").as_str(), Some("secret123"));
        assert!(user.field("email").is_null());
    }

    #[test]
    fn test_address_exposed_as_object() {
        let user = UserRequest {
            address: Some(Address::default()),
            ..Default::default()
        };
        let address = user.field("address").as_object().map(|a| a.type_name());
        assert_eq!(address, Some(Address::TYPE_NAME));
    }

    #[test]
    fn test_roles_exposed_as_list() {
        let user = UserRequest {
            roles: Some(vec!["admin".to_string(), "".to_string()]),
            ..Default::default()
        };
        match user.field("roles") {
            Value::List(items) => assert_eq!(items[1].as_str(), Some("")),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_fields_are_exposed() {
        let user = UserRequest {
            id: Some(1),
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            username: Some("alice".to_string()),
            age: Some(30),
            date_of_birth: NaiveDate::from_ymd_opt(1994, 3, 1),
            address: Some(Address {
                line1: Some("1 Main St".to_string()),
                city: Some("Pune".to_string()),
                pincode: Some("411001".to_string()),
            }),
            roles: Some(vec!["user".to_string()]),
            password: Some("secret123".to_string()),
            confirm_password: Some("secret123".to_string()),
        };

        for name in UserRequest::FIELDS {
            assert!(!user.field(name).is_null(), "{} is not exposed", name);
        }
        if let Some(address) = &user.address {
            for name in Address::FIELDS {
                assert!(!address.field(name).is_null(), "address.{} is not exposed", name);
            }
        }
    }
}
