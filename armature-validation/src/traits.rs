// Validation traits

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// An object that can be walked by the validator.
///
/// Implementations expose their fields by name; the rules that apply to each
/// field live in the [`RuleRegistry`](crate::RuleRegistry) under
/// [`type_name`](Validate::type_name).
pub trait Validate {
    /// Name under which this type's rules are registered
    fn type_name(&self) -> &'static str;

    /// Current value of a field. Unknown names yield [`Value::Null`].
    fn field(&self, name: &str) -> Value<'_>;
}

/// Static shape of a validated type.
///
/// The registry uses it to reject declarations that name a field the type
/// does not have. `TYPE_NAME` must match [`Validate::type_name`].
pub trait Schema {
    /// Name under which rules for the type are registered
    const TYPE_NAME: &'static str;

    /// Every field name [`Validate::field`] answers for
    const FIELDS: &'static [&'static str];
}

/// Borrowed view of a field value inside an object graph
#[derive(Clone)]
pub enum Value<'a> {
    /// Absent value
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    /// Sequence of values in iteration order
    List(Vec<Value<'a>>),
    /// Nested object
    Object(&'a dyn Validate),
}

impl<'a> Value<'a> {
    /// Check whether the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// View the value as a string
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(*s),
            _ => None,
        }
    }

    /// View the value as a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// View the value as a nested object
    pub fn as_object(&self) -> Option<&'a dyn Validate> {
        match self {
            Value::Object(obj) => Some(*obj),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Render the value as JSON for violation reports.
    ///
    /// Objects are rendered as their type name.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Value::from(*n),
            Value::Str(s) => serde_json::Value::String((*s).to_string()),
            Value::Date(d) => serde_json::Value::String(d.to_string()),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(obj) => serde_json::Value::String(obj.type_name().to_string()),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(obj) => write!(f, "Object({})", obj.type_name()),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Str(value)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value<'_> {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<NaiveDate> for Value<'_> {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl<'a> From<&'a i64> for Value<'a> {
    fn from(value: &'a i64) -> Self {
        Value::Int(*value)
    }
}

impl<'a> From<&'a i32> for Value<'a> {
    fn from(value: &'a i32) -> Self {
        Value::Int(i64::from(*value))
    }
}

impl<'a> From<&'a f64> for Value<'a> {
    fn from(value: &'a f64) -> Self {
        Value::Float(*value)
    }
}

impl<'a> From<&'a bool> for Value<'a> {
    fn from(value: &'a bool) -> Self {
        Value::Bool(*value)
    }
}

impl<'a> From<&'a NaiveDate> for Value<'a> {
    fn from(value: &'a NaiveDate) -> Self {
        Value::Date(*value)
    }
}

impl<'a> From<&'a DateTime<Utc>> for Value<'a> {
    fn from(value: &'a DateTime<Utc>) -> Self {
        Value::DateTime(*value)
    }
}

// One impl per element type. A generic impl bounded on `Into<Value>` recurses
// in the trait solver.
macro_rules! impl_list_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a Vec<$ty>> for Value<'a> {
                fn from(value: &'a Vec<$ty>) -> Self {
                    Value::List(value.iter().map(|item: &'a $ty| Value::from(item)).collect())
                }
            }
        )*
    };
}

macro_rules! impl_option_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a Option<$ty>> for Value<'a> {
                fn from(value: &'a Option<$ty>) -> Self {
                    match value {
                        Some(inner) => Value::from(inner),
                        None => Value::Null,
                    }
                }
            }
        )*
    };
}

impl_list_from!(String, i64, i32, f64, bool, NaiveDate, DateTime<Utc>);

impl_option_from!(
    String,
    i64,
    i32,
    f64,
    bool,
    NaiveDate,
    DateTime<Utc>,
    Vec<String>,
    Vec<i64>,
    Vec<i32>,
);

/// Per-pass evaluation context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    now: DateTime<Utc>,
}

impl ValidationContext {
    /// Context for a pass starting now
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Context with a fixed clock
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Instant temporal rules compare against
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Date temporal rules compare against
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i64,
    }

    impl Validate for Point {
        fn type_name(&self) -> &'static str {
            "Point"
        }

        fn field(&self, name: &str) -> Value<'_> {
            match name {
                "x" => Value::Int(self.x),
                _ => Value::Null,
            }
        }
    }

    #[test]
    fn test_option_conversion() {
        let some = Some("abc".to_string());
        let none: Option<String> = None;
        assert_eq!(Value::from(&some).as_str(), Some("abc"));
        assert!(Value::from(&none).is_null());
    }

    #[test]
    fn test_vec_conversion_keeps_order() {
        let roles = vec!["admin".to_string(), "user".to_string()];
        match Value::from(&roles) {
            Value::List(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].as_str(), Some("user"));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_list_conversion() {
        let roles = Some(vec!["admin".to_string(), " ".to_string()]);
        match Value::from(&roles) {
            Value::List(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].as_str(), Some("admin"));
                assert_eq!(items[1].as_str(), Some(" "));
            }
            other => panic!("expected list, got {:?}", other),
        }

        let missing: Option<Vec<String>> = None;
        assert!(Value::from(&missing).is_null());

        let age: Option<i32> = Some(30);
        assert_eq!(Value::from(&age).as_f64(), Some(30.0));
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::from(42i32).as_f64(), Some(42.0));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Str("1").as_f64(), None);
    }

    #[test]
    fn test_object_to_json_uses_type_name() {
        let point = Point { x: 3 };
        assert_eq!(point.field("x").as_f64(), Some(3.0));
        assert!(point.field("y").is_null());
        assert_eq!(Value::Object(&point).to_json(), serde_json::json!("Point"));
    }
}
