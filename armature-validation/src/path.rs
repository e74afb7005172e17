// Field paths

use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Named field of an object
    Field(String),
    /// Position inside a sequence
    Index(usize),
}

/// Address of a value inside an object graph.
///
/// Rendered with dots between fields and brackets around indices, for example
/// `address.city` or `roles[1]`. The empty path addresses the root object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The path of the root object
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-field path
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(name.into())],
        }
    }

    /// Parse a rendered path such as `address.city` or `roles[1].name`.
    ///
    /// Returns `None` for malformed input (empty field names, unclosed or
    /// non-numeric brackets).
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = Vec::new();
        if path.is_empty() {
            return Some(Self { segments });
        }

        for part in path.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            if name.is_empty() {
                return None;
            }
            segments.push(Segment::Field(name.to_string()));

            while !rest.is_empty() {
                let close = rest.find(']')?;
                if !rest.starts_with('[') {
                    return None;
                }
                let index = rest[1..close].parse::<usize>().ok()?;
                segments.push(Segment::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Some(Self { segments })
    }

    /// Extend the path with a field name
    pub fn join(&self, name: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.segments.push(Segment::Field(name.into()));
        child
    }

    /// Extend the path with a sequence index
    pub fn index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.segments.push(Segment::Index(index));
        child
    }

    /// Append a path expressed relative to this one
    pub fn append(&self, relative: &FieldPath) -> Self {
        let mut child = self.clone();
        child.segments.extend(relative.segments.iter().cloned());
        child
    }

    /// Check whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path segments from the root down
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    /// Treats the whole string as one field name. Use [`FieldPath::parse`] for
    /// dotted paths.
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_and_indexed() {
        let path = FieldPath::field("address").join("city");
        assert_eq!(path.to_string(), "address.city");

        let path = FieldPath::field("roles").index(1);
        assert_eq!(path.to_string(), "roles[1]");

        let path = FieldPath::field("contacts").index(0).join("email");
        assert_eq!(path.to_string(), "contacts[0].email");
    }

    #[test]
    fn test_root_renders_empty() {
        assert_eq!(FieldPath::root().to_string(), "");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn test_parse() {
        let path = FieldPath::parse("contacts[2].emails[0]").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Field("contacts".to_string()),
                Segment::Index(2),
                Segment::Field("emails".to_string()),
                Segment::Index(0),
            ]
        );
        assert_eq!(path.to_string(), "contacts[2].emails[0]");
        assert_eq!(FieldPath::parse("").unwrap(), FieldPath::root());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(FieldPath::parse("a..b").is_none());
        assert!(FieldPath::parse("roles[x]").is_none());
        assert!(FieldPath::parse("roles[1").is_none());
        assert!(FieldPath::parse("[0]").is_none());
        assert!(FieldPath::parse("roles[1]x").is_none());
    }

    #[test]
    fn test_append_relative() {
        let parent = FieldPath::field("owner");
        let relative = FieldPath::field("confirmPassword");
        assert_eq!(parent.append(&relative).to_string(), "owner.confirmPassword");
        assert_eq!(FieldPath::root().append(&relative).to_string(), "confirmPassword");
    }

    #[test]
    fn test_serializes_as_string() {
        let path = FieldPath::field("roles").index(3);
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"roles[3]\"");
    }
}
