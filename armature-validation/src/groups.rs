// Validation groups

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Identity token for a validation group.
///
/// Groups carry no behavior. Two groups are the same group exactly when their
/// names are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(Cow<'static, str>);

impl GroupId {
    /// Implicit group of rules declared without any group
    pub const DEFAULT: GroupId = GroupId(Cow::Borrowed("Default"));

    /// Group used when a resource is created
    pub const ON_CREATE: GroupId = GroupId(Cow::Borrowed("OnCreate"));

    /// Group used when a resource is updated
    pub const ON_UPDATE: GroupId = GroupId(Cow::Borrowed("OnUpdate"));

    /// Create a group token
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Get the group name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the reserved default group
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// Group names must be non-empty and free of whitespace.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && !self.0.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for GroupId {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

/// Set of groups that are active for one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGroups(BTreeSet<GroupId>);

impl ActiveGroups {
    /// Check whether a rule declared with `rule_groups` runs under this set.
    ///
    /// A rule with no groups belongs to the default group only.
    pub fn matches(&self, rule_groups: &BTreeSet<GroupId>) -> bool {
        if rule_groups.is_empty() {
            return self.0.contains(&GroupId::DEFAULT);
        }
        rule_groups.iter().any(|group| self.0.contains(group))
    }

    /// Check whether a group is active
    pub fn contains(&self, group: &GroupId) -> bool {
        self.0.contains(group)
    }

    /// Iterate over the active groups in name order
    pub fn iter(&self) -> impl Iterator<Item = &GroupId> {
        self.0.iter()
    }
}

impl fmt::Display for ActiveGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(GroupId::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Resolve the requested groups into the active set.
///
/// An empty request activates the default group. A non-empty request is taken
/// as-is; the default group is not added implicitly.
pub fn effective_groups(requested: &[GroupId]) -> ActiveGroups {
    if requested.is_empty() {
        ActiveGroups(BTreeSet::from([GroupId::DEFAULT]))
    } else {
        ActiveGroups(requested.iter().cloned().collect())
    }
}
