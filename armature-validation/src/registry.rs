// Rule registry

use crate::{ConfigurationError, Result, Rule, RuleKind, Schema};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// Rules declared on one field
#[derive(Debug, Clone)]
pub struct ValidationRules {
    field: String,
    rules: Vec<Rule>,
    element_rules: Vec<Rule>,
    cascade: bool,
}

impl ValidationRules {
    /// Create new validation rules for a field
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
            element_rules: Vec::new(),
            cascade: false,
        }
    }

    /// Add a rule checked against the field value itself
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add a rule checked against every element of a sequence field
    pub fn each(mut self, rule: Rule) -> Self {
        self.element_rules.push(rule);
        self
    }

    /// Validate nested objects held by this field
    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }

    /// Field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Rules on the field value, in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules on each element, in declaration order
    pub fn element_rules(&self) -> &[Rule] {
        &self.element_rules
    }

    /// Whether nested objects are validated
    pub fn cascades(&self) -> bool {
        self.cascade
    }
}

/// Rules declared on one type: its fields plus type-level constraints.
///
/// A declaration knows every field the type has, so rules on a misspelled
/// field are rejected when the registry is built.
#[derive(Debug, Clone)]
pub struct TypeRules {
    type_name: String,
    known_fields: Vec<&'static str>,
    fields: Vec<ValidationRules>,
    constraints: Vec<Rule>,
}

impl TypeRules {
    /// Start declaring rules for a type described by [`Schema`]
    pub fn of<T: Schema>() -> Self {
        Self::for_type(T::TYPE_NAME, T::FIELDS)
    }

    /// Start declaring rules for a named type with the given fields.
    ///
    /// Used for shapes without a Rust type of their own, such as the
    /// arguments of an operation.
    pub fn for_type(type_name: impl Into<String>, known_fields: &[&'static str]) -> Self {
        Self {
            type_name: type_name.into(),
            known_fields: known_fields.to_vec(),
            fields: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Declare a field
    pub fn field(mut self, rules: ValidationRules) -> Self {
        self.fields.push(rules);
        self
    }

    /// Add a type-level rule, evaluated against the whole object
    pub fn constraint(mut self, rule: Rule) -> Self {
        self.constraints.push(rule);
        self
    }

    /// Type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> &[ValidationRules] {
        &self.fields
    }

    /// Type-level rules in declaration order
    pub fn constraints(&self) -> &[Rule] {
        &self.constraints
    }

    /// Every field the type has, declared or not
    pub fn known_fields(&self) -> &[&'static str] {
        &self.known_fields
    }

    /// Look up a declared field
    pub fn get_field(&self, field: &str) -> Option<&ValidationRules> {
        self.fields.iter().find(|f| f.field == field)
    }

    fn check(&self) -> Result<()> {
        if self.type_name.trim().is_empty() {
            return Err(ConfigurationError::MissingTarget(
                "type with an empty name".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            let target = format!("{}.{}", self.type_name, field.field);
            if field.field.trim().is_empty() {
                return Err(ConfigurationError::MissingTarget(format!(
                    "field with an empty name on {}",
                    self.type_name
                )));
            }
            if !self.knows(&field.field) {
                return Err(ConfigurationError::UnknownField {
                    target: self.type_name.clone(),
                    field: field.field.clone(),
                });
            }
            if !seen.insert(field.field.as_str()) {
                return Err(ConfigurationError::DuplicateField {
                    type_name: self.type_name.clone(),
                    field: field.field.clone(),
                });
            }
            for rule in field.rules.iter().chain(&field.element_rules) {
                if rule.is_type_level() {
                    return Err(ConfigurationError::MisplacedRule {
                        target: target.clone(),
                        rule: rule.name().to_string(),
                    });
                }
                check_rule(rule, &target)?;
            }
        }

        for rule in &self.constraints {
            check_rule(rule, &self.type_name)?;
            if let RuleKind::CrossField { fields, .. } = rule.kind() {
                if let Some(unknown) = fields.iter().find(|f| !self.knows(f)) {
                    return Err(ConfigurationError::UnknownField {
                        target: format!("{} on {}", rule.name(), self.type_name),
                        field: unknown.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn knows(&self, field: &str) -> bool {
        self.known_fields.iter().any(|known| *known == field)
    }

    fn rule_count(&self) -> usize {
        self.constraints.len()
            + self
                .fields
                .iter()
                .map(|f| f.rules.len() + f.element_rules.len())
                .sum::<usize>()
    }
}

fn check_rule(rule: &Rule, target: &str) -> Result<()> {
    if let Some(group) = rule.declared_groups().iter().find(|g| !g.is_well_formed()) {
        return Err(ConfigurationError::MalformedGroup {
            target: target.to_string(),
            group: group.as_str().to_string(),
        });
    }

    match rule.kind() {
        RuleKind::Size {
            min: Some(min),
            max: Some(max),
        } if min > max => Err(ConfigurationError::InvalidBounds {
            target: target.to_string(),
            rule: rule.name().to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }),
        RuleKind::Range {
            min: Some(min),
            max: Some(max),
        } if min > max => Err(ConfigurationError::InvalidBounds {
            target: target.to_string(),
            rule: rule.name().to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }),
        RuleKind::CrossField { name, .. } | RuleKind::Custom { name, .. }
            if name.trim().is_empty() =>
        {
            Err(ConfigurationError::MissingTarget(format!(
                "unnamed custom rule on {}",
                target
            )))
        }
        _ => Ok(()),
    }
}

/// Static association of rules to types and fields.
///
/// Built once by [`RuleRegistryBuilder`] and read-only afterwards, so a
/// single registry can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    types: HashMap<String, Arc<TypeRules>>,
}

impl RuleRegistry {
    /// Start building a registry
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::new()
    }

    /// Declarations of a type
    pub fn rules_for(&self, type_name: &str) -> Option<&TypeRules> {
        self.types.get(type_name).map(Arc::as_ref)
    }

    /// Rules on a field value
    pub fn field_rules(&self, type_name: &str, field: &str) -> &[Rule] {
        self.rules_for(type_name)
            .and_then(|t| t.get_field(field))
            .map(ValidationRules::rules)
            .unwrap_or(&[])
    }

    /// Rules on each element of a sequence field
    pub fn element_rules(&self, type_name: &str, field: &str) -> &[Rule] {
        self.rules_for(type_name)
            .and_then(|t| t.get_field(field))
            .map(ValidationRules::element_rules)
            .unwrap_or(&[])
    }

    /// Type-level rules
    pub fn type_rules(&self, type_name: &str) -> &[Rule] {
        self.rules_for(type_name)
            .map(TypeRules::constraints)
            .unwrap_or(&[])
    }

    /// Check whether a type has declarations
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Collects type declarations and checks them when building the registry
#[derive(Debug, Default)]
pub struct RuleRegistryBuilder {
    types: Vec<TypeRules>,
}

impl RuleRegistryBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rules of a type
    pub fn register(mut self, rules: TypeRules) -> Self {
        self.types.push(rules);
        self
    }

    /// Check every declaration and build the registry
    pub fn build(self) -> Result<RuleRegistry> {
        let mut types = HashMap::with_capacity(self.types.len());
        let mut rule_count = 0;

        for declaration in self.types {
            declaration.check()?;
            rule_count += declaration.rule_count();
            let name = declaration.type_name.clone();
            if types.insert(name.clone(), Arc::new(declaration)).is_some() {
                return Err(ConfigurationError::DuplicateType(name));
            }
        }

        info!(types = types.len(), rules = rule_count, "Rule registry built");
        Ok(RuleRegistry { types })
    }
}
