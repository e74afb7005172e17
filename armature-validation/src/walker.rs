// Object graph validation

use crate::{
    ActiveGroups, Evaluator, FieldPath, GroupId, Rule, RuleRegistry, Validate, ValidationContext,
    ValidatorConfig, Value, Violation, ViolationReport, effective_groups,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Validates object graphs against a [`RuleRegistry`].
///
/// The validator holds no per-call state; it can be shared across threads and
/// used for any number of concurrent passes.
///
/// # Examples
///
/// ```
/// use armature_validation::*;
///
/// struct Signup {
///     email: Option<String>,
/// }
///
/// impl Schema for Signup {
///     const TYPE_NAME: &'static str = "Signup";
///     const FIELDS: &'static [&'static str] = &["email"];
/// }
///
/// impl Validate for Signup {
///     fn type_name(&self) -> &'static str {
///         Self::TYPE_NAME
///     }
///
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "email" => Value::from(&self.email),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let registry = RuleRegistry::builder()
///     .register(TypeRules::of::<Signup>().field(
///         ValidationRules::for_field("email")
///             .add(Rule::not_blank().group(GroupId::ON_CREATE).message("email is required"))
///             .add(Rule::email().message("email must be valid")),
///     ))
///     .build()
///     .unwrap();
///
/// let validator = Validator::new(registry);
///
/// let report = validator.validate(&Signup { email: None }, &[GroupId::ON_CREATE]);
/// assert_eq!(report.to_map()["email"], "email is required");
///
/// // Without a group only ungrouped rules run, and email accepts null.
/// assert!(validator.validate(&Signup { email: None }, &[]).is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the default configuration
    pub fn new(registry: impl Into<Arc<RuleRegistry>>) -> Self {
        Self::with_config(registry, ValidatorConfig::default())
    }

    /// Create a validator with an explicit configuration
    pub fn with_config(registry: impl Into<Arc<RuleRegistry>>, config: ValidatorConfig) -> Self {
        Self {
            registry: registry.into(),
            config,
        }
    }

    /// The registry rules are read from
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `root` under the requested groups.
    ///
    /// No groups requested means the default group.
    pub fn validate(&self, root: &dyn Validate, groups: &[GroupId]) -> ViolationReport {
        self.validate_with(root, groups, &ValidationContext::new())
    }

    /// Validate with an explicit context, e.g. a fixed clock
    pub fn validate_with(
        &self,
        root: &dyn Validate,
        groups: &[GroupId],
        ctx: &ValidationContext,
    ) -> ViolationReport {
        self.walk_from(root, groups, ctx, FieldPath::root())
    }

    /// Validate the arguments of an operation.
    ///
    /// Violation paths are prefixed with the operation name, e.g.
    /// `search.limit`.
    pub fn validate_arguments(&self, args: &Arguments<'_>, groups: &[GroupId]) -> ViolationReport {
        self.walk_from(
            args,
            groups,
            &ValidationContext::new(),
            FieldPath::field(args.operation),
        )
    }

    fn walk_from(
        &self,
        root: &dyn Validate,
        groups: &[GroupId],
        ctx: &ValidationContext,
        prefix: FieldPath,
    ) -> ViolationReport {
        let active = effective_groups(groups);
        let mut walker = GraphWalker {
            registry: &self.registry,
            config: &self.config,
            active: &active,
            ctx,
            report: ViolationReport::new(),
        };
        walker.visit(root, &prefix, 0);

        debug!(
            type_name = root.type_name(),
            groups = %active,
            violations = walker.report.len(),
            "Validation pass finished"
        );
        walker.report
    }
}

/// State of one validation pass
struct GraphWalker<'r> {
    registry: &'r RuleRegistry,
    config: &'r ValidatorConfig,
    active: &'r ActiveGroups,
    ctx: &'r ValidationContext,
    report: ViolationReport,
}

impl GraphWalker<'_> {
    fn visit(&mut self, node: &dyn Validate, path: &FieldPath, depth: usize) {
        if depth > self.config.max_depth {
            warn!(
                path = %path,
                max_depth = self.config.max_depth,
                "Nesting depth limit reached, not descending further"
            );
            self.report.push(
                Violation::new(path.clone(), self.config.depth_limit_message.clone())
                    .with_constraint("MaxDepth"),
            );
            return;
        }

        let registry = self.registry;
        let Some(declarations) = registry.rules_for(node.type_name()) else {
            trace!(type_name = node.type_name(), "No rules registered");
            return;
        };

        for field in declarations.fields() {
            let value = node.field(field.field());
            let field_path = path.join(field.field());

            for rule in field.rules() {
                self.apply(rule, &value, node, &field_path);
            }

            if let Value::List(items) = &value {
                if !field.element_rules().is_empty() {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = field_path.index(index);
                        for rule in field.element_rules() {
                            self.apply(rule, item, node, &item_path);
                        }
                    }
                }
            }

            if field.cascades() {
                self.cascade(&value, &field_path, depth);
            }
        }

        for rule in declarations.constraints() {
            self.apply(rule, &Value::Object(node), node, path);
        }
    }

    fn cascade(&mut self, value: &Value<'_>, path: &FieldPath, depth: usize) {
        match value {
            Value::Object(nested) => self.visit(*nested, path, depth + 1),
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Object(nested) = item {
                        self.visit(*nested, &path.index(index), depth + 1);
                    }
                }
            }
            _ => {}
        }
    }

    fn apply(&mut self, rule: &Rule, value: &Value<'_>, owner: &dyn Validate, path: &FieldPath) {
        if !self.active.matches(rule.declared_groups()) {
            return;
        }

        let result = Evaluator::evaluate(rule, value, owner, self.ctx);
        trace!(rule = rule.name(), path = %path, valid = result.valid, "Rule evaluated");
        if result.valid {
            return;
        }

        // Path overrides are relative to the node the rule ran on.
        let path = match &result.path {
            Some(relative) => path.append(relative),
            None => path.clone(),
        };
        let message = result
            .message
            .unwrap_or_else(|| rule.violation_message().to_string());

        let mut violation = Violation::new(path, message).with_constraint(rule.name());
        if self.config.capture_invalid_values && !rule.is_type_level() {
            violation = violation.with_value(value.to_json());
        }
        self.report.push(violation);
    }
}

/// Named arguments of an operation, validated like an object whose type
/// name is the operation name
pub struct Arguments<'a> {
    operation: &'static str,
    values: Vec<(&'static str, Value<'a>)>,
}

impl<'a> Arguments<'a> {
    /// Start collecting arguments for `operation`
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            values: Vec::new(),
        }
    }

    /// Add an argument
    pub fn arg(mut self, name: &'static str, value: impl Into<Value<'a>>) -> Self {
        self.values.push((name, value.into()));
        self
    }
}

impl Validate for Arguments<'_> {
    fn type_name(&self) -> &'static str {
        self.operation
    }

    fn field(&self, name: &str) -> Value<'_> {
        self.values
            .iter()
            .find(|(arg, _)| *arg == name)
            .map_or(Value::Null, |(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EvalResult, Schema, TypeRules, ValidationRules};

    struct Node {
        label: Option<String>,
        child: Option<Box<Node>>,
    }

    impl Schema for Node {
        const TYPE_NAME: &'static str = "Node";
        const FIELDS: &'static [&'static str] = &["label", "child"];
    }

    impl Validate for Node {
        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn field(&self, name: &str) -> Value<'_> {
            match name {
                "label" => Value::from(&self.label),
                "child" => match &self.child {
                    Some(child) => Value::Object(child.as_ref()),
                    None => Value::Null,
                },
                _ => Value::Null,
            }
        }
    }

    fn chain(depth: usize) -> Node {
        let mut node = Node {
            label: Some("leaf".to_string()),
            child: None,
        };
        for _ in 0..depth {
            node = Node {
                label: Some("inner".to_string()),
                child: Some(Box::new(node)),
            };
        }
        node
    }

    fn node_registry() -> RuleRegistry {
        RuleRegistry::builder()
            .register(
                TypeRules::of::<Node>()
                    .field(ValidationRules::for_field("label").add(Rule::not_blank()))
                    .field(ValidationRules::for_field("child").cascade()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_nested_path_prefix() {
        let validator = Validator::new(node_registry());
        let mut root = chain(2);
        if let Some(child) = root.child.as_mut() {
            if let Some(grandchild) = child.child.as_mut() {
                grandchild.label = None;
            }
        }

        let report = validator.validate(&root, &[]);
        assert_eq!(report.paths(), vec!["child.child.label"]);
    }

    #[test]
    fn test_depth_limit_guards_deep_graphs() {
        let validator =
            Validator::with_config(node_registry(), ValidatorConfig::new().with_max_depth(3));

        assert!(validator.validate(&chain(3), &[]).is_valid());

        let report = validator.validate(&chain(5), &[]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.paths(), vec!["child.child.child.child"]);
        assert_eq!(report.iter().next().unwrap().constraint, "MaxDepth");
    }

    #[test]
    fn test_captured_values_can_be_disabled() {
        let root = Node {
            label: Some("  ".to_string()),
            child: None,
        };

        let report = Validator::new(node_registry()).validate(&root, &[]);
        assert_eq!(
            report.iter().next().unwrap().invalid_value,
            Some(serde_json::json!("  "))
        );

        let quiet = Validator::with_config(
            node_registry(),
            ValidatorConfig::new().with_capture_invalid_values(false),
        );
        assert_eq!(quiet.validate(&root, &[]).iter().next().unwrap().invalid_value, None);
    }

    #[test]
    fn test_type_level_rule_runs_last_at_root_path() {
        let registry = RuleRegistry::builder()
            .register(
                TypeRules::of::<Node>()
                    .field(ValidationRules::for_field("label").add(Rule::not_blank()))
                    .constraint(Rule::cross_field("AlwaysFails", &["label"], |_| {
                        EvalResult::invalid()
                    })),
            )
            .build()
            .unwrap();

        let root = Node {
            label: None,
            child: None,
        };
        let report = Validator::new(registry).validate(&root, &[]);
        assert_eq!(report.paths(), vec!["label", ""]);
        assert_eq!(report.iter().nth(1).unwrap().message, "AlwaysFails constraint failed");
    }

    #[test]
    fn test_unregistered_type_has_no_violations() {
        let validator = Validator::new(RuleRegistry::default());
        assert!(validator.validate(&chain(1), &[]).is_valid());
    }

    #[test]
    fn test_arguments_prefix_operation() {
        let registry = RuleRegistry::builder()
            .register(
                TypeRules::for_type("search", &["q", "limit"])
                    .field(ValidationRules::for_field("q").add(Rule::not_blank().message("q is required")))
                    .field(ValidationRules::for_field("limit").add(Rule::range(Some(1), Some(100)))),
            )
            .build()
            .unwrap();
        let validator = Validator::new(registry);

        let args = Arguments::new("search").arg("q", " ").arg("limit", 500i64);
        let report = validator.validate_arguments(&args, &[]);
        assert_eq!(report.paths(), vec!["search.q", "search.limit"]);

        let args = Arguments::new("search").arg("q", "abc").arg("limit", 10i64);
        assert!(validator.validate_arguments(&args, &[]).is_valid());
    }
}
