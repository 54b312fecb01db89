use super::{Check, Messages, Predicate, Requirement, RuleKind, Schema, SchemaNode};
use crate::contract::{Contract, Field, Flow, Report};
use crate::value::{Value, ValueMap};

/// Rules for a map, with a nested schema for its fields.
///
/// The nested schema is only applied when the map itself passes.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct ObjectRule {
    pub requirement: Requirement,
    pub item: Schema,
    pub custom: Option<Predicate<ValueMap>>,
    pub messages: Messages,
}

impl ObjectRule {
    /// Create a rule with no constraints and no nested fields.
    pub fn new() -> ObjectRule {
        ObjectRule::default()
    }

    common_builders!(ValueMap);

    /// Add one nested field.
    pub fn item<K: Into<String>, N: Into<SchemaNode>>(mut self, name: K, node: N) -> Self {
        self.item.insert(name, node);
        self
    }

    /// Replace the nested schema.
    pub fn items(mut self, schema: Schema) -> Self {
        self.item = schema;
        self
    }
}

impl Contract for ObjectRule {
    const KIND: RuleKind = RuleKind::Object;

    fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn is_empty(value: &Value) -> bool {
        matches!(value, Value::Map(m) if m.is_empty())
    }

    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow {
        match value {
            Value::Map(map) => report.custom(self.custom.as_ref(), map, field),
            _ => Err(report.halt(
                Check::Type,
                format!("{} must be type of object", field.key),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::run;
    use crate::rules::StringRule;
    use crate::validate::Options;

    #[test]
    fn object() {
        let rule = ObjectRule::new()
            .required()
            .item("description", StringRule::new().required());
        assert_eq!(rule.item.len(), 1);

        assert_eq!(run(&rule, None, Options::default()), ["test is required"]);
        assert_eq!(
            run(&rule, Some(&Value::Map(ValueMap::new())), Options::default()),
            ["test is required"]
        );
        assert_eq!(
            run(&rule, Some(&Value::Array(vec![])), Options::default()),
            ["test must be type of object"]
        );

        // Nested fields are the walker's job, not the rule's.
        let mut map = ValueMap::new();
        map.insert("other".into(), Value::Bool(true));
        assert!(run(&rule, Some(&Value::Map(map)), Options::default()).is_empty());
    }

    #[test]
    fn custom_sees_map() {
        let rule = ObjectRule::new().custom(|map, _| {
            if map.contains_key("id") {
                Ok(())
            } else {
                Err("test needs an id".into())
            }
        });
        let mut map = ValueMap::new();
        map.insert("name".into(), Value::Text("x".into()));
        assert_eq!(
            run(&rule, Some(&Value::Map(map)), Options::default()),
            ["test needs an id"]
        );
    }
}
