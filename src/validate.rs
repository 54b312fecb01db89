//! This module contains the code that walks data and schema together.
//!
//! The walk is depth-first, in schema declaration order. Each field's rule is
//! evaluated against the value found under its key; a passing object or list
//! of objects is then descended into with the nested schema.

use crate::bag::ErrorBag;
use crate::contract::Field;
use crate::path::Path;
use crate::rules::{Rule, Schema, SchemaNode};
use crate::snapshot::Snapshot;
use crate::util::{ValidateError, ValidateResult};
use crate::value::{Value, ValueMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Validation options.
///
/// ```
/// use treeguard::Options;
///
/// let options: Options = serde_json::from_str(r#"{"abort_early": true}"#).unwrap();
/// assert_eq!(options, Options::abort_early());
/// let options: Options = serde_json::from_str("{}").unwrap();
/// assert_eq!(options, Options::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Stop at the first failing field, and at the first failing check of
    /// that field.
    pub abort_early: bool,
}

impl Options {
    /// Options that stop at the first failure.
    pub fn abort_early() -> Options {
        Options { abort_early: true }
    }
}

// Returned when abort-early ends the walk.
struct Abort;

type WalkResult = Result<(), Abort>;

struct Walker<'a> {
    snapshot: Snapshot<'a>,
    options: Options,
    bag: ErrorBag,
}

impl<'a> Walker<'a> {
    fn new(root: &'a Value, options: Options) -> Walker<'a> {
        Walker {
            snapshot: Snapshot::new(root),
            options,
            bag: ErrorBag::new(),
        }
    }

    // `data` is `None` when the current level isn't a map; every field is
    // then absent.
    fn walk(&mut self, path: &Path, data: Option<&'a ValueMap>, schema: &Schema) -> WalkResult {
        trace!(path = %path, fields = schema.len(), "descend");
        for (key, node) in schema.iter() {
            match node {
                SchemaNode::Group(group) => self.walk(path, data, group)?,
                SchemaNode::Rule(rule) => self.field(path, data, key, rule)?,
            }
        }
        Ok(())
    }

    fn field(
        &mut self,
        path: &Path,
        data: Option<&'a ValueMap>,
        key: &str,
        rule: &Rule,
    ) -> WalkResult {
        let field_path = path.child(key);
        let value = data.and_then(|map| map.get(key)).filter(|v| !v.is_null());

        let field = Field {
            key,
            value,
            path: &field_path,
            lookup: &self.snapshot,
            options: self.options,
        };
        if let Err(failure) = rule.evaluate(&field) {
            debug!(
                path = %field_path,
                kind = %failure.kind,
                found = value.map_or("nothing", crate::value::Value::type_name),
                missing = failure.missing,
                "field failed"
            );
            self.bag.append(field_path.to_string(), failure.messages);
            if self.options.abort_early {
                debug!(path = %field_path, "abort early");
                return Err(Abort);
            }
            return Ok(());
        }

        match rule {
            Rule::Object(object) => {
                if let Some(map) = value.and_then(Value::as_map) {
                    self.walk(&field_path, Some(map), &object.item)?;
                }
            }
            Rule::ListOfObject(list) => {
                if let Some(items) = value.and_then(Value::as_array) {
                    for (i, item) in items.iter().enumerate() {
                        self.walk(&field_path.index(i), item.as_map(), &list.item)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Binds data, a schema and options for a validation run.
///
/// ```
/// use serde_json::json;
/// use std::convert::TryFrom;
/// use treeguard::rules::{Schema, StringRule};
/// use treeguard::value::Value;
/// use treeguard::{Options, SchemaContainer};
///
/// let schema = Schema::new().field("name", StringRule::new().required().min(10));
/// let data = Value::try_from(json!({"name": "ab"})).unwrap();
///
/// let bag = SchemaContainer::new(&data, &schema, Options::default()).check();
/// assert_eq!(
///     bag.get("name").unwrap(),
///     ["name must be minimum of 10 character(s)"]
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchemaContainer<'a> {
    data: &'a Value,
    schema: &'a Schema,
    options: Options,
}

impl<'a> SchemaContainer<'a> {
    /// Create a new container.
    pub fn new(data: &'a Value, schema: &'a Schema, options: Options) -> SchemaContainer<'a> {
        SchemaContainer {
            data,
            schema,
            options,
        }
    }

    /// Validate, returning every message collected. An empty bag means the
    /// data is valid.
    pub fn check(&self) -> ErrorBag {
        let mut walker = Walker::new(self.data, self.options);
        // A root that isn't a map has no fields.
        let _ = walker.walk(&Path::root(), self.data.as_map(), self.schema);
        walker.bag
    }

    /// Validate, returning [`ValidateError::Invalid`] if any message was
    /// collected.
    pub fn validate(&self) -> ValidateResult {
        let bag = self.check();
        if bag.is_empty() {
            Ok(())
        } else {
            Err(ValidateError::Invalid(bag))
        }
    }
}

/// Validate `data` against `schema`, returning every message collected.
pub fn check(data: &Value, schema: &Schema, options: Options) -> ErrorBag {
    SchemaContainer::new(data, schema, options).check()
}

/// Validate `data` against `schema`.
pub fn validate(data: &Value, schema: &Schema, options: Options) -> ValidateResult {
    SchemaContainer::new(data, schema, options).validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ListOfObjectRule, NumericRule, ObjectRule, StringRule};

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn non_map_root() {
        let schema = Schema::new().field("name", StringRule::new().required());
        let bag = check(&Value::Integer(1), &schema, Options::default());
        assert_eq!(bag.get("name").unwrap(), ["name is required"]);
        let bag = check(&text("x"), &Schema::new(), Options::default());
        assert!(bag.is_empty());
    }

    #[test]
    fn groups_share_the_level() {
        let schema = Schema::new().field(
            "contact",
            Schema::new()
                .field("email", StringRule::new().required())
                .field("phone", StringRule::new().required()),
        );
        let data = map(vec![("email", text("a@b.io"))]);
        let bag = check(&data, &schema, Options::default());
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get("phone").unwrap(), ["phone is required"]);
        assert!(!bag.contains("contact.phone"));
    }

    #[test]
    fn object_descends_when_passing() {
        let schema = Schema::new().field(
            "information",
            ObjectRule::new()
                .required()
                .item("description", StringRule::new().required().max(2)),
        );

        let data = map(vec![("information", Value::Null)]);
        let bag = check(&data, &schema, Options::default());
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get("information").unwrap(), ["information is required"]);

        let data = map(vec![(
            "information",
            map(vec![("description", text("long"))]),
        )]);
        let bag = check(&data, &schema, Options::default());
        assert_eq!(
            bag.get("information.description").unwrap(),
            ["description must be maximum of 2 character(s)"]
        );
    }

    #[test]
    fn list_of_object_indexes_paths() {
        let schema = Schema::new().field(
            "items",
            ListOfObjectRule::new().item("title", StringRule::new().required()),
        );
        let data = map(vec![(
            "items",
            Value::Array(vec![
                map(vec![("title", text(""))]),
                map(vec![("title", text("ok"))]),
            ]),
        )]);
        let bag = check(&data, &schema, Options::default());
        assert_eq!(bag.get("items.0.title").unwrap(), ["title is required"]);
        assert!(!bag.contains("items.1.title"));
    }

    #[test]
    fn abort_early_stops_the_walk() {
        let schema = Schema::new()
            .field("a", StringRule::new().required())
            .field("b", StringRule::new().required())
            .field("c", NumericRule::<i64>::new().min(10));
        let data = map(vec![("c", Value::Integer(1))]);

        let bag = check(&data, &schema, Options::default());
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.message_count(), 3);

        let bag = check(&data, &schema, Options::abort_early());
        assert_eq!(bag.len(), 1);
        assert!(bag.contains("a"));
    }

    #[test]
    fn validate_wraps_the_bag() {
        let schema = Schema::new().field("a", StringRule::new().required());
        let err = validate(&map(vec![]), &schema, Options::default()).unwrap_err();
        assert_eq!(err.bag().unwrap().get("a").unwrap(), ["a is required"]);
        assert!(validate(&map(vec![("a", text("x"))]), &schema, Options::default()).is_ok());
    }
}
