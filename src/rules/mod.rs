//! Schema definitions.
//!
//! A [`Schema`] is an ordered list of field names, each bound to a
//! [`SchemaNode`]: either one [`Rule`] or a nested `Schema` that applies to
//! the same level of data.
//!
//! Each rule kind lives in its own module and is built with chained methods:
//!
//! ```
//! use treeguard::rules::{NumericRule, ObjectRule, Schema, StringRule};
//!
//! let schema = Schema::new()
//!     .field("name", StringRule::new().required().min(10))
//!     .field("email", StringRule::new().required_unless("name", "tono").email())
//!     .field(
//!         "information",
//!         ObjectRule::new()
//!             .required()
//!             .item("age", NumericRule::<f64>::new().required_if("name", "tono"))
//!             .item("description", StringRule::new().required().max(2)),
//!     );
//! assert_eq!(schema.len(), 3);
//! ```

use crate::condition::Conditional;
use crate::context::CustomContext;
use crate::contract::{evaluate, Field};
use crate::util::RuleFailure;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;
use strum_macros::Display;

// Builder methods shared by every rule kind. `$target` is the type handed to
// the custom predicate.
macro_rules! common_builders {
    ($target:ty) => {
        /// Mark the field as required: absent, `null`, and empty values fail.
        pub fn required(mut self) -> Self {
            self.requirement.required = true;
            self
        }

        /// Require the field when the field at `field_path` equals `value`.
        pub fn required_if<P, V>(mut self, field_path: P, value: V) -> Self
        where
            P: Into<String>,
            V: Into<$crate::condition::Comparand>,
        {
            self.requirement.required_if =
                Some($crate::condition::Conditional::new(field_path, value));
            self
        }

        /// Require the field unless the field at `field_path` equals `value`.
        pub fn required_unless<P, V>(mut self, field_path: P, value: V) -> Self
        where
            P: Into<String>,
            V: Into<$crate::condition::Comparand>,
        {
            self.requirement.required_unless =
                Some($crate::condition::Conditional::new(field_path, value));
            self
        }

        /// Replace the default message for one check.
        pub fn message<M: Into<String>>(mut self, check: $crate::rules::Check, message: M) -> Self {
            self.messages.set(check, message);
            self
        }

        /// Add a custom predicate, run after every other check.
        ///
        /// An `Err` becomes a message, unless an override is set for
        /// `Check::Custom`.
        pub fn custom<F>(mut self, predicate: F) -> Self
        where
            F: Fn(&$target, &$crate::context::CustomContext<'_>) -> Result<(), String>
                + Send
                + Sync
                + 'static,
        {
            self.custom = Some($crate::rules::Predicate::new(predicate));
            self
        }
    };
}

mod boolean;
mod file;
mod list;
mod numeric;
mod object;
mod string;

pub use boolean::BooleanRule;
pub use file::FileRule;
pub use list::{Element, ListKind, ListOfObjectRule, ListRule};
pub use numeric::{Number, NumericKind, NumericRule};
pub use object::ObjectRule;
pub use string::{StringRule, UrlSchemes};

/// The closed set of rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RuleKind {
    #[strum(serialize = "string")]
    /// Text values.
    String,
    #[strum(serialize = "numeric")]
    /// Integer or floating-point values.
    Numeric,
    #[strum(serialize = "boolean")]
    /// `true` or `false`.
    Boolean,
    #[strum(serialize = "file")]
    /// Uploaded files.
    File,
    #[strum(serialize = "object")]
    /// Maps with their own nested schema.
    Object,
    #[strum(serialize = "list")]
    /// Lists of scalars.
    List,
    #[strum(serialize = "list of object")]
    /// Lists of maps, each validated against a nested schema.
    ListOfObject,
}

/// Names one check, for message overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum Check {
    Required,
    RequiredIf,
    RequiredUnless,
    Type,
    Min,
    Max,
    MinDigits,
    MaxDigits,
    Regex,
    NotRegex,
    In,
    NotIn,
    Email,
    Alpha,
    AlphaNumeric,
    Url,
    Mimes,
    Custom,
}

/// Override messages, by check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Messages(BTreeMap<Check, String>);

impl Messages {
    /// Set the message used when `check` fails.
    pub fn set<M: Into<String>>(&mut self, check: Check, message: M) {
        self.0.insert(check, message.into());
    }

    /// The override for `check`; empty overrides don't count.
    pub fn get(&self, check: Check) -> Option<&str> {
        self.0
            .get(&check)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }
}

/// The required / required-if / required-unless settings of a rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Requirement {
    /// Fail when the value is absent or empty.
    pub required: bool,
    /// Required when another field equals a value.
    pub required_if: Option<Conditional>,
    /// Required unless another field equals a value.
    pub required_unless: Option<Conditional>,
}

type PredicateFn<T> = dyn Fn(&T, &CustomContext<'_>) -> Result<(), String> + Send + Sync;

/// A caller-supplied check.
pub struct Predicate<T: ?Sized>(Arc<PredicateFn<T>>);

impl<T: ?Sized> Predicate<T> {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Predicate<T>
    where
        F: Fn(&T, &CustomContext<'_>) -> Result<(), String> + Send + Sync + 'static,
    {
        Predicate(Arc::new(f))
    }

    pub(crate) fn call(&self, value: &T, ctx: &CustomContext<'_>) -> Result<(), String> {
        (self.0)(value, ctx)
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

/// One rule, of one kind.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum Rule {
    String(StringRule),
    Numeric(NumericKind),
    Boolean(BooleanRule),
    File(FileRule),
    Object(ObjectRule),
    List(ListKind),
    ListOfObject(ListOfObjectRule),
}

impl Rule {
    /// The kind of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::String(_) => RuleKind::String,
            Rule::Numeric(_) => RuleKind::Numeric,
            Rule::Boolean(_) => RuleKind::Boolean,
            Rule::File(_) => RuleKind::File,
            Rule::Object(_) => RuleKind::Object,
            Rule::List(_) => RuleKind::List,
            Rule::ListOfObject(_) => RuleKind::ListOfObject,
        }
    }

    // Run the rule contract for one field.
    pub(crate) fn evaluate(&self, field: &Field<'_>) -> Result<(), RuleFailure> {
        match self {
            Rule::String(r) => evaluate(r, field),
            Rule::Numeric(n) => n.evaluate(field),
            Rule::Boolean(r) => evaluate(r, field),
            Rule::File(r) => evaluate(r, field),
            Rule::Object(r) => evaluate(r, field),
            Rule::List(l) => l.evaluate(field),
            Rule::ListOfObject(r) => evaluate(r, field),
        }
    }
}

/// A rule, or a nested group of fields at the same data level.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A single rule for one field.
    Rule(Rule),
    /// Fields read from the same map as the enclosing schema.
    Group(Schema),
}

impl From<Rule> for SchemaNode {
    fn from(rule: Rule) -> SchemaNode {
        SchemaNode::Rule(rule)
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> SchemaNode {
        SchemaNode::Group(schema)
    }
}

macro_rules! into_rule {
    ($($rule:ty => $variant:ident),*) => {
        $(
            impl From<$rule> for Rule {
                fn from(r: $rule) -> Rule {
                    Rule::$variant(r)
                }
            }

            impl From<$rule> for SchemaNode {
                fn from(r: $rule) -> SchemaNode {
                    SchemaNode::Rule(Rule::$variant(r))
                }
            }
        )*
    };
}

into_rule!(
    StringRule => String,
    BooleanRule => Boolean,
    FileRule => File,
    ObjectRule => Object,
    ListOfObjectRule => ListOfObject
);

impl<T: Number> From<NumericRule<T>> for Rule {
    fn from(r: NumericRule<T>) -> Rule {
        Rule::Numeric(T::wrap(r))
    }
}

impl<T: Number> From<NumericRule<T>> for SchemaNode {
    fn from(r: NumericRule<T>) -> SchemaNode {
        SchemaNode::Rule(r.into())
    }
}

impl<T: Element> From<ListRule<T>> for Rule {
    fn from(r: ListRule<T>) -> Rule {
        Rule::List(T::wrap_list(r))
    }
}

impl<T: Element> From<ListRule<T>> for SchemaNode {
    fn from(r: ListRule<T>) -> SchemaNode {
        SchemaNode::Rule(r.into())
    }
}

/// An ordered list of fields and their schema nodes.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, SchemaNode)>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Schema {
        Schema::default()
    }

    /// Add a field, returning the schema.
    pub fn field<K: Into<String>, N: Into<SchemaNode>>(mut self, name: K, node: N) -> Schema {
        self.insert(name, node);
        self
    }

    /// Add a field. A field with the same name is replaced in place.
    pub fn insert<K: Into<String>, N: Into<SchemaNode>>(&mut self, name: K, node: N) {
        let name = name.into();
        let node = node.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = node,
            None => self.fields.push((name, node)),
        }
    }

    /// Look up a field's node.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// The number of fields at this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, N: Into<SchemaNode>> FromIterator<(K, N)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Schema {
        let mut schema = Schema::new();
        for (name, node) in iter {
            schema.insert(name, node);
        }
        schema
    }
}
