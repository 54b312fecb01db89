use super::numeric::Number;
use super::{Check, Messages, Predicate, Requirement, RuleKind, Schema, SchemaNode};
use crate::contract::{evaluate, Contract, Field, Flow, Report};
use crate::util::RuleFailure;
use crate::value::Value;

/// A scalar type that a [`ListRule`] can hold.
pub trait Element: Clone + Send + Sync + 'static {
    /// The element type name used in messages.
    const NAME: &'static str;

    /// Extract a value of this type, if the value has a compatible shape.
    fn from_value(value: &Value) -> Option<Self>;

    #[doc(hidden)]
    fn wrap_list(rule: ListRule<Self>) -> ListKind;
}

impl Element for String {
    const NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<String> {
        value.as_str().map(ToString::to_string)
    }

    fn wrap_list(rule: ListRule<String>) -> ListKind {
        ListKind::Text(rule)
    }
}

macro_rules! numeric_element {
    ($($t:ident => $variant:ident),*) => {
        $(
            impl Element for $t {
                const NAME: &'static str = <$t as Number>::NAME;

                fn from_value(value: &Value) -> Option<$t> {
                    <$t as Number>::from_value(value)
                }

                fn wrap_list(rule: ListRule<$t>) -> ListKind {
                    ListKind::$variant(rule)
                }
            }
        )*
    };
}

numeric_element!(i32 => I32, i64 => I64, u32 => U32, u64 => U64, f32 => F32, f64 => F64);

/// Rules for a list of scalars of type `T`.
///
/// An empty list only has to be a list; the count and custom checks apply
/// once it has items.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct ListRule<T> {
    pub requirement: Requirement,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub custom: Option<Predicate<[T]>>,
    pub messages: Messages,
}

impl<T: Element> ListRule<T> {
    /// Create a rule with no constraints.
    pub fn new() -> ListRule<T> {
        ListRule {
            requirement: Requirement::default(),
            min: None,
            max: None,
            custom: None,
            messages: Messages::default(),
        }
    }

    common_builders!([T]);

    /// Fewest allowed items.
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Most allowed items.
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

fn check_count(
    key: &str,
    len: usize,
    min: Option<usize>,
    max: Option<usize>,
    report: &mut Report<'_>,
) -> Flow {
    if let Some(min) = min {
        report.assert(Check::Min, len < min, || {
            format!("{} must contain minimum of {} item(s)", key, min)
        })?;
    }
    if let Some(max) = max {
        report.assert(Check::Max, len > max, || {
            format!("{} must contain maximum of {} item(s)", key, max)
        })?;
    }
    Ok(())
}

fn is_empty_list(value: &Value) -> bool {
    matches!(value, Value::Array(a) if a.is_empty())
}

impl<T: Element> Contract for ListRule<T> {
    const KIND: RuleKind = RuleKind::List;

    fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn is_empty(value: &Value) -> bool {
        is_empty_list(value)
    }

    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow {
        let key = field.key;
        let typed: Option<Vec<T>> = value
            .as_array()
            .and_then(|items| items.iter().map(T::from_value).collect());
        let items = match typed {
            Some(items) => items,
            None => {
                return Err(report.halt(
                    Check::Type,
                    format!("{} must be a list of {}", key, T::NAME),
                ));
            }
        };
        if items.is_empty() {
            return Ok(());
        }
        check_count(key, items.len(), self.min, self.max, report)?;
        report.custom(self.custom.as_ref(), items.as_slice(), field)
    }
}

/// A [`ListRule`] for one of the supported element types.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum ListKind {
    I32(ListRule<i32>),
    I64(ListRule<i64>),
    U32(ListRule<u32>),
    U64(ListRule<u64>),
    F32(ListRule<f32>),
    F64(ListRule<f64>),
    Text(ListRule<String>),
}

impl ListKind {
    pub(crate) fn evaluate(&self, field: &Field<'_>) -> Result<(), RuleFailure> {
        match self {
            ListKind::I32(r) => evaluate(r, field),
            ListKind::I64(r) => evaluate(r, field),
            ListKind::U32(r) => evaluate(r, field),
            ListKind::U64(r) => evaluate(r, field),
            ListKind::F32(r) => evaluate(r, field),
            ListKind::F64(r) => evaluate(r, field),
            ListKind::Text(r) => evaluate(r, field),
        }
    }
}

/// Rules for a list of maps; each map is validated against `item`.
///
/// Elements are only descended into when the list itself passes. Their
/// paths are `key.0.field`, `key.1.field`, and so on.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct ListOfObjectRule {
    pub requirement: Requirement,
    pub item: Schema,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub custom: Option<Predicate<[Value]>>,
    pub messages: Messages,
}

impl ListOfObjectRule {
    /// Create a rule with no constraints and no nested fields.
    pub fn new() -> ListOfObjectRule {
        ListOfObjectRule::default()
    }

    common_builders!([Value]);

    /// Add one field of the element schema.
    pub fn item<K: Into<String>, N: Into<SchemaNode>>(mut self, name: K, node: N) -> Self {
        self.item.insert(name, node);
        self
    }

    /// Replace the element schema.
    pub fn items(mut self, schema: Schema) -> Self {
        self.item = schema;
        self
    }

    /// Fewest allowed items.
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Most allowed items.
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

impl Contract for ListOfObjectRule {
    const KIND: RuleKind = RuleKind::ListOfObject;

    fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn is_empty(value: &Value) -> bool {
        is_empty_list(value)
    }

    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow {
        let key = field.key;
        let items = match value.as_array() {
            Some(items) if items.iter().all(|v| v.as_map().is_some()) => items,
            _ => {
                return Err(report.halt(
                    Check::Type,
                    format!("{} must be a list of objects", key),
                ));
            }
        };
        if items.is_empty() {
            return Ok(());
        }
        check_count(key, items.len(), self.min, self.max, report)?;
        report.custom(self.custom.as_ref(), items, field)
    }
}
