//! Conditional requirements.
//!
//! A [`Conditional`] names another field by path and a value to compare it
//! with. Both sides are compared as canonical text (see
//! [`Resolved::text`](crate::context::Resolved::text)), so `1` and `1.0`
//! compare equal, as do `true` and `"true"`.

use crate::context::{parse_field_path, Lookup};
use crate::path::Path;
use std::fmt;

/// The value a conditional compares against, in canonical text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparand(String);

impl Comparand {
    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Comparand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Comparand {
    fn from(s: &str) -> Comparand {
        Comparand(s.to_string())
    }
}

impl From<String> for Comparand {
    fn from(s: String) -> Comparand {
        Comparand(s)
    }
}

impl From<()> for Comparand {
    fn from(_: ()) -> Comparand {
        Comparand(String::new())
    }
}

macro_rules! comparand_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Comparand {
                fn from(v: $t) -> Comparand {
                    Comparand(v.to_string())
                }
            }
        )*
    };
}

comparand_from_display!(bool, i32, i64, i128, u32, u64, f32, f64);

/// A field path plus a comparand, used by `required_if` and
/// `required_unless`.
///
/// The path is parsed once, when the conditional is built. A path that
/// doesn't parse is logged and then resolves as missing on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    field_path: String,
    path: Option<Path>,
    value: Comparand,
}

impl Conditional {
    /// Create a new `Conditional`.
    pub fn new<P: Into<String>, V: Into<Comparand>>(field_path: P, value: V) -> Conditional {
        let field_path = field_path.into();
        Conditional {
            path: parse_field_path(&field_path),
            field_path,
            value: value.into(),
        }
    }

    /// The field to look up, from the document root.
    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    /// The value to compare it with.
    pub fn value(&self) -> &Comparand {
        &self.value
    }

    /// True if the referenced field's text equals the comparand.
    pub fn matches(&self, lookup: &dyn Lookup) -> bool {
        let text = match &self.path {
            Some(path) => lookup.lookup_path(path).text(),
            None => String::new(),
        };
        text == self.value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::EmptyLookup;
    use crate::snapshot::Snapshot;
    use crate::value::Value;
    use std::convert::TryFrom;

    #[test]
    fn compares_canonical_text() {
        let root = Value::try_from(serde_json::json!({
            "name": "tono",
            "count": 1,
            "ratio": 2.5,
            "active": true,
            "information": { "job": { "level": "senior" } }
        }))
        .unwrap();
        let snap = Snapshot::new(&root);

        assert!(Conditional::new("name", "tono").matches(&snap));
        assert!(!Conditional::new("name", "budi").matches(&snap));
        assert!(Conditional::new("count", 1).matches(&snap));
        assert!(Conditional::new("count", 1.0).matches(&snap));
        assert!(Conditional::new("ratio", 2.5).matches(&snap));
        assert!(Conditional::new("active", true).matches(&snap));
        assert!(Conditional::new("active", "true").matches(&snap));
        assert!(Conditional::new("information.job.level", "senior").matches(&snap));
    }

    #[test]
    fn missing_field_is_empty() {
        let lookup = EmptyLookup::new();
        assert!(Conditional::new("anything", "").matches(&lookup));
        assert!(Conditional::new("anything", ()).matches(&lookup));
        assert!(!Conditional::new("anything", "x").matches(&lookup));
    }

    #[test]
    fn unparsable_path_is_missing() {
        let root = Value::try_from(serde_json::json!({ "a": { "": "x" } })).unwrap();
        let snap = Snapshot::new(&root);
        let cond = Conditional::new("a..b", "");
        assert_eq!(cond.field_path(), "a..b");
        assert!(cond.matches(&snap));
        assert!(!Conditional::new("a..b", "x").matches(&snap));
        assert!(!Conditional::new("", "x").matches(&snap));
    }
}
