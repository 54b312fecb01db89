//! This module defines the Lookup trait.
//!
//! A [`Lookup`] is the read-only capability handed to custom predicates and
//! used by conditional requirements: it can resolve any field of the
//! document by path, and nothing else.
//!

use crate::path::Path;
use crate::value::Value;
use tracing::warn;

/// Resolve field paths against a document.
pub trait Lookup {
    /// Look up a field by parsed path, from the document root.
    fn lookup_path(&self, path: &Path) -> Resolved<'_>;

    /// Look up a field by path expression, from the document root.
    ///
    /// A path that does not parse resolves as missing.
    fn lookup(&self, field_path: &str) -> Resolved<'_> {
        match parse_field_path(field_path) {
            Some(path) => self.lookup_path(&path),
            None => Resolved::new(None),
        }
    }
}

// Parse a path expression, logging the ones that don't parse.
pub(crate) fn parse_field_path(field_path: &str) -> Option<Path> {
    match field_path.parse::<Path>() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(field_path, error = %e, "unparsable field path");
            None
        }
    }
}

/// The result of a field lookup.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    value: Option<&'a Value>,
}

impl<'a> Resolved<'a> {
    pub(crate) fn new(value: Option<&'a Value>) -> Resolved<'a> {
        Resolved { value }
    }

    /// True if the field exists and is not `null`.
    pub fn exists(&self) -> bool {
        self.value().is_some()
    }

    /// The value, if the field exists and is not `null`.
    pub fn value(&self) -> Option<&'a Value> {
        self.value.filter(|v| !v.is_null())
    }

    /// The text, if the field is a string.
    pub fn as_str(&self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    /// The boolean, if the field is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.value.and_then(Value::as_bool)
    }

    /// The canonical text of the field.
    ///
    /// Missing fields and `null` are empty, strings are themselves, numbers
    /// are in shortest decimal form, and containers are compact JSON.
    pub fn text(&self) -> String {
        match self.value {
            None | Some(Value::Null) => String::new(),
            Some(Value::Text(t)) => t.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Integer(i)) => i.to_string(),
            Some(Value::Float(f)) => f.0.to_string(),
            Some(other) => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

/// What a custom predicate may observe besides the value under test.
pub struct CustomContext<'a> {
    lookup: &'a dyn Lookup,
    path: &'a Path,
}

impl<'a> CustomContext<'a> {
    /// Bind a lookup to the path of the field being validated.
    pub fn new(lookup: &'a dyn Lookup, path: &'a Path) -> CustomContext<'a> {
        CustomContext { lookup, path }
    }

    /// Look up any field of the document, by path from the root.
    pub fn lookup(&self, field_path: &str) -> Resolved<'_> {
        self.lookup.lookup(field_path)
    }

    /// The path of the field being validated.
    pub fn path(&self) -> &Path {
        self.path
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{Lookup, Resolved};
    use crate::path::Path;

    /// A [Lookup] that finds nothing
    pub struct EmptyLookup {}

    impl EmptyLookup {
        #![allow(clippy::new_without_default)]
        pub fn new() -> EmptyLookup {
            EmptyLookup {}
        }
    }

    impl Lookup for EmptyLookup {
        fn lookup_path(&self, _path: &Path) -> Resolved<'_> {
            Resolved::new(None)
        }
    }
}
