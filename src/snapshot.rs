//! A read-only view of the root document.
//!
//! The snapshot is taken once at the start of a validation run. Conditional
//! requirements and custom predicates resolve field paths through it, always
//! from the document root, independent of where the walk currently is.
//! Lookups walk the path's segments down from the root, so taking a
//! snapshot costs nothing until a path is resolved.

use crate::context::{parse_field_path, Lookup, Resolved};
use crate::path::{Path, Segment};
use crate::value::Value;

/// The root of a document, for lookups by path.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    root: &'a Value,
}

impl<'a> Snapshot<'a> {
    /// Take a snapshot of the document at `root`.
    pub fn new(root: &'a Value) -> Snapshot<'a> {
        Snapshot { root }
    }

    /// Find the value at a parsed path.
    ///
    /// Index segments and field names made of digits address the same
    /// position, in maps and in arrays alike.
    pub fn get(&self, path: &Path) -> Option<&'a Value> {
        path.segments()
            .iter()
            .try_fold(self.root, |node, segment| child(node, segment))
    }

    /// Resolve a field path expression.
    ///
    /// A path that does not parse resolves as missing.
    pub fn resolve(&self, field_path: &str) -> Resolved<'a> {
        Resolved::new(parse_field_path(field_path).and_then(|path| self.get(&path)))
    }
}

fn child<'a>(node: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (node, segment) {
        (Value::Map(map), Segment::Field(name)) => map.get(name),
        (Value::Map(map), Segment::Index(i)) => map.get(&i.to_string()),
        (Value::Array(array), Segment::Index(i)) => array.get(*i),
        (Value::Array(array), Segment::Field(name)) => {
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            name.parse::<usize>().ok().and_then(|i| array.get(i))
        }
        _ => None,
    }
}

impl Lookup for Snapshot<'_> {
    fn lookup_path(&self, path: &Path) -> Resolved<'_> {
        Resolved::new(self.get(path))
    }
}
