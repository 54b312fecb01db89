//! The error report produced by a validation run.

use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// A mapping from rendered field path to the messages reported there.
///
/// Messages for one path keep the order in which they were added. Adding
/// never replaces earlier messages and never deduplicates. Paths iterate in
/// sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorBag {
    errors: BTreeMap<String, Vec<String>>,
}

impl ErrorBag {
    /// Create an empty bag.
    pub fn new() -> ErrorBag {
        ErrorBag::default()
    }

    /// Add one message at `path`.
    pub fn add<P: Into<String>, M: Into<String>>(&mut self, path: P, message: M) {
        self.errors
            .entry(path.into())
            .or_insert_with(Vec::new)
            .push(message.into());
    }

    /// Append several messages at `path`, after any already there.
    pub fn append<P: Into<String>>(&mut self, path: P, messages: Vec<String>) {
        match self.errors.entry(path.into()) {
            btree_map::Entry::Occupied(mut e) => e.get_mut().extend(messages),
            btree_map::Entry::Vacant(e) => {
                e.insert(messages);
            }
        }
    }

    /// True if no messages were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The number of paths with at least one message.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The total number of messages across all paths.
    pub fn message_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// The messages recorded at `path`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.errors.get(path).map(Vec::as_slice)
    }

    /// True if any message was recorded at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    /// Iterate over `(path, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Consume the bag, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl fmt::Display for ErrorBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, (path, messages)) in self.iter().enumerate() {
            if n > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", path, messages.join(", "))?;
        }
        Ok(())
    }
}
