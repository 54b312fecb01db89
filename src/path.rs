//! Field paths.
//!
//! A [`Path`] addresses one position in the data tree. Paths are used as
//! [`ErrorBag`](crate::bag::ErrorBag) keys and to resolve conditional
//! requirements against the root document.

use crate::parser::{parse_path, ParseError};
use std::fmt;
use std::str::FromStr;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A named map field.
    Field(String),
    /// A zero-based array position.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// An ordered sequence of field names and array indices.
///
/// `Display` renders the path dotted (`items.0.title`), which is the form
/// used for error reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, addressing the document root.
    pub fn root() -> Path {
        Path::default()
    }

    /// Build a path from segments.
    pub fn from_segments(segments: Vec<Segment>) -> Path {
        Path { segments }
    }

    /// A new path with a field name appended.
    pub fn child(&self, name: &str) -> Path {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(name.to_string()));
        Path { segments }
    }

    /// A new path with an array index appended.
    pub fn index(&self, index: usize) -> Path {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Path { segments }
    }

    /// The segments of this path.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, segment) in self.segments.iter().enumerate() {
            if n > 0 {
                f.write_str(".")?;
            }
            segment.fmt(f)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

#[test]
fn test_path_render() {
    let path = Path::root().child("items").index(0).child("title");
    assert_eq!(path.to_string(), "items.0.title");
    assert_ne!(
        path.to_string(),
        Path::root().child("items").index(1).child("title").to_string()
    );
    assert_eq!(Path::root().to_string(), "");
    assert!(Path::root().is_root());
}
