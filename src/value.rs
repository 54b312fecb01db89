//! This module declares a generic Value enum for use with validation.

use std::collections::BTreeMap;
use std::fmt;

use float_ord::FloatOrd;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A map of field names to values.
pub type ValueMap = BTreeMap<String, Value>;

/// `Value` represents all the types of data we can validate.
///
/// To validate a new type of data, write implementations of the `From`
/// or `TryFrom` trait for that type.  See the [`json`] module for an example.
///
/// [`json`]: crate::json
///
#[derive(Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i128),
    Float(FloatOrd<f64>),
    Text(String),
    Array(Vec<Value>),
    Map(ValueMap),
    File(FileHeader),
}

/// Metadata describing an uploaded file.
///
/// JSON never decodes into a file; callers that validate multipart form
/// data build these by hand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileHeader {
    /// The client-supplied file name.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// The declared MIME type, if any.
    pub content_type: Option<String>,
}

impl FileHeader {
    /// Create a new `FileHeader`.
    pub fn new<S: Into<String>>(filename: S, size: u64) -> FileHeader {
        FileHeader {
            filename: filename.into(),
            size,
            content_type: None,
        }
    }

    /// Set the declared MIME type.
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> FileHeader {
        self.content_type = Some(content_type.into());
        self
    }
}

// FloatOrd doesn't implement Debug, so we have to do all the work by hand.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(x) => x.fmt(f),
            Value::Integer(x) => x.fmt(f),
            Value::Float(x) => x.0.fmt(f),
            Value::Text(x) => x.fmt(f),
            Value::Array(x) => x.fmt(f),
            Value::Map(x) => x.fmt(f),
            Value::File(x) => x.fmt(f),
        }
    }
}

impl Value {
    /// Create a floating-point value.
    pub fn from_float<F: Into<f64>>(f: F) -> Value {
        Value::Float(FloatOrd(f.into()))
    }

    /// True if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the map, if this is a map.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Borrow the elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Borrow the text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// A short name for the type of this value, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Array(_) => "list",
            Value::Map(_) => "object",
            Value::File(_) => "file",
        }
    }
}

impl From<FileHeader> for Value {
    fn from(file: FileHeader) -> Value {
        Value::File(file)
    }
}

// Serialization is used to render containers as text when they are the
// target of a conditional comparison.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i128(*i),
            Value::Float(f) => serializer.serialize_f64(f.0),
            Value::Text(t) => serializer.serialize_str(t),
            Value::Array(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for element in a {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::File(file) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("filename", &file.filename)?;
                map.serialize_entry("size", &file.size)?;
                map.serialize_entry("content_type", &file.content_type)?;
                map.end()
            }
        }
    }
}

#[test]
fn test_type_name() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::from_float(1.5).type_name(), "float");
    assert_eq!(Value::Array(vec![]).type_name(), "list");
    assert_eq!(Value::from(FileHeader::new("a.png", 1)).type_name(), "file");
}
