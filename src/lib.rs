//! `treeguard` is a library for validating decoded, JSON-shaped data
//! against a declarative schema.
//!
//! A schema is a tree of rules: each field name is bound to one rule
//! (string, numeric, boolean, file, object, list, or list of objects), or to
//! a nested group of fields. Validation walks the data and the schema
//! together and collects every failure into an [`ErrorBag`], keyed by the
//! dotted path of the failing field (for example `items.0.title`).
//!
//! `treeguard` supports Rust 1.48 and later.
//!
//! # Implementation Details
//!
//! - Data is first translated into a generic [`Value`](crate::value::Value)
//!   tree, so the validation code doesn't depend on the serialization format.
//!   The [`json`] module converts from `serde_json`.
//!
//! - Each rule kind runs the same sequence of checks: required, required-if,
//!   required-unless, type, the kind's own checks, then an optional custom
//!   predicate.
//!
//! - Conditional requirements and custom predicates can look up any field of
//!   the document by path, through a read-only view of the root taken once
//!   per run.
//!
//! - With [`Options::abort_early`] the run stops at the first failure.
//!
//! # Examples
//!
//! ```
//! use treeguard::rules::{ListOfObjectRule, NumericRule, ObjectRule, StringRule};
//! use treeguard::{validate_json_str, Options, Schema};
//!
//! let schema = Schema::new()
//!     .field("name", StringRule::new().required().min(3))
//!     .field(
//!         "information",
//!         ObjectRule::new()
//!             .required()
//!             .item("age", NumericRule::<u32>::new().required_if("name", "Bob")),
//!     )
//!     .field(
//!         "items",
//!         ListOfObjectRule::new().item("title", StringRule::new().required()),
//!     );
//!
//! let json_str = r#"{
//!     "name": "Bob",
//!     "information": { "age": 43 },
//!     "items": [ { "title": "first" } ]
//! }"#;
//! validate_json_str(&schema, json_str, Options::default()).unwrap();
//! ```
//!
//! If the data doesn't match, the error carries every message:
//!
//! ```
//! use treeguard::rules::{ListOfObjectRule, StringRule};
//! use treeguard::{validate_json_str, Options, Schema};
//!
//! let schema = Schema::new().field(
//!     "items",
//!     ListOfObjectRule::new().item("title", StringRule::new().required()),
//! );
//! let json_str = r#"{ "items": [ { "title": "" }, { "title": "ok" } ] }"#;
//!
//! let err = validate_json_str(&schema, json_str, Options::default()).unwrap_err();
//! let bag = err.bag().unwrap();
//! assert_eq!(bag.get("items.0.title").unwrap(), ["title is required"]);
//! assert!(bag.get("items.1.title").is_none());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::cast_possible_truncation)]

pub mod bag;
pub mod condition;
pub mod context;
pub(crate) mod contract;
pub mod json;
pub mod parser;
pub mod path;
pub(crate) mod pattern;
pub mod rules;
pub mod snapshot;
pub mod util;
pub(crate) mod validate;
pub mod value;

#[doc(inline)]
pub use bag::ErrorBag;
#[doc(inline)]
pub use json::{validate_json, validate_json_str};
#[doc(inline)]
pub use rules::Schema;
#[doc(inline)]
pub use util::{ValidateError, ValidateResult};
#[doc(inline)]
pub use validate::{check, validate, Options, SchemaContainer};
