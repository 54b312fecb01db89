//! This module defines error and result types.
//!

use crate::bag::ErrorBag;
use crate::parser::ParseError;
use crate::rules::RuleKind;
use std::result::Result;
use thiserror::Error;

/// The error type returned by the validation entry points.
#[rustversion::attr(since(1.40), non_exhaustive)]
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A field path expression could not be parsed.
    ///
    /// Returned by callers that parse paths with
    /// [`parse_path`](crate::parser::parse_path) and propagate with `?`.
    /// Validation itself never fails this way: a condition whose path
    /// doesn't parse treats the field as missing.
    #[error("{0}")]
    ParseError(#[from] ParseError),
    /// The data did not match the schema.
    ///
    /// The [`ErrorBag`] holds every message, keyed by field path.
    #[error("validation failed ({} field(s))", .0.len())]
    Invalid(ErrorBag),
    /// A data value that can't be validated.
    #[error("ValueError({0})")]
    ValueError(String),
}

impl ValidateError {
    /// Returns the collected messages if this error is a validation failure.
    pub fn bag(&self) -> Option<&ErrorBag> {
        match self {
            ValidateError::Invalid(bag) => Some(bag),
            _ => None,
        }
    }
}

/// A failure reported by a single rule.
///
/// The `kind` only matters to the dispatcher; callers see the messages once
/// they have been added to an [`ErrorBag`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} validation failed")]
pub struct RuleFailure {
    /// The kind of rule that failed.
    pub kind: RuleKind,
    /// Messages, in the order the checks ran.
    pub messages: Vec<String>,
    /// True when the field failed because it was required and empty.
    pub missing: bool,
}

/// A validation that doesn't return anything.
pub type ValidateResult = Result<(), ValidateError>;
