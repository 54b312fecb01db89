//! Parser error types and related utilities
//!

use std::borrow::Cow;
use thiserror::Error;

/// The "kind" of error generated during field path parsing.
#[non_exhaustive]
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path was empty.
    EmptyPath,
    /// A nonspecific parsing error.
    Unparseable,
}

/// An error that occurred during field path parsing.
#[derive(Debug, Error)]
// thiserror will generate a Display implementation.
#[error("{kind:?}({ctx})")]
pub struct ParseError {
    /// The "kind" of error generated during parsing.
    pub kind: ErrorKind,
    /// A snippet of the input that may be the cause of the error.
    pub ctx: String,
}

// Convert a temporary error into an owned 'static error.
impl From<CowParseError<'_>> for ParseError {
    fn from(err: CowParseError<'_>) -> Self {
        ParseError {
            kind: err.kind,
            // Create an owned String from the Cow<'_, str>
            ctx: err.ctx.into(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct CowParseError<'a> {
    pub kind: ErrorKind,
    /// This may contain either a borrowed 'str or an owned String; transient
    /// errors thrown away by `alt` never allocate.
    pub ctx: Cow<'a, str>,
}

pub(crate) fn parse_error<'a, S: Into<Cow<'a, str>>>(kind: ErrorKind, ctx: S) -> CowParseError<'a> {
    CowParseError {
        kind,
        ctx: ctx.into(),
    }
}

// Used when calling all_consuming() at the end of the parsing process.
impl From<nom::Err<CowParseError<'_>>> for ParseError {
    fn from(e: nom::Err<CowParseError>) -> ParseError {
        match e {
            nom::Err::Incomplete(_) => parse_error(ErrorKind::Unparseable, "Incomplete"),
            nom::Err::Error(pe) => pe,
            nom::Err::Failure(pe) => pe,
        }
        .into()
    }
}

impl<'a, I: Into<Cow<'a, str>>> nom::error::ParseError<I> for CowParseError<'a> {
    fn from_error_kind(input: I, _kind: nom::error::ErrorKind) -> Self {
        parse_error(ErrorKind::Unparseable, input)
    }

    fn append(_input: I, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}
