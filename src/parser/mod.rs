//! This module contains a parser for field path expressions.
//!
//! A field path is a list of segments separated by `.`, such as
//! `information.job.level` or `items.0.title`. A segment made only of
//! digits addresses an array index. A backslash escapes the character that
//! follows it, so `a\.b` is a single segment named `a.b`.
//!
//! # Examples
//!
//! ```
//! use treeguard::parser::parse_path;
//! use treeguard::path::Segment;
//!
//! let path = parse_path("items.0.title").unwrap();
//! assert_eq!(path.segments()[1], Segment::Index(0));
//! ```

mod parse_err;

pub use parse_err::{ErrorKind, ParseError};

use crate::path::{Path, Segment};
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{anychar, char as charx},
    combinator::{all_consuming, map},
    multi::{fold_many1, separated_nonempty_list},
    sequence::preceded,
    IResult,
};
use parse_err::{parse_error, CowParseError};

type JResult<'a, O> = IResult<&'a str, O, CowParseError<'a>>;

// A run of ordinary characters, or one escaped character.
enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
}

fn fragment(input: &str) -> JResult<Fragment> {
    alt((
        map(is_not("\\."), Fragment::Literal),
        map(preceded(charx('\\'), anychar), Fragment::Escaped),
    ))(input)
}

// The text of one segment, with escapes resolved. The flag records whether
// any escape was present, so that `\0` stays a field name.
fn segment_text(input: &str) -> JResult<(String, bool)> {
    fold_many1(
        fragment,
        (String::new(), false),
        |(mut text, escaped), frag| match frag {
            Fragment::Literal(s) => {
                text.push_str(s);
                (text, escaped)
            }
            Fragment::Escaped(c) => {
                text.push(c);
                (text, true)
            }
        },
    )(input)
}

fn segment(input: &str) -> JResult<Segment> {
    map(segment_text, |(text, escaped)| {
        if !escaped && text.bytes().all(|b| b.is_ascii_digit()) {
            // Indices too large for usize can't address anything real;
            // keep them as field names.
            match text.parse::<usize>() {
                Ok(i) => Segment::Index(i),
                Err(_) => Segment::Field(text),
            }
        } else {
            Segment::Field(text)
        }
    })(input)
}

fn segments(input: &str) -> JResult<Vec<Segment>> {
    separated_nonempty_list(charx('.'), segment)(input)
}

/// Parse a field path expression.
pub fn parse_path(input: &str) -> Result<Path, ParseError> {
    if input.is_empty() {
        return Err(parse_error(ErrorKind::EmptyPath, input).into());
    }
    let (_, segments) = all_consuming(segments)(input)?;
    Ok(Path::from_segments(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> Segment {
        Segment::Field(s.into())
    }

    #[test]
    fn parse_simple() {
        let path = parse_path("information.job.level").unwrap();
        assert_eq!(
            path.segments(),
            &[field("information"), field("job"), field("level")]
        );

        let path = parse_path("name").unwrap();
        assert_eq!(path.segments(), &[field("name")]);
    }

    #[test]
    fn parse_index() {
        let path = parse_path("items.12.title").unwrap();
        assert_eq!(
            path.segments(),
            &[field("items"), Segment::Index(12), field("title")]
        );
        // Escaped digits are a field name.
        let path = parse_path(r"items.\12").unwrap();
        assert_eq!(path.segments(), &[field("items"), field("12")]);
    }

    #[test]
    fn parse_escapes() {
        let path = parse_path(r"a\.b.c").unwrap();
        assert_eq!(path.segments(), &[field("a.b"), field("c")]);
        let path = parse_path(r"back\\slash").unwrap();
        assert_eq!(path.segments(), &[field(r"back\slash")]);
    }

    #[test]
    fn parse_failures() {
        let err = parse_path("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyPath);

        let err = parse_path("a..b").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unparseable);

        parse_path(".a").unwrap_err();
        parse_path("a.").unwrap_err();
        parse_path("a\\").unwrap_err();
    }
}
