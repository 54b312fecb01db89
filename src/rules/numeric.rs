use super::{Check, Messages, Predicate, Requirement, RuleKind};
use crate::contract::{evaluate, join, Contract, Field, Flow, Report};
use crate::pattern;
use crate::util::RuleFailure;
use crate::value::Value;
use std::convert::TryFrom;
use std::fmt;

/// A numeric representation that a [`NumericRule`] can be parameterized
/// over.
///
/// The canonical decimal form used by digit counting and pattern checks is
/// the type's `Display` output.
pub trait Number:
    Copy + PartialEq + PartialOrd + Default + fmt::Display + fmt::Debug + Send + Sync + 'static
{
    /// The type name used in messages.
    const NAME: &'static str;

    /// Extract a value of this type, if the value has a compatible shape.
    fn from_value(value: &Value) -> Option<Self>;

    #[doc(hidden)]
    fn wrap(rule: NumericRule<Self>) -> NumericKind;
}

macro_rules! integer_number {
    ($($t:ident => $variant:ident),*) => {
        $(
            impl Number for $t {
                const NAME: &'static str = stringify!($t);

                // Integers that don't fit are a type mismatch.
                fn from_value(value: &Value) -> Option<$t> {
                    match value {
                        Value::Integer(i) => <$t>::try_from(*i).ok(),
                        _ => None,
                    }
                }

                fn wrap(rule: NumericRule<$t>) -> NumericKind {
                    NumericKind::$variant(rule)
                }
            }
        )*
    };
}

integer_number!(i32 => I32, i64 => I64, u32 => U32, u64 => U64);

// Float rules accept any number.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
impl Number for f64 {
    const NAME: &'static str = "f64";

    fn from_value(value: &Value) -> Option<f64> {
        match value {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    fn wrap(rule: NumericRule<f64>) -> NumericKind {
        NumericKind::F64(rule)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
impl Number for f32 {
    const NAME: &'static str = "f32";

    fn from_value(value: &Value) -> Option<f32> {
        match value {
            Value::Integer(i) => Some(*i as f32),
            Value::Float(f) => Some(f.0 as f32),
            _ => None,
        }
    }

    fn wrap(rule: NumericRule<f32>) -> NumericKind {
        NumericKind::F32(rule)
    }
}

/// Count the digits of a canonical decimal string.
///
/// The sign and the fractional point are not digits.
pub(crate) fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

/// Rules for numbers of type `T`.
///
/// Integer rules accept integers that fit in `T`; float rules accept any
/// number.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct NumericRule<T> {
    pub requirement: Requirement,
    pub min: Option<T>,
    pub max: Option<T>,
    pub min_digits: Option<usize>,
    pub max_digits: Option<usize>,
    pub regex: Option<String>,
    pub not_regex: Option<String>,
    pub one_of: Vec<T>,
    pub none_of: Vec<T>,
    pub custom: Option<Predicate<T>>,
    pub messages: Messages,
}

impl<T: Number> NumericRule<T> {
    /// Create a rule with no constraints.
    pub fn new() -> NumericRule<T> {
        NumericRule {
            requirement: Requirement::default(),
            min: None,
            max: None,
            min_digits: None,
            max_digits: None,
            regex: None,
            not_regex: None,
            one_of: Vec::new(),
            none_of: Vec::new(),
            custom: None,
            messages: Messages::default(),
        }
    }

    common_builders!(T);

    /// Smallest allowed value.
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Largest allowed value.
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    /// Fewest allowed digits.
    pub fn min_digits(mut self, digits: usize) -> Self {
        self.min_digits = Some(digits);
        self
    }

    /// Most allowed digits.
    pub fn max_digits(mut self, digits: usize) -> Self {
        self.max_digits = Some(digits);
        self
    }

    /// The decimal form must match this pattern.
    pub fn regex<S: Into<String>>(mut self, pattern: S) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    /// The decimal form must not match this pattern.
    pub fn not_regex<S: Into<String>>(mut self, pattern: S) -> Self {
        self.not_regex = Some(pattern.into());
        self
    }

    /// The value must be one of these.
    pub fn one_of<I: IntoIterator<Item = T>>(mut self, values: I) -> Self {
        self.one_of = values.into_iter().collect();
        self
    }

    /// The value must not be any of these.
    pub fn none_of<I: IntoIterator<Item = T>>(mut self, values: I) -> Self {
        self.none_of = values.into_iter().collect();
        self
    }
}

impl<T: Number> Contract for NumericRule<T> {
    const KIND: RuleKind = RuleKind::Numeric;

    fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow {
        let key = field.key;
        let n = match T::from_value(value) {
            Some(n) => n,
            None => {
                return Err(report.halt(
                    Check::Type,
                    format!("{} must be type of {}", key, T::NAME),
                ));
            }
        };

        if let Some(min) = self.min {
            report.assert(Check::Min, n < min, || {
                format!("{} must be minimum of {}", key, min)
            })?;
        }
        if let Some(max) = self.max {
            report.assert(Check::Max, n > max, || {
                format!("{} must be maximum of {}", key, max)
            })?;
        }

        let text = n.to_string();
        let digits = digit_count(&text);
        if let Some(min) = self.min_digits {
            report.assert(Check::MinDigits, digits < min, || {
                format!("{} must be minimum of {} digit(s)", key, min)
            })?;
        }
        if let Some(max) = self.max_digits {
            report.assert(Check::MaxDigits, digits > max, || {
                format!("{} must be maximum of {} digit(s)", key, max)
            })?;
        }
        if let Some(re) = &self.regex {
            report.assert(
                Check::Regex,
                pattern::matches(re, &text) != Some(true),
                || format!("{} is not a valid format", key),
            )?;
        }
        if let Some(re) = &self.not_regex {
            report.assert(
                Check::NotRegex,
                pattern::matches(re, &text) != Some(false),
                || format!("{} is not a valid format", key),
            )?;
        }
        if !self.one_of.is_empty() {
            report.assert(Check::In, !self.one_of.contains(&n), || {
                format!("{} must be one of {}", key, join(&self.one_of))
            })?;
        }
        if !self.none_of.is_empty() {
            report.assert(Check::NotIn, self.none_of.contains(&n), || {
                format!("{} must not be one of {}", key, join(&self.none_of))
            })?;
        }

        report.custom(self.custom.as_ref(), &n, field)
    }
}

/// A [`NumericRule`] for one of the supported number types.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum NumericKind {
    I32(NumericRule<i32>),
    I64(NumericRule<i64>),
    U32(NumericRule<u32>),
    U64(NumericRule<u64>),
    F32(NumericRule<f32>),
    F64(NumericRule<f64>),
}

impl NumericKind {
    pub(crate) fn evaluate(&self, field: &Field<'_>) -> Result<(), RuleFailure> {
        match self {
            NumericKind::I32(r) => evaluate(r, field),
            NumericKind::I64(r) => evaluate(r, field),
            NumericKind::U32(r) => evaluate(r, field),
            NumericKind::U64(r) => evaluate(r, field),
            NumericKind::F32(r) => evaluate(r, field),
            NumericKind::F64(r) => evaluate(r, field),
        }
    }
}
