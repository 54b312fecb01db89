use super::{Check, Messages, Predicate, Requirement, RuleKind};
use crate::contract::{join, Contract, Field, Flow, Report};
use crate::pattern;
use crate::value::Value;

/// Which URL schemes a string may use. With neither set, both are allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlSchemes {
    /// Allow `http://`.
    pub http: bool,
    /// Allow `https://`.
    pub https: bool,
}

impl UrlSchemes {
    fn prefixes(self) -> Vec<&'static str> {
        let mut prefixes = Vec::new();
        if self.http {
            prefixes.push("http");
        }
        if self.https {
            prefixes.push("https");
        }
        if prefixes.is_empty() {
            prefixes = vec!["http", "https"];
        }
        prefixes
    }
}

/// Rules for text values.
///
/// Lengths count characters, not bytes. Pattern, membership and format
/// checks don't apply to the empty string.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct StringRule {
    pub requirement: Requirement,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub regex: Option<String>,
    pub not_regex: Option<String>,
    pub one_of: Vec<String>,
    pub none_of: Vec<String>,
    pub email: bool,
    pub alpha: bool,
    pub alpha_numeric: bool,
    pub url: Option<UrlSchemes>,
    pub custom: Option<Predicate<str>>,
    pub messages: Messages,
}

impl StringRule {
    /// Create a rule with no constraints.
    pub fn new() -> StringRule {
        StringRule::default()
    }

    common_builders!(str);

    /// Minimum length in characters.
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// The value must match this pattern.
    pub fn regex<S: Into<String>>(mut self, pattern: S) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    /// The value must not match this pattern.
    pub fn not_regex<S: Into<String>>(mut self, pattern: S) -> Self {
        self.not_regex = Some(pattern.into());
        self
    }

    /// The value must be one of these.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = values.into_iter().map(Into::into).collect();
        self
    }

    /// The value must not be any of these.
    pub fn none_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.none_of = values.into_iter().map(Into::into).collect();
        self
    }

    /// The value must look like an email address.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// The value must contain only ASCII letters.
    pub fn alpha(mut self) -> Self {
        self.alpha = true;
        self
    }

    /// The value must contain only ASCII letters and digits.
    pub fn alpha_numeric(mut self) -> Self {
        self.alpha_numeric = true;
        self
    }

    /// The value must be an `http` or `https` URL.
    pub fn url(self) -> Self {
        self.url_schemes(UrlSchemes::default())
    }

    /// The value must be a URL with one of the selected schemes.
    pub fn url_schemes(mut self, schemes: UrlSchemes) -> Self {
        self.url = Some(schemes);
        self
    }
}

impl Contract for StringRule {
    const KIND: RuleKind = RuleKind::String;

    fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn is_empty(value: &Value) -> bool {
        matches!(value, Value::Text(t) if t.is_empty())
    }

    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow {
        let key = field.key;
        let text = match value {
            Value::Text(t) => t.as_str(),
            _ => {
                return Err(report.halt(Check::Type, format!("{} must be type of string", key)));
            }
        };
        let length = text.chars().count();

        if let Some(min) = self.min {
            report.assert(Check::Min, length < min, || {
                format!("{} must be minimum of {} character(s)", key, min)
            })?;
        }
        if let Some(max) = self.max {
            report.assert(Check::Max, length > max, || {
                format!("{} must be maximum of {} character(s)", key, max)
            })?;
        }

        if !text.is_empty() {
            if let Some(re) = &self.regex {
                report.assert(
                    Check::Regex,
                    pattern::matches(re, text) != Some(true),
                    || format!("{} is not a valid format", key),
                )?;
            }
            if let Some(re) = &self.not_regex {
                report.assert(
                    Check::NotRegex,
                    pattern::matches(re, text) != Some(false),
                    || format!("{} is not a valid format", key),
                )?;
            }
            if !self.one_of.is_empty() {
                report.assert(
                    Check::In,
                    !self.one_of.iter().any(|s| s == text),
                    || format!("{} must be one of {}", key, join(&self.one_of)),
                )?;
            }
            if !self.none_of.is_empty() {
                report.assert(
                    Check::NotIn,
                    self.none_of.iter().any(|s| s == text),
                    || format!("{} must not be one of {}", key, join(&self.none_of)),
                )?;
            }
            if self.email {
                report.assert(
                    Check::Email,
                    pattern::matches(pattern::EMAIL, text) != Some(true),
                    || format!("{} is not a valid email", key),
                )?;
            }
            if self.alpha {
                report.assert(
                    Check::Alpha,
                    pattern::matches(pattern::ALPHA, text) != Some(true),
                    || format!("{} is not an alphabetic value", key),
                )?;
            }
            if self.alpha_numeric {
                report.assert(
                    Check::AlphaNumeric,
                    pattern::matches(pattern::ALPHA_NUMERIC, text) != Some(true),
                    || format!("{} is not an alphanumeric value", key),
                )?;
            }
            if let Some(schemes) = self.url {
                let re = pattern::url(&schemes.prefixes());
                report.assert(
                    Check::Url,
                    pattern::matches(&re, text) != Some(true),
                    || format!("{} is not a valid url", key),
                )?;
            }
        }

        report.custom(self.custom.as_ref(), text, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::run;
    use crate::validate::Options;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn all() -> Options {
        Options::default()
    }

    #[test]
    fn required() {
        let rule = StringRule::new().required();
        assert_eq!(run(&rule, None, all()), ["test is required"]);
        assert_eq!(run(&rule, Some(&text("")), all()), ["test is required"]);
        assert!(run(&rule, Some(&text("x")), all()).is_empty());
    }

    #[test]
    fn required_hides_other_checks() {
        let rule = StringRule::new().required().min(10).email();
        assert_eq!(run(&rule, Some(&text("")), all()), ["test is required"]);
    }

    #[test]
    fn value_type() {
        let rule = StringRule::new().required().min(2);
        assert_eq!(
            run(&rule, Some(&Value::Integer(123)), all()),
            ["test must be type of string"]
        );
    }

    #[test]
    fn lengths() {
        let rule = StringRule::new().min(2).max(4);
        assert_eq!(
            run(&rule, Some(&text("x")), all()),
            ["test must be minimum of 2 character(s)"]
        );
        assert_eq!(
            run(&rule, Some(&text("xxxxx")), all()),
            ["test must be maximum of 4 character(s)"]
        );
        // Characters, not bytes.
        assert!(run(&rule, Some(&text("水水水")), all()).is_empty());
    }

    #[test]
    fn patterns() {
        let rule = StringRule::new().regex("^p([a-z]+)ch$");
        assert!(run(&rule, Some(&text("peach")), all()).is_empty());
        assert_eq!(
            run(&rule, Some(&text("ada")), all()),
            ["test is not a valid format"]
        );
        // Empty strings skip pattern checks.
        assert!(run(&rule, Some(&text("")), all()).is_empty());

        let rule = StringRule::new().not_regex("[0-9]");
        assert!(run(&rule, Some(&text("abc")), all()).is_empty());
        assert_eq!(
            run(&rule, Some(&text("abc1")), all()),
            ["test is not a valid format"]
        );

        // A pattern that doesn't compile always fails.
        let rule = StringRule::new().regex("p([a-z]+ch");
        assert_eq!(
            run(&rule, Some(&text("peach")), all()),
            ["test is not a valid format"]
        );
    }

    #[test]
    fn membership() {
        let rule = StringRule::new().one_of(vec!["red", "green"]);
        assert!(run(&rule, Some(&text("red")), all()).is_empty());
        assert_eq!(
            run(&rule, Some(&text("blue")), all()),
            ["test must be one of red, green"]
        );

        let rule = StringRule::new().none_of(vec!["admin"]);
        assert!(run(&rule, Some(&text("tono")), all()).is_empty());
        assert_eq!(
            run(&rule, Some(&text("admin")), all()),
            ["test must not be one of admin"]
        );
    }

    #[test]
    fn formats() {
        let rule = StringRule::new().email();
        assert!(run(&rule, Some(&text("tono@example.com")), all()).is_empty());
        assert_eq!(
            run(&rule, Some(&text("tono")), all()),
            ["test is not a valid email"]
        );

        let rule = StringRule::new().alpha();
        assert_eq!(
            run(&rule, Some(&text("abc1")), all()),
            ["test is not an alphabetic value"]
        );

        let rule = StringRule::new().alpha_numeric();
        assert_eq!(
            run(&rule, Some(&text("abc 1")), all()),
            ["test is not an alphanumeric value"]
        );

        let rule = StringRule::new().url_schemes(UrlSchemes {
            http: false,
            https: true,
        });
        assert!(run(&rule, Some(&text("https://www.ada.com")), all()).is_empty());
        assert_eq!(
            run(&rule, Some(&text("http://www.ada.com")), all()),
            ["test is not a valid url"]
        );
    }

    #[test]
    fn collects_or_stops() {
        // Checks run in a fixed order, not in builder order.
        let rule = StringRule::new().min(5).alpha().email();
        assert_eq!(
            run(&rule, Some(&text("a1")), all()),
            [
                "test must be minimum of 5 character(s)",
                "test is not a valid email",
                "test is not an alphabetic value",
            ]
        );
        assert_eq!(
            run(&rule, Some(&text("a1")), Options::abort_early()),
            ["test must be minimum of 5 character(s)"]
        );
    }

    #[test]
    fn override_messages() {
        let rule = StringRule::new()
            .required()
            .min(3)
            .message(Check::Required, "name dibutuhkan")
            .message(Check::Min, "too short");
        assert_eq!(run(&rule, None, all()), ["name dibutuhkan"]);
        assert_eq!(run(&rule, Some(&text("ab")), all()), ["too short"]);
    }

    #[test]
    fn custom_predicate() {
        let rule = StringRule::new().custom(|s, ctx| {
            if s.starts_with("x") {
                Ok(())
            } else {
                Err(format!("{} must start with x", ctx.path()))
            }
        });
        assert!(run(&rule, Some(&text("xyz")), all()).is_empty());
        assert_eq!(
            run(&rule, Some(&text("abc")), all()),
            ["test must start with x"]
        );

        let rule = rule.message(Check::Custom, "bad value");
        assert_eq!(run(&rule, Some(&text("abc")), all()), ["bad value"]);
    }
}
