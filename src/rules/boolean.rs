use super::{Check, Messages, Predicate, Requirement, RuleKind};
use crate::contract::{Contract, Field, Flow, Report};
use crate::value::Value;

/// Rules for `true` / `false` values.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct BooleanRule {
    pub requirement: Requirement,
    pub custom: Option<Predicate<bool>>,
    pub messages: Messages,
}

impl BooleanRule {
    /// Create a rule with no constraints.
    pub fn new() -> BooleanRule {
        BooleanRule::default()
    }

    common_builders!(bool);
}

impl Contract for BooleanRule {
    const KIND: RuleKind = RuleKind::Boolean;

    fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow {
        match value {
            Value::Bool(b) => report.custom(self.custom.as_ref(), b, field),
            _ => Err(report.halt(
                Check::Type,
                format!("{} must be type of boolean", field.key),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::run;
    use crate::validate::Options;

    #[test]
    fn boolean() {
        let rule = BooleanRule::new().required();
        assert_eq!(run(&rule, None, Options::default()), ["test is required"]);
        assert_eq!(
            run(&rule, Some(&Value::Null), Options::default()),
            ["test is required"]
        );
        // false is a value.
        assert!(run(&rule, Some(&Value::Bool(false)), Options::default()).is_empty());
        assert_eq!(
            run(&rule, Some(&Value::Text("true".into())), Options::default()),
            ["test must be type of boolean"]
        );
    }

    #[test]
    fn custom() {
        let rule = BooleanRule::new().custom(|b, _| {
            if *b {
                Ok(())
            } else {
                Err("terms must be accepted".into())
            }
        });
        assert_eq!(
            run(&rule, Some(&Value::Bool(false)), Options::default()),
            ["terms must be accepted"]
        );
    }
}
