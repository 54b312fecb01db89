//! The protocol shared by every rule kind.
//!
//! [`evaluate`] runs the checks common to all kinds (required, required-if,
//! required-unless) and then hands a present value to the kind's
//! [`Contract::check`], which runs the type check, the kind-specific checks
//! and finally the custom predicate.

use crate::context::{CustomContext, Lookup};
use crate::path::Path;
use crate::rules::{Check, Messages, Predicate, Requirement, RuleKind};
use crate::util::RuleFailure;
use crate::validate::Options;
use crate::value::Value;
use std::fmt::Display;
use tracing::trace;

/// Everything a rule needs to know about the field it is checking.
pub(crate) struct Field<'a> {
    pub key: &'a str,
    /// `None` when the key is missing; `null` counts as missing too.
    pub value: Option<&'a Value>,
    pub path: &'a Path,
    pub lookup: &'a dyn Lookup,
    pub options: Options,
}

impl<'a> Field<'a> {
    fn custom_context(&self) -> CustomContext<'a> {
        CustomContext::new(self.lookup, self.path)
    }
}

/// Returned by a check to stop the remaining checks of a field.
pub(crate) struct Halt;

pub(crate) type Flow = Result<(), Halt>;

/// Collects the messages of one field.
pub(crate) struct Report<'m> {
    messages: Vec<String>,
    overrides: &'m Messages,
    abort_early: bool,
}

impl<'m> Report<'m> {
    pub fn new(overrides: &'m Messages, abort_early: bool) -> Report<'m> {
        Report {
            messages: Vec::new(),
            overrides,
            abort_early,
        }
    }

    /// Record a failure; the override message wins over the default.
    pub fn fail(&mut self, check: Check, default: String) {
        let message = match self.overrides.get(check) {
            Some(m) => m.to_string(),
            None => default,
        };
        self.messages.push(message);
    }

    /// Record a failure if `failed`. With abort-early the field stops here.
    pub fn assert<F>(&mut self, check: Check, failed: bool, default: F) -> Flow
    where
        F: FnOnce() -> String,
    {
        if failed {
            self.fail(check, default());
            if self.abort_early {
                return Err(Halt);
            }
        }
        Ok(())
    }

    /// Record a failure that always stops the field.
    pub fn halt(&mut self, check: Check, default: String) -> Halt {
        self.fail(check, default);
        Halt
    }

    /// Run an optional custom predicate.
    pub fn custom<T: ?Sized>(
        &mut self,
        predicate: Option<&Predicate<T>>,
        value: &T,
        field: &Field<'_>,
    ) -> Flow {
        match predicate {
            Some(p) => match p.call(value, &field.custom_context()) {
                Ok(()) => Ok(()),
                Err(text) => self.assert(Check::Custom, true, || text),
            },
            None => Ok(()),
        }
    }

    fn finish(self, kind: RuleKind, missing: bool) -> Result<(), RuleFailure> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(RuleFailure {
                kind,
                messages: self.messages,
                missing,
            })
        }
    }
}

/// Implemented by each rule kind.
pub(crate) trait Contract {
    const KIND: RuleKind;

    fn requirement(&self) -> &Requirement;

    fn messages(&self) -> &Messages;

    /// Whether a present value counts as empty for the required checks.
    fn is_empty(_value: &Value) -> bool {
        false
    }

    /// Type check, kind-specific checks, then the custom predicate.
    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow;
}

/// Run the full contract of `rule` against one field.
pub(crate) fn evaluate<C: Contract>(rule: &C, field: &Field<'_>) -> Result<(), RuleFailure> {
    let requirement = rule.requirement();
    let mut report = Report::new(rule.messages(), field.options.abort_early);

    let value = field.value.filter(|v| !v.is_null());
    if value.map_or(true, C::is_empty) {
        if requirement.required {
            report.fail(Check::Required, required_message(field.key));
            return report.finish(C::KIND, true);
        }
        if let Some(cond) = &requirement.required_if {
            if cond.matches(field.lookup) {
                report.fail(Check::RequiredIf, required_message(field.key));
                return report.finish(C::KIND, true);
            }
        }
        if let Some(cond) = &requirement.required_unless {
            if !cond.matches(field.lookup) {
                report.fail(Check::RequiredUnless, required_message(field.key));
                return report.finish(C::KIND, true);
            }
        }
    }

    if let Some(value) = value {
        if rule.check(field, value, &mut report).is_err() {
            trace!(path = %field.path, "remaining checks skipped");
        }
    }
    report.finish(C::KIND, false)
}

fn required_message(key: &str) -> String {
    format!("{} is required", key)
}

/// Render a list of allowed values for a message.
pub(crate) fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
