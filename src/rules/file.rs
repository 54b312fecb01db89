use super::{Check, Messages, Predicate, Requirement, RuleKind};
use crate::contract::{join, Contract, Field, Flow, Report};
use crate::value::{FileHeader, Value};

/// Rules for uploaded files.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct FileRule {
    pub requirement: Requirement,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub mimes: Vec<String>,
    pub custom: Option<Predicate<FileHeader>>,
    pub messages: Messages,
}

impl FileRule {
    /// Create a rule with no constraints.
    pub fn new() -> FileRule {
        FileRule::default()
    }

    common_builders!(FileHeader);

    /// Smallest allowed size, in bytes.
    pub fn min(mut self, bytes: u64) -> Self {
        self.min = Some(bytes);
        self
    }

    /// Largest allowed size, in bytes.
    pub fn max(mut self, bytes: u64) -> Self {
        self.max = Some(bytes);
        self
    }

    /// The declared content type must be one of these.
    pub fn mimes<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mimes = types.into_iter().map(Into::into).collect();
        self
    }
}

impl Contract for FileRule {
    const KIND: RuleKind = RuleKind::File;

    fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn check(&self, field: &Field<'_>, value: &Value, report: &mut Report<'_>) -> Flow {
        let key = field.key;
        let file = match value {
            Value::File(file) => file,
            _ => return Err(report.halt(Check::Type, format!("{} must be a file", key))),
        };

        if let Some(min) = self.min {
            report.assert(Check::Min, file.size < min, || {
                format!("{} size must be at minimum {} byte(s)", key, min)
            })?;
        }
        if let Some(max) = self.max {
            report.assert(Check::Max, file.size > max, || {
                format!("{} size must be at maximum {} byte(s)", key, max)
            })?;
        }
        if !self.mimes.is_empty() {
            // A file without a declared type never matches.
            let allowed = file
                .content_type
                .as_ref()
                .map_or(false, |ct| self.mimes.iter().any(|m| m.eq_ignore_ascii_case(ct)));
            report.assert(Check::Mimes, !allowed, || {
                format!("{} must be a file of type {}", key, join(&self.mimes))
            })?;
        }

        report.custom(self.custom.as_ref(), file, field)
    }
}
