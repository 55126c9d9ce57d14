use serde::{Deserialize, Serialize};
use std::fmt;

use crate::path;

/// How serious a violation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The instance fails compliance
    Error,
    /// Advisory; does not fail compliance by itself
    Warning,
}

impl Severity {
    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What kind of discrepancy a violation reports.
///
/// Variants are declared in alphabetical order of their serialized names so
/// that the derived ordering matches a plain string sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// Several instance keys normalize to the same schema path
    AmbiguousKey,
    /// Value is not one of the enumerated values
    EnumerationViolation,
    /// A compulsory field is absent or null
    MissingCompulsory,
    /// Numeric value outside the declared range
    RangeViolation,
    /// Ascii and epoch renditions of a time disagree
    TimeInconsistency,
    /// Value cannot be coerced to the field type
    TypeMismatch,
    /// Instance value with no schema field
    UnknownField,
}

impl ViolationKind {
    /// Serialized (camelCase) name
    pub fn name(&self) -> &'static str {
        match self {
            ViolationKind::AmbiguousKey => "ambiguousKey",
            ViolationKind::EnumerationViolation => "enumerationViolation",
            ViolationKind::MissingCompulsory => "missingCompulsory",
            ViolationKind::RangeViolation => "rangeViolation",
            ViolationKind::TimeInconsistency => "timeInconsistency",
            ViolationKind::TypeMismatch => "typeMismatch",
            ViolationKind::UnknownField => "unknownField",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One discrepancy between an instance document and a schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Path segments of the offending field
    pub path: Vec<String>,
    /// Kind of discrepancy
    pub kind: ViolationKind,
    /// Error or warning
    pub severity: Severity,
    /// Human-readable explanation
    pub message: String,
}

impl ValidationViolation {
    /// Create a violation
    pub fn new(
        path: Vec<String>,
        kind: ViolationKind,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            kind,
            severity,
            message: message.into(),
        }
    }

    pub(crate) fn error(path: Vec<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::new(path, kind, Severity::Error, message)
    }

    pub(crate) fn warning(
        path: Vec<String>,
        kind: ViolationKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(path, kind, Severity::Warning, message)
    }

    /// True for error-severity violations
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Path joined with `/`
    pub fn display_path(&self) -> String {
        path::display(&self.path)
    }
}

impl fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} — {}", self.severity, self.display_path(), self.message)
    }
}

/// An instance is compliant when no violation has error severity
pub fn is_compliant(violations: &[ValidationViolation]) -> bool {
    !violations.iter().any(ValidationViolation::is_error)
}
