//! # Report Formatter
//!
//! Renders a violation list for people or for programs.
//!
//! - [`ReportStyle::Human`]: one `<severity>: <path> — <message>` line per
//!   violation; no violations renders as an empty string
//! - [`ReportStyle::Structured`]: a pretty-printed JSON array of
//!   `{path, kind, severity, message}` records, readable back with
//!   [`parse_structured`]
//!
//! [`ValidationReport`] wraps one instance's violations with counts and a
//! PASSED/FAILED footer for terminal output.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::validator::ValidationViolation;

mod error;
mod summary;


pub use error::ReportError;
pub use summary::ValidationReport;

/// Output style of [`format`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// One line per violation
    #[default]
    Human,
    /// JSON array of violation records
    Structured,
}

/// Render violations in the requested style
pub fn format(violations: &[ValidationViolation], style: ReportStyle) -> String {
    match style {
        ReportStyle::Human => violations
            .iter()
            .map(|violation| format!("{}\n", violation))
            .collect(),
        ReportStyle::Structured => {
            let records: Vec<Value> = violations.iter().map(record).collect();
            format!("{:#}", Value::Array(records))
        }
    }
}

/// Read back a report produced with [`ReportStyle::Structured`]
pub fn parse_structured(text: &str) -> Result<Vec<ValidationViolation>, ReportError> {
    Ok(serde_json::from_str(text)?)
}

fn record(violation: &ValidationViolation) -> Value {
    json!({
        "path": violation.path,
        "kind": violation.kind.name(),
        "severity": violation.severity.name(),
        "message": violation.message,
    })
}
