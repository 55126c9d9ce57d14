use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::validator::{is_compliant, Severity, ValidationViolation};

/// Validation outcome of one instance document, for terminal output
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Name of the validated instance (usually its file path)
    pub source: String,
    /// Violations in report order
    pub violations: Vec<ValidationViolation>,
}

impl ValidationReport {
    /// Create a report for the given source
    pub fn new(source: impl Into<String>, violations: Vec<ValidationViolation>) -> Self {
        Self {
            source: source.into(),
            violations,
        }
    }

    /// Count the error-severity violations
    pub fn error_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_error()).count()
    }

    /// Count the warnings
    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    /// True when no violation is an error
    pub fn is_compliant(&self) -> bool {
        is_compliant(&self.violations)
    }

    fn verdict(&self) -> &'static str {
        if !self.is_compliant() {
            "Validation FAILED"
        } else if self.warning_count() > 0 {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Metadata Validation Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("==========================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("Source").bold(), self.source));

            for violation in &self.violations {
                let line = format!(
                    "{} ({}) {}",
                    violation.display_path(),
                    violation.kind,
                    violation.message
                );
                match violation.severity {
                    Severity::Error => {
                        output.push_str(&format!("[{}] {}\n", FAIL, style(line).red()));
                    }
                    Severity::Warning => {
                        output.push_str(&format!("[{}] {}\n", WARN, style(line).yellow()));
                    }
                }
            }

            if !self.violations.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!(
                "{}: {} errors, {} warnings\n\n",
                style("Summary").bold(),
                style(self.error_count()).red(),
                style(self.warning_count()).yellow()
            ));

            let verdict = style(self.verdict()).bold();
            let verdict = if !self.is_compliant() {
                verdict.red()
            } else if self.warning_count() > 0 {
                verdict.yellow()
            } else {
                verdict.green()
            };
            output.push_str(&format!("{}\n", verdict));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metadata Validation Report")?;
        writeln!(f, "==========================")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f)?;

        for violation in &self.violations {
            let symbol = match violation.severity {
                Severity::Error => "✗",
                Severity::Warning => "⚠",
            };
            writeln!(
                f,
                "[{}] {} ({}) {}",
                symbol,
                violation.display_path(),
                violation.kind,
                violation.message
            )?;
        }

        if !self.violations.is_empty() {
            writeln!(f)?;
        }
        writeln!(
            f,
            "Summary: {} errors, {} warnings",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.verdict())
    }
}
