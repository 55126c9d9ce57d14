//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file. Command-line flags take precedence:
//!
//! ```toml
//! # mtschema.toml
//! [schema]
//! suffix_convention = "strip"
//! delimiter = ","
//!
//! [validation]
//! time_consistency = true
//! flat = false
//!
//! [report]
//! format = "summary"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mtschema::path::SuffixConvention;

use super::FormatArg;

/// Root configuration structure for mtschema.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// How schema tables are read and compiled.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Optional validation checks and instance layout.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Report output.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Configuration for schema loading.
#[derive(Debug, Default, Deserialize)]
pub struct SchemaConfig {
    /// Key matching convention ("strip" or "keep").
    pub suffix_convention: Option<SuffixConvention>,

    /// Field delimiter of schema tables.
    pub delimiter: Option<char>,
}

/// Configuration for the validate command.
#[derive(Debug, Default, Deserialize)]
pub struct ValidationConfig {
    /// Check ascii/epoch time groups.
    pub time_consistency: Option<bool>,

    /// JSON instances are flat slash-keyed records.
    pub flat: Option<bool>,
}

/// Configuration for report output.
#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    /// Output format ("human", "structured" or "summary").
    pub format: Option<FormatArg>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [schema]
            suffix_convention = "keep"
            delimiter = ";"

            [validation]
            time_consistency = false
            flat = true

            [report]
            format = "structured"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.schema.suffix_convention, Some(SuffixConvention::Keep));
        assert_eq!(config.schema.delimiter, Some(';'));
        assert_eq!(config.validation.time_consistency, Some(false));
        assert_eq!(config.validation.flat, Some(true));
        assert_eq!(config.report.format, Some(FormatArg::Structured));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [report]
            format = "summary"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.report.format, Some(FormatArg::Summary));
        assert_eq!(config.schema.suffix_convention, None);
        assert_eq!(config.validation.flat, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.schema.delimiter, None);
        assert_eq!(config.report.format, None);
    }

    #[test]
    fn test_invalid_convention_rejected() {
        let toml = r#"
            [schema]
            suffix_convention = "sometimes"
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
