//! # Instance Documents
//!
//! Candidate metadata records are nested key/value mappings. Validation only
//! needs a small capability interface, [`InstanceNode`], which is implemented
//! for `serde_json::Value` and `toml::Value`. Other document models plug in by
//! implementing the same four methods.

use std::path::Path;

use crate::coercion::RawValue;

mod error;
mod flat;
mod json;
mod toml_doc;

pub use error::InstanceError;
pub use flat::unflatten;

/// Read-only view of one node of an instance document
pub trait InstanceNode {
    /// Child of a mapping node by exact key
    fn child(&self, key: &str) -> Option<&Self>;

    /// Keys of a mapping node; empty for leaves
    fn keys(&self) -> Vec<&str>;

    /// True for anything that is not a mapping
    fn is_leaf(&self) -> bool;

    /// Leaf value as raw text/number; `None` for null and for mappings
    fn raw_value(&self) -> Option<RawValue>;

    /// A null leaf counts as an absent value
    fn is_null(&self) -> bool {
        self.is_leaf() && self.raw_value().is_none()
    }
}

/// Parse a JSON instance document; the root must be an object
pub fn from_json_str(content: &str) -> Result<serde_json::Value, InstanceError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(InstanceError::NotAMapping(json_kind(&value).to_string()));
    }
    Ok(value)
}

/// Parse a flat, slash-keyed JSON record and expand it into a nested document
pub fn from_flat_json_str(content: &str) -> Result<serde_json::Value, InstanceError> {
    match from_json_str(content)? {
        serde_json::Value::Object(map) => unflatten(&map),
        other => Err(InstanceError::NotAMapping(json_kind(&other).to_string())),
    }
}

/// Parse a TOML instance document
pub fn from_toml_str(content: &str) -> Result<toml::Value, InstanceError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(toml::Value::Table(table))
}

/// Load a JSON instance document from disk
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<serde_json::Value, InstanceError> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
