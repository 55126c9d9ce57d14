use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::TypeMismatch;

/// Signed decimal literal, optionally in scientific notation.
/// Rejects `inf`, `NaN` and hex forms that `f64::from_str` would accept.
const DECIMAL_LITERAL: &str = r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$";

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(DECIMAL_LITERAL).expect("decimal literal pattern is valid"))
}

/// Value type of a schema field, taken from the trailing `_s`/`_d`/`_i` path token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeSuffix {
    /// Free text (`_s`)
    #[default]
    String,
    /// Double precision float (`_d`, `_f`)
    Float,
    /// Signed integer (`_i`, `_l`)
    Integer,
}

impl TypeSuffix {
    /// Map a path suffix token (without the underscore) to a type
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "s" => Some(Self::String),
            "d" | "f" => Some(Self::Float),
            "i" | "l" => Some(Self::Integer),
            _ => None,
        }
    }

    /// Map the free-text "type" cell of a schema table to a type
    pub fn from_declared(cell: &str) -> Option<Self> {
        match cell.trim().to_lowercase().as_str() {
            "string" | "str" | "text" => Some(Self::String),
            "float" | "double" | "decimal" | "number" | "real" => Some(Self::Float),
            "int" | "integer" | "long" => Some(Self::Integer),
            _ => None,
        }
    }

    /// Lowercase type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Float => "float",
            Self::Integer => "integer",
        }
    }
}

impl fmt::Display for TypeSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A leaf value as read from an instance document, before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Textual value
    Text(String),
    /// Numeric value, kept as its literal text so integers never pass through `f64`
    Number(String),
    /// Boolean value
    Bool(bool),
    /// Sequence of values
    List(Vec<RawValue>),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => write!(f, "\"{}\"", text),
            RawValue::Number(literal) => f.write_str(literal),
            RawValue::Bool(value) => write!(f, "{}", value),
            RawValue::List(items) => write!(f, "a list of {} values", items.len()),
        }
    }
}

/// A leaf value after successful coercion to its field type
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    /// String field value
    Text(String),
    /// Float field value
    Float(f64),
    /// Integer field value
    Integer(i64),
}

impl CoercedValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoercedValue::Text(_) => None,
            CoercedValue::Float(value) => Some(*value),
            CoercedValue::Integer(value) => Some(*value as f64),
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercedValue::Text(text) => f.write_str(text),
            CoercedValue::Float(value) => write!(f, "{}", value),
            CoercedValue::Integer(value) => write!(f, "{}", value),
        }
    }
}

/// Coerce a raw instance value to the declared field type.
///
/// - `String` accepts any scalar; numbers and booleans normalize to their text.
/// - `Float` accepts signed decimals, optionally in scientific notation.
/// - `Integer` accepts signed integers, and decimals with no fractional part
///   (`3.0` becomes `3`, `3.5` is rejected).
pub fn coerce(raw: &RawValue, suffix: TypeSuffix) -> Result<CoercedValue, TypeMismatch> {
    let mismatch = || TypeMismatch::new(suffix, raw.to_string());

    match suffix {
        TypeSuffix::String => match raw {
            RawValue::Text(text) => Ok(CoercedValue::Text(text.clone())),
            RawValue::Number(literal) => Ok(CoercedValue::Text(literal.clone())),
            RawValue::Bool(value) => Ok(CoercedValue::Text(value.to_string())),
            RawValue::List(_) => Err(mismatch()),
        },
        TypeSuffix::Float => numeric_literal(raw)
            .and_then(parse_decimal)
            .map(CoercedValue::Float)
            .ok_or_else(mismatch),
        TypeSuffix::Integer => numeric_literal(raw)
            .and_then(parse_integer)
            .map(CoercedValue::Integer)
            .ok_or_else(mismatch),
    }
}

fn numeric_literal(raw: &RawValue) -> Option<&str> {
    match raw {
        RawValue::Text(text) => Some(text.trim()),
        RawValue::Number(literal) => Some(literal.as_str()),
        RawValue::Bool(_) | RawValue::List(_) => None,
    }
}

/// Parse a signed decimal literal; overflow to infinity is rejected
pub(crate) fn parse_decimal(literal: &str) -> Option<f64> {
    if !decimal_pattern().is_match(literal) {
        return None;
    }
    literal.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_integer(literal: &str) -> Option<i64> {
    if let Ok(value) = literal.parse::<i64>() {
        return Some(value);
    }

    // i64::MAX as f64 rounds up to 2^63, hence the exclusive upper bound
    let value = parse_decimal(literal)?;
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
