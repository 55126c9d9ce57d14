use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::value::parse_decimal;
use super::CoercedValue;

/// Tokens that mark an enumeration as illustrative rather than exhaustive
const OPEN_MARKERS: [&str; 2] = ["...", "…"];

fn bracket_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[([^\[\]]*)\]").expect("bracket pattern is valid"))
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let number = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";
        Regex::new(&format!(r"^\s*({number})\s*(?:to|\.\.)\s*({number})\s*$"))
            .expect("range pattern is valid")
    })
}

/// Contents of every `[ ... ]` segment of a description, in order
fn bracket_segments(description: &str) -> impl Iterator<Item = &str> {
    bracket_pattern()
        .captures_iter(description)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Set of permitted literal values parsed from a `[ A | B | ... ]` description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enumeration {
    /// Permitted values, case-sensitive as written
    pub values: Vec<String>,
    /// The listing ended in `...`: membership is advisory only
    pub open: bool,
}

impl Enumeration {
    /// Check whether a coerced value is one of the listed values.
    ///
    /// Text compares exactly. Numbers compare numerically against tokens that
    /// parse as numbers, so `7`, `7.0` and `+7` all match a `7` token.
    pub fn contains(&self, value: &CoercedValue) -> bool {
        match value {
            CoercedValue::Text(text) => self.values.iter().any(|v| v == text),
            CoercedValue::Integer(int) => self.values.iter().any(|v| {
                v.parse::<i64>().map_or(false, |token| token == *int)
                    || parse_decimal(v).map_or(false, |token| token == *int as f64)
            }),
            CoercedValue::Float(float) => self
                .values
                .iter()
                .any(|v| parse_decimal(v).map_or(false, |token| token == *float)),
        }
    }

    /// True when the listing is exhaustive
    pub fn is_closed(&self) -> bool {
        !self.open
    }
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}", self.values.join(" | "))?;
        if self.open {
            write!(f, " | ...")?;
        }
        write!(f, " ]")
    }
}

/// Inclusive numeric bounds parsed from a `[ min to max ]` description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl NumericRange {
    /// Inclusive membership test
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

/// Constraints compiled once per schema field from its description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Permitted values
    pub enumeration: Option<Enumeration>,
    /// Unit annotation, reported but never enforced
    pub unit: Option<String>,
    /// Inclusive numeric bounds
    pub range: Option<NumericRange>,
}

impl FieldConstraints {
    /// True when no constraint was found
    pub fn is_empty(&self) -> bool {
        self.enumeration.is_none() && self.unit.is_none() && self.range.is_none()
    }
}

/// Heuristics that pull constraints out of free-text field descriptions.
///
/// The schema loader compiles every description through one of these, so a
/// stricter or locale-specific parser can replace [`BracketParser`] without
/// touching validation.
pub trait DescriptionParser: Send + Sync {
    /// Enumerated values, if the description lists any
    fn enumeration(&self, description: &str) -> Option<Enumeration>;

    /// Unit annotation, if the description carries one
    fn unit(&self, description: &str) -> Option<String>;

    /// Numeric range, if the description states one
    fn range(&self, _description: &str) -> Option<NumericRange> {
        None
    }

    /// All constraints of a description
    fn constraints(&self, description: &str) -> FieldConstraints {
        FieldConstraints {
            enumeration: self.enumeration(description),
            unit: self.unit(description),
            range: self.range(description),
        }
    }
}

/// Default parser for the `[ A | B | ... ]`, `[ unit ]` and `[ min to max ]`
/// bracket conventions used in metadata standard tables
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketParser;

impl DescriptionParser for BracketParser {
    fn enumeration(&self, description: &str) -> Option<Enumeration> {
        let segment = bracket_segments(description).find(|s| s.contains('|'))?;

        let mut open = false;
        let values: Vec<String> = segment
            .split('|')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter(|token| {
                let marker = OPEN_MARKERS.contains(token);
                open |= marker;
                !marker
            })
            .map(str::to_string)
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(Enumeration { values, open })
        }
    }

    fn unit(&self, description: &str) -> Option<String> {
        bracket_segments(description)
            .filter(|s| !s.contains('|') && !range_pattern().is_match(s))
            .map(str::trim)
            .find(|s| !s.is_empty() && !OPEN_MARKERS.contains(s))
            .map(str::to_string)
    }

    fn range(&self, description: &str) -> Option<NumericRange> {
        bracket_segments(description).find_map(|segment| {
            let caps = range_pattern().captures(segment)?;
            let min = parse_decimal(caps.get(1)?.as_str())?;
            let max = parse_decimal(caps.get(2)?.as_str())?;
            (min <= max).then_some(NumericRange { min, max })
        })
    }
}

/// Extract the enumeration of a description with the default [`BracketParser`]
pub fn extract_enumeration(description: &str) -> Option<Enumeration> {
    BracketParser.enumeration(description)
}

/// Extract the unit annotation of a description with the default [`BracketParser`]
pub fn extract_unit(description: &str) -> Option<String> {
    BracketParser.unit(description)
}

/// Extract the numeric range of a description with the default [`BracketParser`]
pub fn extract_range(description: &str) -> Option<NumericRange> {
    BracketParser.range(description)
}
