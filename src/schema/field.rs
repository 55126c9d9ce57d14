use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coercion::{FieldConstraints, TypeSuffix};
use crate::path;

/// Requirement level of a schema field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    /// Must be present and valid for the instance to be compliant
    Compulsory,
    /// May be omitted
    Optional,
    /// The table leaves the level blank
    #[default]
    Unspecified,
}

impl Requirement {
    /// Normalize a requirement cell (case-insensitive; blank is `Unspecified`)
    pub fn parse(cell: &str) -> Self {
        match cell.trim().to_lowercase().as_str() {
            "compulsory" | "required" | "mandatory" | "yes" => Requirement::Compulsory,
            "optional" | "no" => Requirement::Optional,
            "" => Requirement::Unspecified,
            other => {
                warn!("Unrecognized requirement level '{}', treating as unspecified", other);
                Requirement::Unspecified
            }
        }
    }

    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Requirement::Compulsory => "compulsory",
            Requirement::Optional => "optional",
            Requirement::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One compiled row of a schema table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Match-key segments, e.g. `["positive", "latitude"]`
    pub path: Vec<String>,

    /// Path cell as written, used for display (e.g. `positive/latitude_d`)
    pub raw_path: String,

    /// Value type inferred from the path suffix or the type cell
    pub type_suffix: TypeSuffix,

    /// Type cell as written (trimmed)
    pub declared_type: String,

    /// Explanation text with whitespace normalized
    pub description: String,

    /// Requirement level
    pub requirement: Requirement,

    /// Constraints compiled from the description
    pub constraints: FieldConstraints,

    /// 1-based row number in the source table
    pub row: usize,
}

impl SchemaField {
    /// True for compulsory fields
    pub fn is_compulsory(&self) -> bool {
        self.requirement == Requirement::Compulsory
    }

    /// Path joined with `/`
    pub fn display_path(&self) -> String {
        path::display(&self.path)
    }
}
