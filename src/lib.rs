//! # mtschema - Metadata Schema Validation
//!
//! `mtschema` validates hierarchical metadata records (the key/value
//! descriptions attached to sensor channels, stations and surveys) against
//! schemas published as tables.
//!
//! ## Key Features
//!
//! - **Table-Driven Schemas**: one CSV/TSV row per field, with a `/`-separated
//!   path, a free-text explanation, a type and a requirement level.
//!
//! - **Typed Paths**: `_s`, `_d` and `_i` suffixes (plus the older `_f`/`_l`)
//!   declare string, float and integer fields. Instances may keep or drop the
//!   suffix.
//!
//! - **Constraints From Prose**: `[ A | B | ... ]` enumerations, `[ unit ]`
//!   annotations and `[ min to max ]` ranges are compiled from descriptions.
//!
//! - **Violations As Data**: validation never fails. It returns a sorted,
//!   deterministic list of errors and warnings, rendered for people or as JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use mtschema::prelude::*;
//! use serde_json::json;
//!
//! let table = "\
//! Parameter,Explanation,Type,Compulsory/Optional
//! sensor/type_s,Sensor type,string,compulsory
//! channel_num_i,Channel number [ 1 | 2 | 3 | 4 | 5 | 6 | ... ],integer,compulsory
//! ";
//! let tree = load(&read_csv(table.as_bytes(), b',')?)?;
//!
//! let instance = json!({"sensor": {"type": "Ag-AgCl"}, "channel_num": 7});
//! let violations = validate(&tree, &instance);
//!
//! // 7 is outside the illustrative enumeration: a warning, still compliant
//! assert!(is_compliant(&violations));
//! print!("{}", format(&violations, ReportStyle::Human));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod coercion;
pub mod instance;
pub mod path;
pub mod report;
pub mod schema;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::coercion::{coerce, CoercedValue, FieldConstraints, RawValue, TypeSuffix};
    pub use crate::instance::{InstanceError, InstanceNode};
    pub use crate::path::SuffixConvention;
    pub use crate::report::{format, parse_structured, ReportStyle, ValidationReport};
    pub use crate::schema::{
        load, read_csv, read_csv_file, Requirement, SchemaField, SchemaLoader, SchemaParseError,
        SchemaTree, TableRow,
    };
    pub use crate::validator::{
        is_compliant, validate, validate_with, Severity, ValidationOptions, ValidationViolation,
        ViolationKind,
    };
}
