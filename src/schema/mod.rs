//! # Schema Loader
//!
//! Metadata standards for sensor channels are published as tables: one row
//! per field with a path, an explanation, a type and a requirement level.
//!
//! | Parameter | Explanation | Type | Required |
//! |-----------|-------------|------|----------|
//! | component_s | Component measured [ Ex \| Ey \| ... ] | string | compulsory |
//! | dipole_length_d | Length of dipole [ m ] | float | compulsory |
//! | positive/latitude_d | Latitude of positive electrode [ degrees ] | float | optional |
//!
//! This module compiles such a table into an immutable [`SchemaTree`], a
//! prefix tree keyed by path segment with a [`SchemaField`] at every declared
//! path.
//!
//! ## Compilation Rules
//!
//! - A first row with empty type and requirement cells is a title and is skipped
//! - Paths split on `/`; the terminal segment's type suffix sets the field type
//! - Requirement cells normalize to compulsory / optional / unspecified
//! - Empty path cells and duplicate paths are rejected with [`SchemaParseError`]

mod error;
mod field;
mod loader;
mod table;
mod tree;


pub use error::{SchemaParseError, TableError};
pub use field::{Requirement, SchemaField};
pub use loader::{load, SchemaLoader};
pub use table::{
    delimiter_for_path, read_csv, read_csv_file, read_csv_file_with_delimiter, TableRow,
};
pub use tree::{Fields, SchemaNode, SchemaTree};
