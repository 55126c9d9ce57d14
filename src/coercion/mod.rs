//! # Type Coercion & Constraint Engine
//!
//! Turns raw instance values into typed values according to the field's
//! declared type, and compiles the constraints embedded in free-text field
//! descriptions.
//!
//! ## Type tokens
//!
//! | Suffix | Type | Accepts |
//! |--------|------|---------|
//! | `_s` | string | any scalar, numbers normalized to their text |
//! | `_d`, `_f` | float | signed decimals, optionally scientific |
//! | `_i`, `_l` | integer | signed integers, or decimals without a fraction |
//!
//! ## Description conventions
//!
//! - `[ Ex | Ey | ... ]`: enumeration; a trailing `...` makes it open (advisory)
//! - `[ m ]`, `[ degrees ]`: unit annotation, informational only
//! - `[ 0 to 360 ]`: inclusive numeric range

mod constraints;
mod error;
mod value;

#[cfg(test)]
mod tests;

pub use constraints::{
    extract_enumeration, extract_range, extract_unit, BracketParser, DescriptionParser,
    Enumeration, FieldConstraints, NumericRange,
};
pub use error::TypeMismatch;
pub use value::{coerce, CoercedValue, RawValue, TypeSuffix};
