//! # Metadata Validation
//!
//! Checks an instance document against a compiled [`SchemaTree`]. Problems
//! are returned as data: validation never fails, and an empty violation list
//! means full compliance.
//!
//! ## Validation Checklist
//!
//! 1. **Schema fields**: every field is looked up in the instance. Missing
//!    compulsory fields, type mismatches, enumeration and range violations
//!    are reported at the field's path.
//! 2. **Unknown fields**: every instance value without a schema field is
//!    reported as a warning, so forward-compatible extensions still validate.
//! 3. **Time groups**: ascii and epoch renditions of the same timestamp must
//!    agree (optional, on by default).
//!
//! Violations are sorted by path segments, then by kind, so repeated runs and
//! other implementations produce identical reports.
//!
//! ## Usage
//!
//! ```rust
//! use mtschema::schema::{load, TableRow};
//! use mtschema::validator::{is_compliant, validate};
//! use serde_json::json;
//!
//! let tree = load(&[
//!     TableRow::new("sensor/type_s", "Sensor type", "string", "compulsory"),
//!     TableRow::new("gain_d", "Amplifier gain", "float", "optional"),
//! ])?;
//!
//! let violations = validate(&tree, &json!({"sensor": {"type": "Ag-AgCl"}}));
//! assert!(violations.is_empty());
//!
//! let violations = validate(&tree, &json!({}));
//! assert!(!is_compliant(&violations));
//! # Ok::<(), mtschema::schema::SchemaParseError>(())
//! ```

use log::debug;

use crate::coercion::coerce;
use crate::instance::InstanceNode;
use crate::path::{self, SuffixConvention};
use crate::schema::{SchemaField, SchemaNode, SchemaTree};

mod time;
mod violation;


pub use violation::{is_compliant, Severity, ValidationViolation, ViolationKind};

/// Switches for the optional checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Check that ascii and epoch time renditions agree
    pub time_consistency: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            time_consistency: true,
        }
    }
}

/// Validate an instance document with the default options
pub fn validate<N: InstanceNode>(tree: &SchemaTree, instance: &N) -> Vec<ValidationViolation> {
    validate_with(tree, instance, &ValidationOptions::default())
}

/// Validate an instance document
pub fn validate_with<N: InstanceNode>(
    tree: &SchemaTree,
    instance: &N,
    options: &ValidationOptions,
) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();

    // 1. Schema fields
    check_schema_fields(tree, instance, &mut violations);

    // 2. Unknown fields
    let mut trail = Vec::new();
    check_unknown_fields(instance, tree.root(), tree.convention(), &mut trail, &mut violations);

    // 3. Time groups
    if options.time_consistency {
        time::check_time_consistency(instance, &mut violations);
    }

    sort_violations(&mut violations);
    debug!(
        "Validated instance against {} fields: {} violations",
        tree.len(),
        violations.len()
    );
    violations
}

/// Validate a batch of instances against one schema, preserving input order.
///
/// With the `parallel` feature the batch is spread over the rayon thread pool.
pub fn validate_many<N: InstanceNode + Sync>(
    tree: &SchemaTree,
    instances: &[N],
    options: &ValidationOptions,
) -> Vec<Vec<ValidationViolation>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        instances
            .par_iter()
            .map(|instance| validate_with(tree, instance, options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        instances
            .iter()
            .map(|instance| validate_with(tree, instance, options))
            .collect()
    }
}

fn check_schema_fields<N: InstanceNode>(
    tree: &SchemaTree,
    instance: &N,
    violations: &mut Vec<ValidationViolation>,
) {
    for field in tree.fields() {
        let resolution = path::resolve_instance(instance, &field.path, tree.convention());

        if resolution.is_ambiguous() {
            violations.push(ValidationViolation::warning(
                field.path.clone(),
                ViolationKind::AmbiguousKey,
                format!(
                    "several instance keys match '{}'; using the first in key order with a value",
                    field.raw_path
                ),
            ));
        }

        match resolution.node().filter(|node| !node.is_null()) {
            Some(node) => check_field_value(field, node, violations),
            None if field.is_compulsory() => {
                violations.push(ValidationViolation::error(
                    field.path.clone(),
                    ViolationKind::MissingCompulsory,
                    format!("compulsory field '{}' is missing", field.raw_path),
                ));
            }
            None => {}
        }
    }
}

fn check_field_value<N: InstanceNode>(
    field: &SchemaField,
    node: &N,
    violations: &mut Vec<ValidationViolation>,
) {
    if !node.is_leaf() {
        violations.push(ValidationViolation::error(
            field.path.clone(),
            ViolationKind::TypeMismatch,
            format!(
                "'{}': expected {}, found a mapping",
                field.raw_path, field.type_suffix
            ),
        ));
        return;
    }

    let Some(raw) = node.raw_value() else {
        return;
    };

    let value = match coerce(&raw, field.type_suffix) {
        Ok(value) => value,
        Err(mismatch) => {
            violations.push(ValidationViolation::error(
                field.path.clone(),
                ViolationKind::TypeMismatch,
                format!("'{}': {}", field.raw_path, mismatch),
            ));
            return;
        }
    };

    if let Some(enumeration) = &field.constraints.enumeration {
        if !enumeration.contains(&value) {
            let message = format!("value '{}' is not one of {}", value, enumeration);
            violations.push(if enumeration.open {
                ValidationViolation::warning(
                    field.path.clone(),
                    ViolationKind::EnumerationViolation,
                    message,
                )
            } else {
                ValidationViolation::error(
                    field.path.clone(),
                    ViolationKind::EnumerationViolation,
                    message,
                )
            });
        }
    }

    if let (Some(range), Some(number)) = (&field.constraints.range, value.as_f64()) {
        if !range.contains(number) {
            violations.push(ValidationViolation::error(
                field.path.clone(),
                ViolationKind::RangeViolation,
                format!("value {} is outside the range {}", value, range),
            ));
        }
    }
}

/// Report instance values that have no schema field. Paths use the
/// instance's own keys. A mapping with no schema counterpart is reported once,
/// at the mapping itself.
fn check_unknown_fields<N: InstanceNode>(
    node: &N,
    schema: &SchemaNode,
    convention: SuffixConvention,
    trail: &mut Vec<String>,
    violations: &mut Vec<ValidationViolation>,
) {
    let mut keys = node.keys();
    keys.sort_unstable();

    for key in keys {
        let Some(child) = node.child(key) else {
            continue;
        };
        let is_leaf = child.is_leaf();
        let schema_child = schema.child(path::match_key(key, is_leaf, convention));

        trail.push(key.to_string());
        match schema_child {
            None => violations.push(ValidationViolation::warning(
                trail.clone(),
                ViolationKind::UnknownField,
                format!("'{}' is not defined by the schema", path::display(trail.as_slice())),
            )),
            Some(schema_child) if is_leaf => {
                if schema_child.field().is_none() {
                    violations.push(ValidationViolation::warning(
                        trail.clone(),
                        ViolationKind::UnknownField,
                        format!(
                            "'{}' is a group in the schema, found a value",
                            path::display(trail.as_slice())
                        ),
                    ));
                }
            }
            // A mapping under a scalar-only field is already a type mismatch
            Some(schema_child) => {
                if !schema_child.is_leaf() {
                    check_unknown_fields(child, schema_child, convention, trail, violations);
                }
            }
        }
        trail.pop();
    }
}

fn sort_violations(violations: &mut [ValidationViolation]) {
    violations.sort_by(|a, b| a.path.cmp(&b.path).then(a.kind.cmp(&b.kind)));
}
