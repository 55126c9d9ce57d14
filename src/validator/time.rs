//! Cross-field check for time groups.
//!
//! Acquisition tables store each timestamp twice, as an ISO-8601 string
//! (`ascii_s`) and as epoch seconds (`epoch_l`, with optional
//! `micro_seconds_i`). When both renditions are present they must agree.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::coercion::{coerce, CoercedValue, RawValue, TypeSuffix};
use crate::instance::InstanceNode;
use crate::path;

use super::{ValidationViolation, ViolationKind};

const ASCII_KEY: &str = "ascii";
const EPOCH_KEY: &str = "epoch";
const MICROS_KEY: &str = "micro_seconds";

/// Naive layouts tried after RFC 3339; a missing offset means UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Walk every mapping of the instance and check its time group, if any
pub(crate) fn check_time_consistency<N: InstanceNode>(
    root: &N,
    violations: &mut Vec<ValidationViolation>,
) {
    let mut trail = Vec::new();
    walk(root, &mut trail, violations);
}

fn walk<N: InstanceNode>(node: &N, trail: &mut Vec<String>, violations: &mut Vec<ValidationViolation>) {
    if node.is_leaf() {
        return;
    }

    check_group(node, trail, violations);

    let mut keys = node.keys();
    keys.sort_unstable();
    for key in keys {
        if let Some(child) = node.child(key) {
            if !child.is_leaf() {
                trail.push(key.to_string());
                walk(child, trail, violations);
                trail.pop();
            }
        }
    }
}

fn check_group<N: InstanceNode>(node: &N, trail: &[String], violations: &mut Vec<ValidationViolation>) {
    let (Some(ascii), Some(epoch)) = (leaf_value(node, ASCII_KEY), leaf_value(node, EPOCH_KEY)) else {
        return;
    };

    // Unparseable values are left to the per-field type checks
    let Some(ascii_time) = parse_ascii(&ascii) else {
        return;
    };
    let Some(epoch_seconds) = integer(&epoch) else {
        return;
    };
    let micros = leaf_value(node, MICROS_KEY).and_then(|raw| integer(&raw));

    let ascii_micros = i128::from(ascii_time.timestamp()) * 1_000_000
        + i128::from(ascii_time.timestamp_subsec_micros());
    let epoch_micros = i128::from(epoch_seconds) * 1_000_000 + i128::from(micros.unwrap_or(0));

    // Without a micro_seconds field only whole seconds are compared
    let difference = match micros {
        Some(_) => ascii_micros - epoch_micros,
        None => (i128::from(ascii_time.timestamp()) - i128::from(epoch_seconds)) * 1_000_000,
    };

    if difference != 0 {
        violations.push(ValidationViolation::warning(
            trail.to_vec(),
            ViolationKind::TimeInconsistency,
            format!(
                "ascii time {} and epoch time {} differ by {} s",
                ascii_time.to_rfc3339(),
                epoch_micros as f64 / 1e6,
                difference as f64 / 1e6
            ),
        ));
    }
}

/// First leaf value of a mapping whose key stem (suffix stripped) is `stem`
fn leaf_value<N: InstanceNode>(node: &N, stem: &str) -> Option<RawValue> {
    let mut keys = node.keys();
    keys.sort_unstable();
    keys.into_iter()
        .filter(|key| path::strip_suffix(key).0 == stem)
        .filter_map(|key| node.child(key))
        .filter(|child| child.is_leaf())
        .find_map(|child| child.raw_value())
}

fn integer(raw: &RawValue) -> Option<i64> {
    match coerce(raw, TypeSuffix::Integer) {
        Ok(CoercedValue::Integer(value)) => Some(value),
        _ => None,
    }
}

fn parse_ascii(raw: &RawValue) -> Option<DateTime<Utc>> {
    let RawValue::Text(text) = raw else {
        return None;
    };
    let text = text.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
