use serde_json::{Map, Value};

use crate::path;

use super::InstanceError;

/// Expand a flat record keyed by slash paths into a nested document.
///
/// Metadata tables are often exchanged as flat dictionaries
/// (`{"start_time/ascii_s": ..., "start_time/epoch_l": ...}`). Keys are
/// inserted in sorted order; a key that is both a value and a prefix of
/// another key is rejected.
pub fn unflatten(flat: &Map<String, Value>) -> Result<Value, InstanceError> {
    let mut root = Map::new();

    let mut keys: Vec<&String> = flat.keys().collect();
    keys.sort();

    for key in keys {
        let segments = path::split(key);
        if segments.iter().any(|s| s.is_empty()) {
            return Err(InstanceError::InvalidKey(key.clone()));
        }
        let Some((terminal, parents)) = segments.split_last() else {
            return Err(InstanceError::InvalidKey(key.clone()));
        };

        let mut current = &mut root;
        for parent in parents {
            let entry = current
                .entry(parent.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            current = match entry {
                Value::Object(map) => map,
                _ => return Err(InstanceError::KeyConflict(key.clone())),
            };
        }

        if current.contains_key(terminal) {
            return Err(InstanceError::KeyConflict(key.clone()));
        }
        current.insert(terminal.clone(), flat[key.as_str()].clone());
    }

    Ok(Value::Object(root))
}
