#![no_main]

use libfuzzer_sys::fuzz_target;
use mtschema::schema::{load, read_csv};
use mtschema::validator::validate;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either compile to a schema or fail with an error,
    // never panic
    let Ok(rows) = read_csv(data, b',') else {
        return;
    };
    let Ok(tree) = load(&rows) else {
        return;
    };

    // A compiled schema must survive validating an empty and a junk instance
    let _ = validate(&tree, &serde_json::json!({}));
    let _ = validate(&tree, &serde_json::json!({"a": {"b": [1, "x"]}, "c": null}));
    let _ = tree.to_json();
});
