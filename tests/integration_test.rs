//! Integration tests for mtschema
//!
//! These tests run the full pipeline from a schema table on disk to a
//! rendered report, using the electric-field channel table in `tests/data`.

use mtschema::instance::{self, InstanceError};
use mtschema::prelude::*;
use mtschema::report;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn electrics() -> SchemaTree {
    let rows = read_csv_file(data_path("electrics.csv")).unwrap();
    load(&rows).unwrap()
}

fn station01() -> serde_json::Value {
    instance::load_json_file(data_path("station01.json")).unwrap()
}

/// Every data row becomes exactly one field
#[test]
fn test_load_electric_table() {
    let tree = electrics();
    assert_eq!(tree.len(), 25);

    let azimuth = tree.get(&["measurement_azimuth"]).unwrap();
    assert_eq!(azimuth.type_suffix, TypeSuffix::Float);
    assert!(azimuth.is_compulsory());
    let range = azimuth.constraints.range.unwrap();
    assert_eq!((range.min, range.max), (0.0, 360.0));
    assert_eq!(azimuth.constraints.unit.as_deref(), Some("degrees"));

    let epoch = tree.get(&["start_time", "epoch"]).unwrap();
    assert_eq!(epoch.type_suffix, TypeSuffix::Integer);

    let units = tree.get(&["units"]).unwrap();
    assert!(units.constraints.enumeration.as_ref().unwrap().is_closed());

    // title row is row 1, so the first field sits on row 2
    assert_eq!(tree.get(&["component"]).unwrap().row, 2);
}

/// A well-formed record produces no violations at all
#[test]
fn test_station_record_is_compliant() {
    let violations = validate(&electrics(), &station01());
    assert!(violations.is_empty(), "{:?}", violations);
}

/// The same record with type suffixes kept on every leaf still validates
#[test]
fn test_suffixed_record_is_compliant() {
    let doc = json!({
        "component_s": "Ey",
        "channel_number_i": 5,
        "dipole_length_d": "98.5",
        "measurement_azimuth_d": 90,
        "positive": {"type_s": "Ag-AgCl"},
        "negative": {"type_s": "Ag-AgCl"},
        "start_time": {"ascii_s": "2020-06-02T18:41:43+00:00", "epoch_l": 1591123303}
    });
    assert!(validate(&electrics(), &doc).is_empty());
}

#[test]
fn test_broken_record_report() {
    let mut doc = station01();
    doc["units"] = json!("volts");
    doc["measurement_azimuth"] = json!(-10);
    doc["channel_number"] = json!(12);
    doc["positive"]["elevation"] = json!("high");
    doc["negative"]["type"] = serde_json::Value::Null;
    doc["start_time"]["epoch"] = json!(1591123304);
    doc["gps_lock"] = json!(true);

    let violations = validate(&electrics(), &doc);
    let summary: Vec<(String, ViolationKind, Severity)> = violations
        .iter()
        .map(|v| (v.display_path(), v.kind, v.severity))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("channel_number".to_string(), ViolationKind::EnumerationViolation, Severity::Warning),
            ("gps_lock".to_string(), ViolationKind::UnknownField, Severity::Warning),
            ("measurement_azimuth".to_string(), ViolationKind::RangeViolation, Severity::Error),
            ("negative/type".to_string(), ViolationKind::MissingCompulsory, Severity::Error),
            ("positive/elevation".to_string(), ViolationKind::TypeMismatch, Severity::Error),
            ("start_time".to_string(), ViolationKind::TimeInconsistency, Severity::Warning),
            ("units".to_string(), ViolationKind::EnumerationViolation, Severity::Error),
        ]
    );
    assert!(!is_compliant(&violations));

    let text = report::format(&violations, ReportStyle::Human);
    assert_eq!(text.lines().count(), 7);
    assert!(text.starts_with("warning: channel_number — "));

    let structured = report::format(&violations, ReportStyle::Structured);
    assert_eq!(parse_structured(&structured).unwrap(), violations);

    let report = ValidationReport::new("station01.json", violations);
    assert_eq!(report.error_count(), 4);
    assert_eq!(report.warning_count(), 3);
}

/// Flat slash-keyed records validate the same as their nested form
#[test]
fn test_flat_record() {
    let flat = r#"{
        "component_s": "Ex",
        "channel_number_i": 1,
        "dipole_length_d": 50.0,
        "measurement_azimuth_d": 0,
        "positive/type_s": "Pb-PbCl",
        "negative/type_s": "Pb-PbCl",
        "start_time/ascii_s": "1970-01-01T00:00:10.500000",
        "start_time/epoch_l": 10,
        "start_time/micro_seconds_i": 500000
    }"#;
    let doc = instance::from_flat_json_str(flat).unwrap();
    assert!(validate(&electrics(), &doc).is_empty());

    let conflict = r#"{"positive": "x", "positive/type_s": "Pb-PbCl"}"#;
    assert!(matches!(
        instance::from_flat_json_str(conflict),
        Err(InstanceError::KeyConflict(_))
    ));
}

#[test]
fn test_toml_record() {
    let doc = instance::from_toml_str(
        r#"
        component = "Ez"
        channel_number = 3
        dipole_length = 25.0
        measurement_azimuth = 0.0

        [positive]
        type = "Cu-CuSO4"

        [negative]
        type = "Cu-CuSO4"

        [start_time]
        ascii = "2021-03-01T00:00:00"
        epoch = 1614556800
        "#,
    )
    .unwrap();
    assert!(validate(&electrics(), &doc).is_empty());
}

#[test]
fn test_tsv_table_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("magnetics.tsv");
    fs::write(
        &path,
        "Magnetic Field Metadata\t\t\t\n\
         Parameter\tExplanation\tType\tCompulsory/Optional\n\
         sensor/type_s\tSensor type [ coil | fluxgate ]\tstring\tcompulsory\n\
         sensor/gain_d\tAmplifier gain\tfloat\toptional\n",
    )
    .unwrap();

    let tree = load(&read_csv_file(&path).unwrap()).unwrap();
    assert_eq!(tree.len(), 2);

    let violations = validate(&tree, &json!({"sensor": {"type": "squid"}}));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::EnumerationViolation);
    assert_eq!(violations[0].severity, Severity::Error);
}

#[test]
fn test_duplicate_rows_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dupes.csv");
    fs::write(
        &path,
        "dipole_length_d,Length [ m ],float,compulsory\n\
         azimuth_d,Azimuth,float,optional\n\
         dipole_length_i,Length again,integer,optional\n",
    )
    .unwrap();

    let err = load(&read_csv_file(&path).unwrap()).unwrap_err();
    assert_eq!(
        err,
        SchemaParseError::DuplicatePath {
            path: "dipole_length".to_string(),
            first_row: 1,
            second_row: 3,
        }
    );
    assert!(err.to_string().contains("rows 1 and 3"));
}

#[test]
fn test_description_dictionary_export() {
    let tree = electrics();
    let dir = tempdir().unwrap();
    let path = dir.path().join("electrics.json");
    fs::write(&path, tree.to_json().unwrap()).unwrap();

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let map = exported.as_object().unwrap();
    assert_eq!(map.len(), 25);
    assert_eq!(map["dipole_length_d"], "Length of the dipole [ m ]");
    assert_eq!(
        map["comments_s"],
        "Free-form notes, any length"
    );
}

#[test]
fn test_validation_is_idempotent() {
    let tree = electrics();
    let mut doc = station01();
    doc["extra"] = json!({"nested": {"deep": 1}});
    doc["component"] = json!(7);

    let first = validate(&tree, &doc);
    let second = validate(&tree, &doc);
    assert_eq!(first, second);
}

#[test]
fn test_missing_instance_file() {
    let dir = tempdir().unwrap();
    let result = instance::load_json_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(InstanceError::IoError(_))));
}
