use super::*;

fn text(s: &str) -> RawValue {
    RawValue::Text(s.to_string())
}

fn number(s: &str) -> RawValue {
    RawValue::Number(s.to_string())
}

#[test]
fn test_string_coercion_normalizes_scalars() {
    assert_eq!(
        coerce(&text("Ag-AgCl"), TypeSuffix::String).unwrap(),
        CoercedValue::Text("Ag-AgCl".to_string())
    );
    assert_eq!(
        coerce(&number("42"), TypeSuffix::String).unwrap(),
        CoercedValue::Text("42".to_string())
    );
    assert_eq!(
        coerce(&RawValue::Bool(true), TypeSuffix::String).unwrap(),
        CoercedValue::Text("true".to_string())
    );
    assert!(coerce(&RawValue::List(vec![]), TypeSuffix::String).is_err());
}

#[test]
fn test_float_coercion() {
    assert_eq!(
        coerce(&number("-12.5"), TypeSuffix::Float).unwrap(),
        CoercedValue::Float(-12.5)
    );
    assert_eq!(
        coerce(&text(" 1.5e3 "), TypeSuffix::Float).unwrap(),
        CoercedValue::Float(1500.0)
    );
    assert_eq!(coerce(&text(".5"), TypeSuffix::Float).unwrap(), CoercedValue::Float(0.5));

    for bad in ["abc", "inf", "NaN", "1.2.3", "", "1e999"] {
        let err = coerce(&text(bad), TypeSuffix::Float).unwrap_err();
        assert_eq!(err.expected, TypeSuffix::Float, "input {:?}", bad);
    }
    assert!(coerce(&RawValue::Bool(false), TypeSuffix::Float).is_err());
}

#[test]
fn test_integer_coercion() {
    assert_eq!(coerce(&number("7"), TypeSuffix::Integer).unwrap(), CoercedValue::Integer(7));
    assert_eq!(coerce(&text("-3"), TypeSuffix::Integer).unwrap(), CoercedValue::Integer(-3));
    assert_eq!(coerce(&number("3.0"), TypeSuffix::Integer).unwrap(), CoercedValue::Integer(3));
    assert_eq!(coerce(&text("1e3"), TypeSuffix::Integer).unwrap(), CoercedValue::Integer(1000));
    assert_eq!(
        coerce(&number("9223372036854775807"), TypeSuffix::Integer).unwrap(),
        CoercedValue::Integer(i64::MAX)
    );

    assert!(coerce(&number("3.5"), TypeSuffix::Integer).is_err());
    assert!(coerce(&text("x"), TypeSuffix::Integer).is_err());
    assert!(coerce(&number("1e30"), TypeSuffix::Integer).is_err());
}

#[test]
fn test_type_mismatch_message() {
    let err = coerce(&text("x"), TypeSuffix::Integer).unwrap_err();
    assert_eq!(err.to_string(), "expected integer, found \"x\"");
}

#[test]
fn test_type_suffix_tokens() {
    assert_eq!(TypeSuffix::from_token("s"), Some(TypeSuffix::String));
    assert_eq!(TypeSuffix::from_token("d"), Some(TypeSuffix::Float));
    assert_eq!(TypeSuffix::from_token("l"), Some(TypeSuffix::Integer));
    assert_eq!(TypeSuffix::from_token("x"), None);
    assert_eq!(TypeSuffix::from_declared(" Double "), Some(TypeSuffix::Float));
    assert_eq!(TypeSuffix::from_declared("Integer"), Some(TypeSuffix::Integer));
    assert_eq!(TypeSuffix::from_declared(""), None);
}

#[test]
fn test_extract_closed_enumeration() {
    let e = extract_enumeration("Component measured [ Ex | Ey | Ez ]").unwrap();
    assert_eq!(e.values, vec!["Ex", "Ey", "Ez"]);
    assert!(e.is_closed());
    assert!(e.contains(&CoercedValue::Text("Ey".to_string())));
    assert!(!e.contains(&CoercedValue::Text("ey".to_string())));
}

#[test]
fn test_extract_open_enumeration() {
    let e = extract_enumeration("Channel number [ 1 | 2 | 3 | 4 | 5 | 6 | ... ]").unwrap();
    assert_eq!(e.values.len(), 6);
    assert!(e.open);
    assert!(e.contains(&CoercedValue::Integer(4)));
    assert!(e.contains(&CoercedValue::Float(4.0)));
    assert!(!e.contains(&CoercedValue::Integer(7)));
    assert_eq!(e.to_string(), "[ 1 | 2 | 3 | 4 | 5 | 6 | ... ]");
}

#[test]
fn test_enumeration_absent() {
    assert!(extract_enumeration("Length of dipole [ m ]").is_none());
    assert!(extract_enumeration("No brackets at all").is_none());
    assert!(extract_enumeration("[ | ... ]").is_none());
}

#[test]
fn test_extract_unit() {
    assert_eq!(extract_unit("Length of dipole [ m ]"), Some("m".to_string()));
    assert_eq!(extract_unit("Contact resistance [Ohm]"), Some("Ohm".to_string()));
    assert_eq!(extract_unit("Type [ a | b ]"), None);
    assert_eq!(extract_unit("Azimuth [ 0 to 360 ] [ degrees ]"), Some("degrees".to_string()));
    assert_eq!(extract_unit("plain"), None);
}

#[test]
fn test_numeric_bracket_is_unit() {
    assert_eq!(extract_unit("Scale factor [ 1000 ]"), Some("1000".to_string()));
    assert_eq!(extract_unit("Gain [ 1e3 ] [ V ]"), Some("1e3".to_string()));
    assert_eq!(extract_range("Scale factor [ 1000 ]"), None);
}

#[test]
fn test_extract_range() {
    let range = extract_range("Azimuth [ 0 to 360 ] [ degrees ]").unwrap();
    assert_eq!(range, NumericRange { min: 0.0, max: 360.0 });
    assert!(range.contains(360.0));
    assert!(!range.contains(-0.5));

    let range = extract_range("Latitude [-90..90]").unwrap();
    assert_eq!(range.min, -90.0);
    assert!(extract_range("[ 10 to 1 ]").is_none());
    assert!(extract_range("[ m ]").is_none());
}

#[test]
fn test_bracket_parser_constraints() {
    let constraints = BracketParser.constraints("Dipole azimuth [ degrees ] [ 0 to 360 ]");
    assert!(constraints.enumeration.is_none());
    assert_eq!(constraints.unit.as_deref(), Some("degrees"));
    assert!(constraints.range.is_some());
    assert!(!constraints.is_empty());
    assert!(BracketParser.constraints("free text").is_empty());
}
