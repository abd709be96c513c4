use super::*;
use crate::{error::ValueError, traits::FieldValue};
use serde_json::json;

#[test]
fn conversions_pick_the_matching_variant() {
    assert_eq!(Value::from(3_i32), Value::Int(3));
    assert_eq!(Value::from(3_u8), Value::Uint(3));
    assert_eq!(Value::from("a"), Value::Text("a".into()));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(true)), Value::Bool(true));
    assert_eq!(Value::from(json!(null)), Value::Null);
    assert_eq!(
        Value::from(vec![1_i64, 2]),
        Value::List(vec![Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn integer_fields_narrow_with_range_checks() {
    assert_eq!(u8::from_value(Value::Int(255)), Ok(255));
    assert!(matches!(
        u8::from_value(Value::Int(256)),
        Err(ValueError::OutOfRange { target: "u8", .. })
    ));
    assert!(matches!(
        u32::from_value(Value::Int(-1)),
        Err(ValueError::OutOfRange { .. })
    ));
    assert_eq!(i64::from_value(Value::Uint(7)), Ok(7));
    assert!(i64::from_value(Value::Uint(u64::MAX)).is_err());
}

#[test]
fn floats_accept_any_number() {
    assert_eq!(f64::from_value(Value::Int(2)), Ok(2.0));
    assert_eq!(f32::from_value(Value::Float(0.5)), Ok(0.5));
    assert!(f64::from_value(Value::Text("2".into())).is_err());
}

#[test]
fn option_maps_null_to_none() {
    assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
    assert_eq!(
        Option::<String>::from_value(Value::Text("x".into())),
        Ok(Some("x".to_string()))
    );
    assert!(Option::<String>::optional());
    assert!(!String::optional());
}

#[test]
fn mismatch_reports_both_sides() {
    let err = String::from_value(Value::Int(1)).unwrap_err();

    assert_eq!(err.to_string(), "expected text, found int");
}

#[test]
fn list_elements_convert_individually() {
    let value = Value::List(vec![Value::Text("a".into()), Value::Int(1)]);

    assert!(Vec::<String>::from_value(value).is_err());
    assert_eq!(
        Vec::<String>::kind().to_string(),
        "list<text>".to_string()
    );
}

#[test]
fn len_and_display() {
    assert_eq!(Value::Text("héllo".into()).len(), Some(5));
    assert_eq!(Value::Int(1).len(), None);
    assert_eq!(
        Value::List(vec![Value::Int(1), Value::Null]).to_string(),
        "[1, null]"
    );
}

#[test]
fn json_fields_accept_every_variant() {
    assert_eq!(JsonValue::from_value(Value::Float(1.5)), Ok(json!(1.5)));
    assert_eq!(JsonValue::from_value(Value::Int(1)), Ok(json!(1)));
    assert_eq!(
        JsonValue::from_value(Value::List(vec![Value::Uint(1), Value::Text("a".into())])),
        Ok(json!([1, "a"]))
    );

    let record = Value::Record(
        [
            ("n".to_string(), Value::Null),
            ("x".to_string(), Value::Float(0.5)),
        ]
        .into_iter()
        .collect(),
    );
    assert_eq!(JsonValue::from_value(record), Ok(json!({ "n": null, "x": 0.5 })));

    assert!(matches!(
        JsonValue::from_value(Value::Float(f64::NAN)),
        Err(ValueError::Mismatch { .. })
    ));
}
