use super::*;
use crate::{
    config::ModelConfig,
    entity::ValidationState,
    model::RecordCodec,
    obs::{metrics_report, metrics_reset_all},
    test_support::{Address, Person, Profile},
    traits::{Model, Path, record_to_value},
    value::Value,
};
use modelkit_derive::Record;
use serde_json::json;

///
/// Event
/// Custom parser decodes a nested object carried as a JSON string.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Event {
    title: String,
    venue: Option<Address>,
    attendees: u64,
}

impl Model for Event {
    fn configure(config: &mut ModelConfig) {
        config
            .parser("venue", |raw| {
                let text = raw.as_str().ok_or("venue must be a JSON string")?;
                let json: serde_json::Value =
                    serde_json::from_str(text).map_err(|e| e.to_string())?;
                let document = json.as_object().ok_or("venue must encode an object")?;

                RecordCodec::of::<Address>()
                    .decode(document)
                    .map_err(|e| e.to_string())
            })
            .pre_decode(|mut doc| {
                if let Some(count) = doc.remove("count") {
                    doc.insert("attendees".into(), count);
                }
                doc
            })
            .post_encode(|mut doc| {
                doc.insert("kind".into(), json!("event"));
                doc
            });
    }
}

#[test]
fn decode_resolves_renames_and_skips_excluded_and_unmapped() {
    metrics_reset_all();

    let person = decode::<Person>(&json!({
        "id": 7,
        "full_name": "Ada",
        "internal": "secret",
        "unknown": 1,
    }))
    .expect("decode");

    assert_eq!(person.state(), &ValidationState::Empty);
    assert_eq!(person.id, 7);
    assert_eq!(person.name, "Ada");

    let report = metrics_report();
    assert_eq!(report.counters.ops.unmapped_keys, 1);
    assert_eq!(report.counters.ops.excluded_keys, 1);
    assert_eq!(report.counters.ops.decode_calls, 1);
}

#[test]
fn keys_differing_only_in_case_stay_unmapped() {
    metrics_reset_all();

    let person = decode::<Person>(&json!({ "Name": "x", "AGE": 40 })).expect("decode");

    assert_eq!(person.name, "");
    assert_eq!(person.age, 0);
    assert_eq!(metrics_report().counters.ops.unmapped_keys, 2);
}

#[test]
fn decode_requires_an_object() {
    let err = decode::<Person>(&json!([1, 2])).unwrap_err();

    assert_eq!(
        err,
        DecodeError::UnexpectedShape {
            model: Person::PATH,
            expected: "object",
            found: "array",
        }
    );
}

#[test]
fn decode_slice_reports_malformed_json() {
    let err = decode_slice::<Person>(b"{not json").unwrap_err();

    assert!(matches!(err, DecodeError::Json { .. }));
    assert!(err.key().is_none());
}

#[test]
fn type_mismatch_is_fatal_and_carries_key() {
    let err = decode::<Person>(&json!({ "id": "seven" })).unwrap_err();

    let DecodeError::TypeMismatch {
        key,
        property,
        expected,
        raw,
        ..
    } = err
    else {
        panic!("expected type mismatch, got {err:?}");
    };
    assert_eq!(key, "id");
    assert_eq!(property, "id");
    assert_eq!(expected, "int");
    assert_eq!(raw, json!("seven"));
}

#[test]
fn integer_kinds_check_range_and_sign() {
    assert!(decode::<Person>(&json!({ "age": -1 })).is_err());
    assert!(decode::<Person>(&json!({ "age": 5_000_000_000_u64 })).is_err());
    assert_eq!(decode::<Person>(&json!({ "age": 3.0 })).expect("integral float").age, 3);
    assert!(decode::<Person>(&json!({ "age": 3.5 })).is_err());
}

#[test]
fn null_handling() {
    let person = decode::<Person>(&json!({ "email": null })).expect("optional null");
    assert_eq!(person.email, None);

    let err = decode::<Person>(&json!({ "name": null })).unwrap_err();
    assert_eq!(
        err,
        DecodeError::NullValue {
            model: Person::PATH,
            key: "name".into(),
            property: "name",
        }
    );
}

#[test]
fn nested_records_decode_through_their_own_config() {
    let person = decode::<Person>(&json!({
        "address": { "street": "1 Main", "city": "Oslo", "postcode": "0150" },
        "tags": ["a", "b"],
    }))
    .expect("decode");

    let address = person.address.as_ref().expect("address");
    assert_eq!(address.zip.as_deref(), Some("0150"));
    assert_eq!(person.tags, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn nested_errors_keep_the_chain() {
    let err = decode::<Person>(&json!({ "address": { "street": 5 } })).unwrap_err();

    assert_eq!(err.key(), Some("address"));
    assert!(matches!(
        err.root(),
        DecodeError::TypeMismatch { key, .. } if key == "street"
    ));
}

#[test]
fn custom_parser_and_transforms() {
    let event = decode::<Event>(&json!({
        "title": "Launch",
        "venue": r#"{"street":"Pier 1","city":"Bergen"}"#,
        "count": 40,
    }))
    .expect("decode");

    assert_eq!(event.attendees, 40);
    assert_eq!(
        event.venue.as_ref().map(|a| a.city.as_str()),
        Some("Bergen")
    );

    let encoded = encode(event.record()).expect("encode");
    assert_eq!(encoded["kind"], json!("event"));
    assert_eq!(encoded["venue"]["street"], json!("Pier 1"));
}

#[test]
fn parser_failure_names_key_and_raw_value() {
    let err = decode::<Event>(&json!({ "venue": 12 })).unwrap_err();

    assert!(matches!(
        err,
        DecodeError::Parser { ref key, ref raw, .. } if key == "venue" && *raw == json!(12)
    ));
}

#[test]
fn decode_many_preserves_order() {
    let people = decode_many::<Person>(&json!([{ "id": 1 }, { "id": 2 }])).expect("decode");

    assert_eq!(people.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(decode_many::<Person>(&json!({ "id": 1 })).is_err());
}

#[test]
fn encode_writes_every_property_with_inverse_renames() {
    let person = Person {
        id: 3,
        name: "Ada".into(),
        ..Person::default()
    };

    let doc = encode(&person).expect("encode");

    assert_eq!(
        doc.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["address", "age", "email", "full_name", "id", "tags"]
    );
    assert_eq!(doc["full_name"], json!("Ada"));
    assert_eq!(doc["email"], json!(null));
    assert_eq!(doc["address"], json!(null));
}

#[test]
fn encode_uses_wire_case() {
    let profile = Profile {
        display_name: "ada".into(),
        avatar_url: Some("x.png".into()),
        score: 1.5,
    };

    let doc = encode_json(&profile).expect("encode");

    assert_eq!(
        doc,
        json!({ "displayName": "ada", "avatar": "x.png", "score": 1.5 })
    );
}

#[test]
fn encode_rejects_non_finite_floats() {
    let profile = Profile {
        score: f64::NAN,
        ..Profile::default()
    };

    let err = encode(&profile).unwrap_err();

    let EncodeError::Field { property, source, .. } = err else {
        panic!("expected field error");
    };
    assert_eq!(property, "score");
    assert!(matches!(*source, EncodeError::NonFiniteFloat { .. }));
}

#[test]
fn round_trip_preserves_known_keys() {
    let doc = json!({
        "id": 9,
        "full_name": "Ada",
        "age": 36,
        "email": "ada@example.com",
        "tags": ["math"],
        "address": { "street": "1 Main", "city": "London", "postcode": null },
    });

    let person = decode::<Person>(&doc).expect("decode");
    let encoded = person.encode().expect("encode");

    assert_eq!(serde_json::Value::Object(encoded), doc);
}

#[test]
fn record_values_round_trip_through_codec() {
    let address = Address {
        street: "s".into(),
        city: "c".into(),
        zip: Some("z".into()),
    };
    let value = record_to_value(&address);

    let json = encode_record_value::<Address>(&value).expect("encode");
    assert_eq!(json["postcode"], json!("z"));

    let document = json.as_object().expect("object");
    assert_eq!(decode_record_value::<Address>(document), Ok(value));
    assert!(matches!(
        encode_record_value::<Address>(&Value::Int(1)),
        Err(EncodeError::Value(_))
    ));
}
