use modelkit::{
    Document,
    config::{Case, ModelConfig},
    mapper,
    prelude::*,
    validator::{len, num},
};
use proptest::prelude::*;
use serde_json::{Value as JsonValue, json};

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Gauge {
    reading: i64,
    label: String,
    notes: Vec<String>,
    scale: Option<u32>,
}

impl Model for Gauge {
    fn configure(config: &mut ModelConfig) {
        config
            .validator("reading", num::Gte::new(0))
            .validator("label", len::Max::new(8));
    }
}

///
/// Sensor
/// camelCase wire form with a rename and an excluded key.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Sensor {
    sensor_id: u64,
    display_name: String,
    unit: Option<String>,
}

impl Model for Sensor {
    fn configure(config: &mut ModelConfig) {
        config
            .wire_case(Case::Camel)
            .rename("label", "display_name")
            .exclude("secret");
    }
}

#[derive(Clone, Debug)]
enum Edit {
    Reading(i64),
    Label(String),
    Notes(Vec<String>),
    Scale(Option<u32>),
}

impl Edit {
    fn apply(self, entity: &mut Entity<Gauge>) -> bool {
        match self {
            Self::Reading(n) => entity.set("reading", n),
            Self::Label(s) => entity.set("label", s),
            Self::Notes(items) => entity.set("notes", items),
            Self::Scale(scale) => entity.set("scale", scale),
        }
        .expect("declared property")
    }
}

fn arb_gauge() -> impl Strategy<Value = Gauge> {
    (
        -50i64..50,
        "[a-z]{0,12}",
        prop::collection::vec("[a-z]{1,4}", 0..3),
        prop::option::of(0u32..10),
    )
        .prop_map(|(reading, label, notes, scale)| Gauge {
            reading,
            label,
            notes,
            scale,
        })
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (-50i64..50).prop_map(Edit::Reading),
        "[a-z]{0,12}".prop_map(Edit::Label),
        prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(Edit::Notes),
        prop::option::of(0u32..10).prop_map(Edit::Scale),
    ]
}

fn arb_sensor_document() -> impl Strategy<Value = Document> {
    (
        0u64..1_000_000,
        "[a-zA-Z ]{0,10}",
        prop::option::of("[a-z]{1,5}"),
    )
        .prop_map(|(id, label, unit)| {
            let mut document = Document::new();
            document.insert("sensorId".into(), json!(id));
            document.insert("label".into(), json!(label));
            document.insert("unit".into(), unit.map_or(JsonValue::Null, JsonValue::from));
            document
        })
}

proptest! {
    #[test]
    fn dirty_set_only_grows_within_an_episode(
        start in arb_gauge(),
        edits in prop::collection::vec(arb_edit(), 1..12),
    ) {
        let mut entity = Entity::from_record(start);
        let mut seen = std::collections::BTreeSet::new();

        for edit in edits {
            let changed = edit.apply(&mut entity);
            let dirty = entity.dirty_properties().clone();

            prop_assert!(seen.is_subset(&dirty));
            if changed {
                prop_assert!(entity.is_dirty());
            }
            seen = dirty;
        }
    }

    #[test]
    fn undo_restores_the_pre_change_record(
        start in arb_gauge(),
        edits in prop::collection::vec(arb_edit(), 0..12),
    ) {
        let mut entity = Entity::from_record(start.clone());

        for edit in edits {
            edit.apply(&mut entity);
        }

        let state = entity.undo().expect("undo").clone();

        prop_assert_eq!(entity.record(), &start);
        prop_assert!(state.is_clean() || state.is_invalid());
        prop_assert!(entity.undo_snapshot().is_empty());
    }

    #[test]
    fn validate_is_idempotent(start in arb_gauge()) {
        let mut entity = Entity::from_record(start);

        let first = entity.validate().clone();
        let second = entity.validate().clone();

        prop_assert_eq!(first, second);
        prop_assert!(!entity.is_dirty());
    }

    #[test]
    fn encode_then_decode_preserves_declared_properties(start in arb_gauge()) {
        let document = mapper::encode(&start).expect("encode");
        let decoded = mapper::decode::<Gauge>(&JsonValue::Object(document)).expect("decode");

        prop_assert_eq!(decoded.record(), &start);
        prop_assert_eq!(decoded.state(), &ValidationState::Empty);
    }

    #[test]
    fn decode_then_encode_reproduces_known_keys(
        known in arb_sensor_document(),
        with_secret in any::<bool>(),
        with_unknown in any::<bool>(),
    ) {
        let mut wire = known.clone();
        if with_secret {
            wire.insert("secret".into(), json!("hidden"));
        }
        if with_unknown {
            wire.insert("unknownKey".into(), json!(1));
        }

        let decoded = mapper::decode::<Sensor>(&JsonValue::Object(wire)).expect("decode");
        let encoded = mapper::encode(decoded.record()).expect("encode");

        prop_assert_eq!(encoded, known);
    }
}
