use modelkit::{
    config::ModelConfig,
    mapper::{self, DecodeError},
    obs::{EventSink, MapperEvent, with_event_sink},
    prelude::*,
    validator::num,
};
use serde_json::json;
use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

///
/// Account
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Account {
    id: i64,
    name: String,
}

impl Model for Account {
    fn configure(config: &mut ModelConfig) {
        config.validator("id", num::Gt::new(0));
    }
}

///
/// Renamed
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Renamed {
    name: String,
    ignore_me: Option<String>,
}

impl Model for Renamed {
    fn configure(config: &mut ModelConfig) {
        config.rename("thisIsAName", "name").exclude("ignore_me");
    }
}

///
/// Container
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Container {
    nested: Option<Account>,
}

impl Model for Container {
    fn configure(config: &mut ModelConfig) {
        config.parser("nested", |raw| {
            let document = raw.as_object().ok_or("nested must be an object")?;
            mapper::decode_record_value::<Account>(document).map_err(|e| e.to_string())
        });
    }
}

#[derive(Default)]
struct Capture(RefCell<Vec<MapperEvent>>);

impl EventSink for Capture {
    fn record(&self, event: MapperEvent) {
        self.0.borrow_mut().push(event);
    }
}

fn dirty(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn decode_edit_validate_undo_walk() {
    let mut account = mapper::decode::<Account>(&json!({ "id": 10, "name": "n" })).expect("decode");
    assert_eq!((account.id, account.name.as_str()), (10, "n"));
    assert_eq!(account.state(), &ValidationState::Empty);

    account.set("name", "m").expect("set name");
    assert_eq!(account.state(), &ValidationState::Dirty(dirty(&["name"])));

    assert_eq!(account.validate(), &ValidationState::Clean);

    account.set("id", -1).expect("set id");
    assert_eq!(account.state(), &ValidationState::Dirty(dirty(&["id"])));

    let state = account.validate().clone();
    let ValidationState::Invalid(errors) = state else {
        panic!("expected invalid, got {state:?}");
    };
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["id"]);

    assert_eq!(account.undo().expect("undo"), &ValidationState::Clean);
    assert_eq!(account.id, 10);
    assert_eq!(account.name, "m");
}

#[test]
fn rename_and_exclusion() {
    let capture = Rc::new(Capture::default());

    let renamed = with_event_sink(capture.clone(), || {
        mapper::decode::<Renamed>(&json!({ "thisIsAName": "x", "ignore_me": "y" }))
    })
    .expect("decode");

    assert_eq!(renamed.name, "x");
    assert_eq!(renamed.ignore_me, None);
    assert!(capture.0.borrow().contains(&MapperEvent::ExcludedKey {
        model_path: Renamed::PATH,
        key: "ignore_me".to_string(),
    }));
}

#[test]
fn nested_document_through_custom_parser() {
    let container =
        mapper::decode::<Container>(&json!({ "nested": { "id": 1, "name": "inner" } }))
            .expect("decode");

    assert_eq!(
        container.nested,
        Some(Account {
            id: 1,
            name: "inner".to_string(),
        })
    );
}

#[test]
fn nested_parser_failure_surfaces_as_parser_error() {
    let err = mapper::decode::<Container>(&json!({ "nested": { "id": "one" } })).unwrap_err();

    assert!(matches!(err, DecodeError::Parser { ref key, .. } if key == "nested"));
}
