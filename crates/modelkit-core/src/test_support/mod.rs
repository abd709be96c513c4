//! Shared fixtures for core unit tests.

use crate::{
    config::ModelConfig,
    traits::Model,
    validator::{len, num, text},
    value::Value,
};
use convert_case::Case;
use modelkit_derive::Record;

///
/// Address
/// Nested record with its own rename.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Address {
    pub(crate) street: String,
    pub(crate) city: String,
    pub(crate) zip: Option<String>,
}

impl Model for Address {
    fn configure(config: &mut ModelConfig) {
        config.rename("postcode", "zip");
    }
}

///
/// Person
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Person {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) age: u32,
    pub(crate) email: Option<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) address: Option<Address>,

    #[record(skip)]
    pub(crate) changes_seen: u32,
}

impl Model for Person {
    fn configure(config: &mut ModelConfig) {
        config
            .exclude("internal")
            .rename("full_name", "name")
            .rename("ghost", "ghost_property")
            .validator("id", num::Gt::new(0))
            .validator("name", text::NotEmpty)
            .validator("name", len::Max::new(20))
            .validator("age", num::Range::new(0, 150))
            .validator("nickname", text::NotEmpty);
    }

    fn on_property_changed(&mut self, _property: &str, _old: &Value, _new: &Value) {
        self.changes_seen += 1;
    }
}

///
/// Profile
/// camelCase wire convention.
///

#[derive(Clone, Debug, Default, PartialEq, Record)]
pub(crate) struct Profile {
    pub(crate) display_name: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) score: f64,
}

impl Model for Profile {
    fn configure(config: &mut ModelConfig) {
        config.wire_case(Case::Camel).rename("avatar", "avatar_url");
    }
}
