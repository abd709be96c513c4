//! Per-type mapping and validation configuration.
//!
//! A `ModelConfig` is populated exactly once per type by `Model::configure`
//! and cached immutably; every decode, encode, and validate pass for that
//! type reads the same instance.

use crate::{Document, registry::TypeCache, traits::Model, validator::Validator, value::Value};
use serde_json::Value as JsonValue;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

pub use convert_case::Case;

static CONFIGS: TypeCache<ModelConfig> = TypeCache::new();

/// Custom wire-value parser registered for one wire key.
pub type Parser = Box<dyn Fn(&JsonValue) -> Result<Value, String> + Send + Sync>;

/// Whole-document transform applied before decode or after encode.
pub type Transform = Box<dyn Fn(Document) -> Document + Send + Sync>;

///
/// ModelConfig
///

#[derive(Default)]
pub struct ModelConfig {
    excluded: BTreeSet<String>,
    renames: BTreeMap<String, &'static str>,
    wire_keys: BTreeMap<&'static str, String>,
    parsers: BTreeMap<String, Parser>,
    pre_decode: Option<Transform>,
    post_encode: Option<Transform>,
    validators: Vec<(&'static str, Box<dyn Validator>)>,
    wire_case: Option<Case<'static>>,
}

impl ModelConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip `key` entirely when decoding.
    pub fn exclude(&mut self, key: impl Into<String>) -> &mut Self {
        self.excluded.insert(key.into());
        self
    }

    /// Map wire `key` onto `property`. Only honoured when `property` is declared.
    pub fn rename(&mut self, key: impl Into<String>, property: &'static str) -> &mut Self {
        self.renames.insert(key.into(), property);
        self
    }

    /// Decode the value under wire `key` with `parser` instead of kind coercion.
    pub fn parser<F>(&mut self, key: impl Into<String>, parser: F) -> &mut Self
    where
        F: Fn(&JsonValue) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.parsers.insert(key.into(), Box::new(parser));
        self
    }

    pub fn pre_decode<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(Document) -> Document + Send + Sync + 'static,
    {
        self.pre_decode = Some(Box::new(transform));
        self
    }

    pub fn post_encode<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(Document) -> Document + Send + Sync + 'static,
    {
        self.post_encode = Some(Box::new(transform));
        self
    }

    /// Register a validator for `property`. Validators run in registration order.
    pub fn validator(
        &mut self,
        property: &'static str,
        validator: impl Validator + 'static,
    ) -> &mut Self {
        self.validators.push((property, Box::new(validator)));
        self
    }

    /// Convert property names to `case` when encoding (and no rename applies).
    pub fn wire_case(&mut self, case: Case<'static>) -> &mut Self {
        self.wire_case = Some(case);
        self
    }

    // precompute the property -> wire key inverse; lexicographically first key wins
    fn finish(mut self) -> Self {
        let mut wire_keys = BTreeMap::new();
        for (key, property) in &self.renames {
            wire_keys.entry(*property).or_insert_with(|| key.clone());
        }
        self.wire_keys = wire_keys;

        self
    }

    //
    // lookups
    //

    #[must_use]
    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded.contains(key)
    }

    #[must_use]
    pub fn rename_target(&self, key: &str) -> Option<&'static str> {
        self.renames.get(key).copied()
    }

    #[must_use]
    pub fn wire_key_for(&self, property: &str) -> Option<&str> {
        self.wire_keys.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn parser_for(&self, key: &str) -> Option<&Parser> {
        self.parsers.get(key)
    }

    #[must_use]
    pub fn apply_pre_decode(&self, document: Document) -> Document {
        match &self.pre_decode {
            Some(transform) => transform(document),
            None => document,
        }
    }

    #[must_use]
    pub fn apply_post_encode(&self, document: Document) -> Document {
        match &self.post_encode {
            Some(transform) => transform(document),
            None => document,
        }
    }

    pub fn validators(&self) -> impl Iterator<Item = (&'static str, &dyn Validator)> + '_ {
        self.validators.iter().map(|(p, v)| (*p, v.as_ref()))
    }

    #[must_use]
    pub const fn encoding_case(&self) -> Option<Case<'static>> {
        self.wire_case
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("excluded", &self.excluded)
            .field("renames", &self.renames)
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .field("pre_decode", &self.pre_decode.is_some())
            .field("post_encode", &self.post_encode.is_some())
            .field(
                "validators",
                &self.validators.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            )
            .field("wire_case", &self.wire_case)
            .finish()
    }
}

/// Cached configuration for `M`, built from `Model::configure` on first use.
#[must_use]
pub fn config_for<M: Model>() -> Arc<ModelConfig> {
    CONFIGS.get_or_init::<M>(|| {
        let mut config = ModelConfig::new();
        M::configure(&mut config);
        tracing::debug!(model = M::PATH, ?config, "model config built");

        config.finish()
    })
}

///
/// TESTS
///
