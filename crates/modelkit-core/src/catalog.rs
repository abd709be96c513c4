//! Per-type catalog of declared properties.
//!
//! The catalog is computed once per record type from `Record::declare_fields`
//! and cached for the life of the process.

use crate::{model::FieldModel, registry::TypeCache, traits::Record};
use std::sync::Arc;

static CATALOGS: TypeCache<Catalog> = TypeCache::new();

///
/// Catalog
/// Immutable, ordered property declarations of one record type.
///

#[derive(Debug)]
pub struct Catalog {
    path: &'static str,
    fields: Vec<FieldModel>,
}

impl Catalog {
    /// Build a catalog from declarations, keeping the first of any duplicate name.
    #[must_use]
    pub fn build(path: &'static str, declared: Vec<FieldModel>) -> Self {
        let mut fields: Vec<FieldModel> = Vec::with_capacity(declared.len());

        for field in declared {
            if fields.iter().any(|f| f.name == field.name) {
                tracing::warn!(
                    model = path,
                    property = field.name,
                    "duplicate property declaration ignored"
                );
                continue;
            }
            fields.push(field);
        }

        Self { path, fields }
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Declared properties in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Cached catalog for `R`.
#[must_use]
pub fn catalog_for<R: Record>() -> Arc<Catalog> {
    CATALOGS.get_or_init::<R>(|| Catalog::build(R::PATH, R::declare_fields()))
}

///
/// TESTS
///
