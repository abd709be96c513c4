//! Wire key ⇄ property name resolution.
//!
//! Decoding resolves each incoming key against the model's configuration
//! and catalog; encoding computes the wire key for each declared property.

use crate::{catalog::Catalog, config::ModelConfig, model::FieldModel};
use convert_case::{Boundary, Case, Casing, split};
use std::borrow::Cow;

///
/// Resolution
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution<'a> {
    /// Key is excluded by configuration and must be skipped.
    Excluded,
    Property(&'a FieldModel),
    /// Key has no matching property; reported, then skipped.
    Unmapped,
}

/// Resolve an incoming wire key. The first matching rule wins:
/// exclusion, rename, separator conversion, verbatim match.
#[must_use]
pub fn resolve<'a>(key: &str, config: &ModelConfig, catalog: &'a Catalog) -> Resolution<'a> {
    if config.is_excluded(key) {
        return Resolution::Excluded;
    }

    if let Some(field) = config.rename_target(key).and_then(|p| catalog.field(p)) {
        return Resolution::Property(field);
    }

    if let Cow::Owned(converted) = to_property_case(key)
        && let Some(field) = catalog.field(&converted)
    {
        return Resolution::Property(field);
    }

    catalog
        .field(key)
        .map_or(Resolution::Unmapped, Resolution::Property)
}

/// Wire key for `property` when encoding.
#[must_use]
pub fn wire_key<'a>(property: &'a str, config: &'a ModelConfig) -> Cow<'a, str> {
    if let Some(key) = config.wire_key_for(property) {
        return Cow::Borrowed(key);
    }

    match config.encoding_case() {
        Some(case) => Cow::Owned(property.from_case(Case::Snake).to_case(case)),
        None => Cow::Borrowed(property),
    }
}

// Separators and case transitions foreign to `snake_case` property names.
// Digit transitions are not word boundaries, so `address2` stays as it is.
const FOREIGN_BOUNDARIES: [Boundary; 4] = [
    Boundary::Hyphen,
    Boundary::Space,
    Boundary::LowerUpper,
    Boundary::Acronym,
];

/// Convert a key using foreign word separators into `snake_case`.
///
/// Returns `Borrowed` when the key has no foreign boundary; such keys only
/// ever match verbatim, so `Name` or `AGE` are not folded onto `name`/`age`.
#[must_use]
pub fn to_property_case(key: &str) -> Cow<'_, str> {
    if split(&key, &FOREIGN_BOUNDARIES).len() < 2 {
        return Cow::Borrowed(key);
    }

    let mut boundaries = FOREIGN_BOUNDARIES.to_vec();
    boundaries.push(Boundary::Underscore);

    Cow::Owned(
        key.set_boundaries(&boundaries)
            .remove_empty()
            .to_case(Case::Snake),
    )
}

///
/// TESTS
///
