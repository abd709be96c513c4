mod field;

use crate::{
    catalog::catalog_for,
    config::ModelConfig,
    error::{FieldError, ValueError},
    model::{FieldKind, FieldModel},
    value::Value,
};
use std::collections::BTreeMap;

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================
//
// These traits describe *what a record declares*, not how it is tracked
// or mapped at runtime.
//

///
/// Path
/// Fully-qualified type path used in diagnostics and registry keys.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// Record
///
/// Explicit property declaration for a domain type.
/// Usually emitted by `#[derive(Record)]`.
///
/// ## Semantics
/// - `declare_fields` is called once per process by the catalog
/// - `get_value` returns `None` only for undeclared properties
/// - `set_value` performs a raw assignment; change tracking lives in `Entity`
///

pub trait Record: Path + Default + Send + Sync + 'static {
    fn declare_fields() -> Vec<FieldModel>;

    fn get_value(&self, property: &str) -> Option<Value>;

    fn set_value(&mut self, property: &str, value: Value) -> Result<(), FieldError>;
}

///
/// Model
///
/// Per-type behaviour layered on a record. Every method has a default, so
/// `impl Model for T {}` is a complete implementation.
///

pub trait Model: Record {
    /// Populate the type's mapping configuration and validators.
    /// Called once per process; the result is cached and immutable.
    fn configure(_config: &mut ModelConfig) {}

    /// Invoked after every observed property change.
    fn on_property_changed(&mut self, _property: &str, _old: &Value, _new: &Value) {}
}

///
/// FieldValue
///
/// Conversion between a Rust field type and the tagged `Value` union.
///

pub trait FieldValue: Sized {
    fn kind() -> FieldKind;

    fn optional() -> bool {
        false
    }

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// Project a record into a `Value::Record` keyed by property name.
pub fn record_to_value<R: Record>(record: &R) -> Value {
    let catalog = catalog_for::<R>();
    let fields = catalog
        .fields()
        .iter()
        .map(|field| {
            let value = record.get_value(field.name).unwrap_or(Value::Null);
            (field.name.to_string(), value)
        })
        .collect::<BTreeMap<_, _>>();

    Value::Record(fields)
}

/// Rebuild a record from a `Value::Record`; absent properties keep defaults.
pub fn record_from_value<R: Record>(value: Value) -> Result<R, ValueError> {
    let fields = match value {
        Value::Record(fields) => fields,
        other => {
            return Err(ValueError::mismatch(
                format!("record<{}>", R::PATH),
                &other,
            ));
        }
    };

    let mut record = R::default();
    for (property, value) in fields {
        record
            .set_value(&property, value)
            .map_err(|err| ValueError::Nested {
                model: R::PATH,
                property: err.property().to_string(),
                reason: err.to_string(),
            })?;
    }

    Ok(record)
}
