use crate::{
    Document,
    catalog::catalog_for,
    config::config_for,
    mapper::{EncodeError, coerce},
    names,
    obs::sink::{self, MapperEvent},
    traits::{Model, record_from_value},
    value::Value,
};
use serde_json::Value as JsonValue;

/// Encode a record into a wire document.
///
/// Every declared property is written in declaration order; `Null` becomes
/// an explicit JSON null rather than an absent key. The post-encode
/// transform runs last.
pub fn encode<M: Model>(record: &M) -> Result<Document, EncodeError> {
    let catalog = catalog_for::<M>();
    let config = config_for::<M>();

    let mut document = Document::new();
    for field in catalog.fields() {
        let value = record.get_value(field.name).unwrap_or(Value::Null);
        let json =
            coerce::value_to_json(&value, &field.kind).map_err(|source| EncodeError::Field {
                model: M::PATH,
                property: field.name,
                source: Box::new(source),
            })?;

        document.insert(names::wire_key(field.name, &config).into_owned(), json);
    }

    let document = config.apply_post_encode(document);
    sink::record(MapperEvent::Encode {
        model_path: M::PATH,
        keys: u64::try_from(document.len()).unwrap_or(u64::MAX),
    });

    Ok(document)
}

pub fn encode_json<M: Model>(record: &M) -> Result<JsonValue, EncodeError> {
    encode(record).map(JsonValue::Object)
}

/// Encode a nested `Value::Record` through `M`'s own config.
pub fn encode_record_value<M: Model>(value: &Value) -> Result<JsonValue, EncodeError> {
    let record: M = record_from_value(value.clone())?;

    encode_json(&record)
}
