use crate::{
    Document,
    catalog::catalog_for,
    config::{ModelConfig, config_for},
    entity::Entity,
    mapper::{
        DecodeError,
        coerce::{self, Coercion},
    },
    model::FieldModel,
    names::{self, Resolution},
    obs::sink::{self, MapperEvent},
    traits::{Model, record_to_value},
    value::Value,
};
use serde_json::Value as JsonValue;

///
/// Assignment
/// One resolved, coerced property value awaiting assignment.
///

#[derive(Debug)]
pub(crate) struct Assignment {
    pub(crate) key: String,
    pub(crate) property: &'static str,
    pub(crate) value: Value,
}

const fn json_label(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Borrow `json` as a document, or fail with `UnexpectedShape`.
pub(crate) fn as_document<M: Model>(json: &JsonValue) -> Result<&Document, DecodeError> {
    json.as_object().ok_or_else(|| DecodeError::UnexpectedShape {
        model: M::PATH,
        expected: "object",
        found: json_label(json),
    })
}

/// Decode one JSON object into a fresh entity in state `Empty`.
pub fn decode<M: Model>(json: &JsonValue) -> Result<Entity<M>, DecodeError> {
    let document = as_document::<M>(json)?;
    let record = decode_document::<M>(document.clone())?;

    Ok(Entity::from_record(record))
}

/// Decode raw bytes holding one JSON object.
pub fn decode_slice<M: Model>(bytes: &[u8]) -> Result<Entity<M>, DecodeError> {
    let json: JsonValue = serde_json::from_slice(bytes).map_err(|err| DecodeError::Json {
        model: M::PATH,
        message: err.to_string(),
    })?;

    decode(&json)
}

/// Decode a JSON array of objects, preserving order. Any failure fails the batch.
pub fn decode_many<M: Model>(json: &JsonValue) -> Result<Vec<Entity<M>>, DecodeError> {
    let items = json.as_array().ok_or_else(|| DecodeError::UnexpectedShape {
        model: M::PATH,
        expected: "array",
        found: json_label(json),
    })?;

    items.iter().map(decode::<M>).collect()
}

/// Decode a document into a bare record, bypassing change tracking.
pub fn decode_document<M: Model>(document: Document) -> Result<M, DecodeError> {
    let assignments = decode_assignments::<M>(document)?;
    let assigned = u64::try_from(assignments.len()).unwrap_or(u64::MAX);

    let mut record = M::default();
    for Assignment {
        key,
        property,
        value,
    } in assignments
    {
        record
            .set_value(property, value)
            .map_err(|source| DecodeError::Assignment {
                model: M::PATH,
                key,
                source,
            })?;
    }

    sink::record(MapperEvent::Decode {
        model_path: M::PATH,
        assigned,
    });

    Ok(record)
}

/// Decode a nested document into a `Value::Record` using `M`'s own config.
pub fn decode_record_value<M: Model>(document: &Document) -> Result<Value, DecodeError> {
    decode_document::<M>(document.clone()).map(|record| record_to_value(&record))
}

/// Resolve and coerce every key of `document` without assigning anything.
pub(crate) fn decode_assignments<M: Model>(
    document: Document,
) -> Result<Vec<Assignment>, DecodeError> {
    let config = config_for::<M>();
    let catalog = catalog_for::<M>();
    let document = config.apply_pre_decode(document);

    let mut assignments = Vec::with_capacity(document.len());
    for (key, raw) in document {
        let field = match names::resolve(&key, &config, &catalog) {
            Resolution::Property(field) => field,
            Resolution::Excluded => {
                tracing::trace!(model = M::PATH, key = %key, "excluded key skipped");
                sink::record(MapperEvent::ExcludedKey {
                    model_path: M::PATH,
                    key,
                });
                continue;
            }
            Resolution::Unmapped => {
                tracing::debug!(model = M::PATH, key = %key, "unmapped key skipped");
                sink::record(MapperEvent::UnmappedKey {
                    model_path: M::PATH,
                    key,
                });
                continue;
            }
        };

        let value = decode_field::<M>(&key, &raw, field, &config)?;
        assignments.push(Assignment {
            key,
            property: field.name,
            value,
        });
    }

    Ok(assignments)
}

fn decode_field<M: Model>(
    key: &str,
    raw: &JsonValue,
    field: &FieldModel,
    config: &ModelConfig,
) -> Result<Value, DecodeError> {
    if raw.is_null() && field.optional {
        return Ok(Value::Null);
    }

    if let Some(parser) = config.parser_for(key) {
        return parser(raw).map_err(|message| DecodeError::Parser {
            model: M::PATH,
            key: key.to_string(),
            raw: raw.clone(),
            message,
        });
    }

    if raw.is_null() {
        return Err(DecodeError::NullValue {
            model: M::PATH,
            key: key.to_string(),
            property: field.name,
        });
    }

    coerce::json_to_value(raw, &field.kind).map_err(|coercion| match coercion {
        Coercion::Mismatch => DecodeError::TypeMismatch {
            model: M::PATH,
            key: key.to_string(),
            property: field.name,
            expected: field.kind.to_string(),
            raw: raw.clone(),
        },
        Coercion::Nested(source) => DecodeError::Nested {
            model: M::PATH,
            key: key.to_string(),
            source: Box::new(source),
        },
    })
}
