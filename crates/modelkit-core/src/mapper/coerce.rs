use crate::{
    error::ValueError,
    mapper::{DecodeError, EncodeError},
    model::FieldKind,
    value::Value,
};
use serde_json::Value as JsonValue;

///
/// Coercion
/// Why a raw JSON value could not become a `Value` of the declared kind.
///

pub(super) enum Coercion {
    Mismatch,
    Nested(DecodeError),
}

// Integral floats (`3.0`) are accepted by integer kinds when they fit.
fn integral(raw: &JsonValue) -> Option<f64> {
    raw.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub(super) fn json_to_value(raw: &JsonValue, kind: &FieldKind) -> Result<Value, Coercion> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let value = match kind {
        FieldKind::Bool => raw.as_bool().map(Value::Bool),
        FieldKind::Float => raw.as_f64().map(Value::Float),
        FieldKind::Int => raw.as_i64().or_else(|| {
            integral(raw)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .map(Value::Int),
        FieldKind::Uint => raw.as_u64().or_else(|| {
            integral(raw)
                .filter(|f| *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        })
        .map(Value::Uint),
        FieldKind::Text => raw.as_str().map(|s| Value::Text(s.to_string())),
        FieldKind::Json => Some(Value::Json(raw.clone())),
        FieldKind::List(inner) => match raw.as_array() {
            Some(items) => {
                let values = items
                    .iter()
                    .map(|item| json_to_value(item, inner))
                    .collect::<Result<Vec<_>, _>>()?;
                Some(Value::List(values))
            }
            None => None,
        },
        FieldKind::Record(codec) => match raw.as_object() {
            Some(document) => Some(codec.decode(document).map_err(Coercion::Nested)?),
            None => None,
        },
    };

    value.ok_or(Coercion::Mismatch)
}

pub(super) fn value_to_json(value: &Value, kind: &FieldKind) -> Result<JsonValue, EncodeError> {
    let json = match (value, kind) {
        (Value::Null, _) => JsonValue::Null,
        (Value::Bool(b), _) => JsonValue::Bool(*b),
        (Value::Float(f), _) => {
            if !f.is_finite() {
                return Err(EncodeError::NonFiniteFloat { value: *f });
            }
            JsonValue::from(*f)
        }
        (Value::Int(n), _) => JsonValue::from(*n),
        (Value::Uint(n), _) => JsonValue::from(*n),
        (Value::Text(s), _) => JsonValue::String(s.clone()),
        (Value::Json(json), _) => json.clone(),
        (Value::List(items), FieldKind::List(inner)) => JsonValue::Array(
            items
                .iter()
                .map(|item| value_to_json(item, inner))
                .collect::<Result<_, _>>()?,
        ),
        (Value::Record(_), FieldKind::Record(codec)) => codec.encode(value)?,
        (Value::List(_) | Value::Record(_), _) => {
            return Err(ValueError::mismatch(kind, value).into());
        }
    };

    Ok(json)
}
