use crate::{error::ValueError, model::FieldKind, traits::FieldValue, value::Value};
use serde_json::Value as JsonValue;

// Integers widen into the 64-bit carriers and narrow back with range checks.
macro_rules! impl_field_value_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Int
                }

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    let n = match value {
                        Value::Int(n) => n,
                        Value::Uint(n) => i64::try_from(n)
                            .map_err(|_| ValueError::out_of_range(stringify!($ty), n))?,
                        other => return Err(ValueError::mismatch(Self::kind(), &other)),
                    };

                    Self::try_from(n).map_err(|_| ValueError::out_of_range(stringify!($ty), n))
                }
            }
        )*
    };
}

macro_rules! impl_field_value_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Uint
                }

                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    let n = match value {
                        Value::Uint(n) => n,
                        Value::Int(n) => u64::try_from(n)
                            .map_err(|_| ValueError::out_of_range(stringify!($ty), n))?,
                        other => return Err(ValueError::mismatch(Self::kind(), &other)),
                    };

                    Self::try_from(n).map_err(|_| ValueError::out_of_range(stringify!($ty), n))
                }
            }
        )*
    };
}

impl_field_value_signed!(i8, i16, i32, i64);
impl_field_value_unsigned!(u8, u16, u32, u64);

impl FieldValue for bool {
    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueError::mismatch(Self::kind(), &other)),
        }
    }
}

impl FieldValue for f64 {
    fn kind() -> FieldKind {
        FieldKind::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        value
            .as_f64()
            .ok_or_else(|| ValueError::mismatch(Self::kind(), &value))
    }
}

impl FieldValue for f32 {
    fn kind() -> FieldKind {
        FieldKind::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        value
            .as_f64()
            .map(|x| x as Self)
            .ok_or_else(|| ValueError::mismatch(Self::kind(), &value))
    }
}

impl FieldValue for String {
    fn kind() -> FieldKind {
        FieldKind::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(ValueError::mismatch(Self::kind(), &other)),
        }
    }
}

impl FieldValue for JsonValue {
    fn kind() -> FieldKind {
        FieldKind::Json
    }

    fn to_value(&self) -> Value {
        Value::Json(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Json(json) => Ok(json),
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Int(n) => Ok(Self::from(n)),
            Value::Uint(n) => Ok(Self::from(n)),
            Value::Text(s) => Ok(Self::String(s)),
            Value::Float(x) => serde_json::Number::from_f64(x)
                .map(Self::Number)
                .ok_or_else(|| ValueError::mismatch("finite float", &Value::Float(x))),
            Value::List(items) => items
                .into_iter()
                .map(Self::from_value)
                .collect::<Result<_, _>>()
                .map(Self::Array),
            Value::Record(fields) => fields
                .into_iter()
                .map(|(name, value)| Self::from_value(value).map(|json| (name, json)))
                .collect::<Result<_, _>>()
                .map(Self::Object),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ValueError::mismatch(Self::kind(), &other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn optional() -> bool {
        true
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
