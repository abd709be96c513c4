use crate::{
    ThisError,
    mapper::{DecodeError, EncodeError},
};
use std::fmt;

///
/// Error
///
/// Umbrella error for synchronous core operations.
/// Validation failures are never errors; they live in `ValidationState::Invalid`.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl Error {
    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Decode(_) => ErrorOrigin::Decode,
            Self::Encode(_) => ErrorOrigin::Encode,
            Self::Field(_) => ErrorOrigin::Field,
        }
    }

    #[must_use]
    pub fn display_with_origin(&self) -> String {
        format!("{}: {self}", self.origin())
    }
}

///
/// ErrorOrigin
/// Which stage of the model pipeline produced an error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Decode,
    Encode,
    Field,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Decode => "decode",
            Self::Encode => "encode",
            Self::Field => "field",
        };
        write!(f, "{label}")
    }
}

///
/// FieldError
///
/// Raised by the single setter entry point when a property name is not
/// declared or the assigned value does not fit the declared type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldError {
    #[error("{model} has no property '{property}'")]
    UnknownField {
        model: &'static str,
        property: String,
    },

    #[error("{model}.{property}: {source}")]
    Value {
        model: &'static str,
        property: String,
        source: ValueError,
    },
}

impl FieldError {
    pub fn unknown(model: &'static str, property: impl Into<String>) -> Self {
        Self::UnknownField {
            model,
            property: property.into(),
        }
    }

    pub fn value(model: &'static str, property: impl Into<String>, source: ValueError) -> Self {
        Self::Value {
            model,
            property: property.into(),
            source,
        }
    }

    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::UnknownField { property, .. } | Self::Value { property, .. } => property,
        }
    }
}

///
/// ValueError
///
/// Conversion failure between a `Value` and a concrete field type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: String,
        found: &'static str,
    },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { target: &'static str, value: String },

    #[error("nested {model}.{property}: {reason}")]
    Nested {
        model: &'static str,
        property: String,
        reason: String,
    },
}

impl ValueError {
    pub fn mismatch(expected: impl fmt::Display, found: &crate::value::Value) -> Self {
        Self::Mismatch {
            expected: expected.to_string(),
            found: found.label(),
        }
    }

    pub fn out_of_range(target: &'static str, value: impl fmt::Display) -> Self {
        Self::OutOfRange {
            target,
            value: value.to_string(),
        }
    }
}
