use crate::{
    ThisError,
    error::{FieldError, ValueError},
};
use serde_json::Value as JsonValue;

///
/// DecodeError
///
/// Fatal for the instance being decoded. Unmapped keys are not errors; they
/// are reported through `obs` and skipped.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("{model}: expected {expected}, found {found}")]
    UnexpectedShape {
        model: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{model}: malformed JSON: {message}")]
    Json { model: &'static str, message: String },

    #[error("{model}: null for non-optional property '{property}' (key '{key}')")]
    NullValue {
        model: &'static str,
        key: String,
        property: &'static str,
    },

    #[error("{model}: key '{key}' expected {expected} for property '{property}', got {raw}")]
    TypeMismatch {
        model: &'static str,
        key: String,
        property: &'static str,
        expected: String,
        raw: JsonValue,
    },

    #[error("{model}: parser for key '{key}' rejected {raw}: {message}")]
    Parser {
        model: &'static str,
        key: String,
        raw: JsonValue,
        message: String,
    },

    #[error("{model}: key '{key}': {source}")]
    Assignment {
        model: &'static str,
        key: String,
        source: FieldError,
    },

    #[error("{model}: key '{key}': {source}")]
    Nested {
        model: &'static str,
        key: String,
        source: Box<Self>,
    },
}

impl DecodeError {
    /// Wire key the error is attached to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NullValue { key, .. }
            | Self::TypeMismatch { key, .. }
            | Self::Parser { key, .. }
            | Self::Assignment { key, .. }
            | Self::Nested { key, .. } => Some(key),
            Self::UnexpectedShape { .. } | Self::Json { .. } => None,
        }
    }

    /// Innermost error of a nested chain.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Nested { source, .. } => source.root(),
            other => other,
        }
    }
}

///
/// EncodeError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum EncodeError {
    #[error("non-finite float {value} has no JSON representation")]
    NonFiniteFloat { value: f64 },

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("{model}.{property}: {source}")]
    Field {
        model: &'static str,
        property: &'static str,
        source: Box<Self>,
    },
}
