//! Runtime field model definitions.
//!
//! Types in `model` are the explicit declarations a record makes about its
//! tracked properties. The derive macro emits them; the catalog caches them.
//!
//! In general:
//! - `Record::declare_fields` defines *what exists*
//! - `catalog` defines *what is looked up*

use crate::{
    Document,
    mapper::{self, DecodeError, EncodeError},
    traits::{FieldValue, Model},
    value::Value,
};
use serde_json::Value as JsonValue;
use std::fmt;

///
/// FieldModel
/// Declared metadata for one tracked property.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldModel {
    /// Property name as used by setters, validators, and the rename table.
    pub name: &'static str,
    /// Declared (static) type tag.
    pub kind: FieldKind,
    /// Whether the property accepts an explicit null.
    pub optional: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, optional: bool) -> Self {
        Self {
            name,
            kind,
            optional,
        }
    }

    /// Build the declaration for a Rust field type.
    #[must_use]
    pub fn of<T: FieldValue>(name: &'static str) -> Self {
        Self::new(name, T::kind(), T::optional())
    }
}

///
/// FieldKind
///
/// Type tag of a declared property.
/// Aligned with `Value` variants; `Record` carries the nested codec.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Bool,
    Float,
    Int,
    Json,
    List(Box<Self>),
    Record(RecordCodec),
    Text,
    Uint,
}

impl FieldKind {
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Float => write!(f, "float"),
            Self::Int => write!(f, "int"),
            Self::Json => write!(f, "json"),
            Self::List(inner) => write!(f, "list<{inner}>"),
            Self::Record(codec) => write!(f, "record<{}>", codec.path),
            Self::Text => write!(f, "text"),
            Self::Uint => write!(f, "uint"),
        }
    }
}

///
/// RecordCodec
///
/// Type-erased handle for mapping a nested record with its own
/// configuration. Two codecs are equal when they name the same type path.
///

#[derive(Clone, Copy)]
pub struct RecordCodec {
    pub path: &'static str,
    decode: fn(&Document) -> Result<Value, DecodeError>,
    encode: fn(&Value) -> Result<JsonValue, EncodeError>,
}

impl RecordCodec {
    #[must_use]
    pub fn of<M: Model>() -> Self {
        Self {
            path: M::PATH,
            decode: mapper::decode_record_value::<M>,
            encode: mapper::encode_record_value::<M>,
        }
    }

    pub fn decode(&self, document: &Document) -> Result<Value, DecodeError> {
        (self.decode)(document)
    }

    pub fn encode(&self, value: &Value) -> Result<JsonValue, EncodeError> {
        (self.encode)(value)
    }
}

impl fmt::Debug for RecordCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCodec")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl PartialEq for RecordCodec {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}
