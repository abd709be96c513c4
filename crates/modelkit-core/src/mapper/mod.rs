//! JSON ⇄ record mapping.
//!
//! Decoding walks the incoming document key by key, resolving each key to a
//! declared property and coercing the raw JSON by the property's kind.
//! Encoding walks the catalog in declaration order. Both directions read the
//! type's cached `ModelConfig`, and nested records recurse through their own.

mod coerce;
mod decode;
mod encode;
mod error;

#[cfg(test)]
mod tests;

pub use decode::{decode, decode_document, decode_many, decode_record_value, decode_slice};
pub use encode::{encode, encode_json, encode_record_value};
pub use error::{DecodeError, EncodeError};

pub(crate) use decode::{Assignment, as_document, decode_assignments};
