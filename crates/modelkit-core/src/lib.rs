//! Core runtime for modelkit: values, field models, per-type catalog and
//! configuration registries, the entity validation state machine, and the
//! JSON mapper.
#![warn(unreachable_pub)]

extern crate self as modelkit;

mod registry;

// public exports are one module level down
pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod model;
pub mod names;
pub mod obs;
pub mod traits;
pub mod validator;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;
pub(crate) use thiserror::Error as ThisError;

///
/// Document
///
/// Wire document exchanged with a remote resource: string keys mapped to
/// JSON scalars, arrays, objects, or explicit null.
///

pub type Document = serde_json::Map<String, serde_json::Value>;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, registries, or sinks are re-exported here.
///

pub mod prelude {
    pub use crate::{
        Document,
        config::ModelConfig,
        entity::{Entity, ValidationState},
        traits::{FieldValue, Model, Path, Record},
        value::Value,
    };
}
