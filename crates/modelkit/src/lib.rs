//! ## Crate layout
//! - `catalog`, `model`, `traits`, `value`: declared properties and their runtime values.
//! - `config`, `names`: per-type mapping configuration and key resolution.
//! - `entity`: change tracking with the validation/undo state machine.
//! - `mapper`: JSON decode/encode.
//! - `validator`: built-in property validators.
//! - `obs`: event sink and counters.
//! - `client` (feature `client`): async CRUD over a pluggable transport.
//!
//! `#[derive(Record)]` emits the per-type declaration; implement `Model`
//! (and `Resource` for remote types) by hand.

pub use modelkit_core::{
    Document, Error, catalog, config, entity, error, mapper, model, names, obs, traits, validator,
    value,
};
pub use modelkit_derive::Record;

#[cfg(feature = "client")]
pub use modelkit_client as client;

/// re-exports
///
/// derived code and user configuration can rely on these without adding
/// the crates to their own Cargo.toml
pub mod __reexports {
    pub use serde_json;
}

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// Domain vocabulary plus the traits needed to call their methods.
///

pub mod prelude {
    pub use crate::Record;
    pub use modelkit_core::prelude::*;

    #[cfg(feature = "client")]
    pub use modelkit_client::{Filter, Resource, ResourceClient, Verb};
}
