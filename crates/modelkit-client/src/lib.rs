//! Thin asynchronous CRUD layer over the modelkit mapper.
//!
//! A `ResourceClient` encodes tracked entities, shapes requests per verb,
//! sends them through a pluggable `Transport`, and decodes responses back
//! into entities. Every operation resolves exactly once to a `Result`.

mod client;
mod config;
mod error;
mod filter;
mod resource;
pub mod transport;

pub use client::ResourceClient;
pub use config::TransportConfig;
pub use error::{ClientError, ConfigError, ConfigurationError, ServiceError, TransportError};
pub use filter::Filter;
pub use resource::{Method, Resource, Verb};
pub use transport::{HttpTransport, Request, Response, Transport};

pub(crate) use thiserror::Error as ThisError;
