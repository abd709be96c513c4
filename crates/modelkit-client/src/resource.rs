use modelkit_core::{Document, traits::Model};
use derive_more::Display;
use serde_json::Value as JsonValue;

///
/// Verb
/// CRUD operation; each maps to one fixed HTTP method.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Verb {
    Create,
    Retrieve,
    Update,
    Destroy,
}

impl Verb {
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Create => Method::Post,
            Self::Retrieve => Method::Get,
            Self::Update => Method::Put,
            Self::Destroy => Method::Delete,
        }
    }
}

///
/// Method
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Method {
    #[display("POST")]
    Post,
    #[display("GET")]
    Get,
    #[display("PUT")]
    Put,
    #[display("DELETE")]
    Delete,
}

///
/// Resource
///
/// Remote addressing and per-verb shaping for a model.
/// Paths are joined onto `endpoint()` unless they are absolute URLs.
///

pub trait Resource: Model {
    /// Base URL of the collection. `None` makes every request fail with
    /// `ConfigurationError::MissingEndpoint`.
    fn endpoint() -> Option<String> {
        None
    }

    /// Path of this instance, used by update and destroy.
    fn object_path(&self) -> Option<String> {
        None
    }

    /// Path of the instance with `id`, used by `retrieve_one`.
    fn identified_path(_id: &str) -> Option<String> {
        None
    }

    /// Final say over the outgoing document (body, or query parameters for
    /// retrieve).
    fn prepare_request(_verb: Verb, document: Document) -> Document {
        document
    }

    /// Final say over the parsed response before it is decoded.
    fn prepare_response(_verb: Verb, body: JsonValue) -> JsonValue {
        body
    }
}

/// Join `path` onto `endpoint`; absolute `http(s)://` paths are used as-is.
pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = endpoint.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
