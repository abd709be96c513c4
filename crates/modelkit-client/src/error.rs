use crate::{ThisError, resource::Verb};
use modelkit_core::mapper::{DecodeError, EncodeError};

///
/// ClientError
///
/// Every CRUD future resolves to `Result<_, ClientError>`. The variants keep
/// configuration mistakes, transport failures, service rejections, and
/// malformed payloads apart.
///

#[derive(Debug, ThisError)]
pub enum ClientError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("malformed response: {0}")]
    Malformed(#[from] DecodeError),

    #[error("request encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

impl ClientError {
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// HTTP status of a service rejection.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Service(ServiceError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

///
/// ConfigurationError
/// Programmer error: the resource cannot be addressed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigurationError {
    #[error("{model} has no endpoint")]
    MissingEndpoint { model: &'static str },

    #[error("{model} has no object path")]
    MissingObjectPath { model: &'static str },
}

///
/// ServiceError
/// The remote service answered, but not with a usable success.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ServiceError {
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{verb} response had no body")]
    MissingBody { verb: Verb },
}

///
/// TransportError
/// Opaque failure below HTTP semantics: connect, TLS, timeout, body read.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("transport failure: {message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn timed_out(&self) -> bool {
        self.timed_out
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

///
/// ConfigError
/// Transport configuration could not be loaded.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}
