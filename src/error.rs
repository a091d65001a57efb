use std::any::Any;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error envelope returned by the Gemini API, e.g. `403 PERMISSION_DENIED`.
    #[error("{code} {status}. {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    #[error("Empty response from model: {reason}")]
    EmptyResponse { reason: String },

    #[error("Request error: {0}")]
    Request(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// True for failures that originate in talking to the upstream API:
    /// error envelopes, transport errors, and responses we could not use.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::EmptyResponse { .. }
                | Self::Network(_)
                | Self::Serialization(_)
        )
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
