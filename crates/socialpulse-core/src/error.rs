//! Error types for SocialPulse Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connect, DNS, timeout, reset)
    #[error("Network failure: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The backend answered 2xx but the body did not match the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown filter key: {0}")]
    UnknownFilterKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Network(_) => "network",
            Error::Server { .. } => "server",
            Error::MalformedResponse(_) => "malformed",
            Error::Config(_) => "config",
            Error::UnknownFilterKey(_) => "filter_key",
            Error::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
