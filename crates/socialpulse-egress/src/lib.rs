//! SocialPulse Egress Connector
//!
//! This crate provides the HTTP connector to the social-listening backend:
//! - Shared HTTP client construction
//! - Backend connector implementing `DashboardApi`
//! - CSV export URL building and download

pub mod backend;
pub mod client;

pub use backend::{BackendConfig, BackendConnector};
pub use client::{HttpClientConfig, create_client};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EgressError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Backend returned {status_code}: {message}")]
    ServerError { status_code: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EgressError>;

impl From<EgressError> for socialpulse_core::Error {
    fn from(err: EgressError) -> Self {
        match err {
            EgressError::HttpError(e) if e.is_decode() => {
                socialpulse_core::Error::MalformedResponse(e.to_string())
            }
            EgressError::HttpError(e) => socialpulse_core::Error::Network(e.to_string()),
            EgressError::ServerError {
                status_code,
                message,
            } => socialpulse_core::Error::Server {
                status: status_code,
                message,
            },
            EgressError::ParseError(msg) => socialpulse_core::Error::MalformedResponse(msg),
            EgressError::ConfigError(msg) => socialpulse_core::Error::Config(msg),
            EgressError::Io(e) => socialpulse_core::Error::Io(e),
        }
    }
}
