//! SocialPulse Observability
//!
//! This crate provides observability features:
//! - Structured logging bootstrap
//! - Fetch metrics collection (Prometheus)

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use metrics::{FetchMetrics, FetchOutcome};
