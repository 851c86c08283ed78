//! SocialPulse command-line dashboard
//!
//! Configuration loading and terminal rendering, shared by the
//! `socialpulse` binary and its tests.

pub mod config;
pub mod render;

pub use config::{ApiConfig, SocialPulseConfig};
