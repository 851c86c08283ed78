//! SocialPulse Core Types and Traits
//!
//! This crate provides the fundamental types shared by every SocialPulse crate:
//! - Filter selection and its query-string form
//! - Data categories and backend payload records
//! - The backend API trait abstraction
//! - Core error types

pub mod api;
pub mod category;
pub mod error;
pub mod filters;
pub mod models;

pub use api::DashboardApi;
pub use category::Category;
pub use error::{Error, Result};
pub use filters::{FilterKey, FilterSet};
pub use models::Payload;
