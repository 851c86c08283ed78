//! SocialPulse Dashboard Store
//!
//! Holds the filter selection, UI state, and one query slice per data
//! category. Fetches are dispatched as independent tasks; each resolution
//! writes only its own category's slice.

pub mod config;
pub mod slice;
pub mod store;
pub mod ui;

pub use config::{StalePolicy, StoreConfig};
pub use slice::{QuerySlice, QueryStatus};
pub use store::{DashboardSnapshot, DashboardStore, Dispatch, Resolution};
pub use ui::{Page, UiState};
