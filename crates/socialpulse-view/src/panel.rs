//! Render state of a single dashboard panel

use serde::Serialize;
use socialpulse_core::Payload;
use socialpulse_store::{QuerySlice, QueryStatus};

pub const EMPTY_MESSAGE: &str = "No data available";

/// What a panel should show for its category
///
/// Every slice state maps to a variant, so a failed or missing category
/// renders a fallback instead of aborting the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    Loading,
    Empty,
    Failed(String),
    Ready(T),
}

impl<T> Panel<T> {
    /// Project a slice through `project`
    ///
    /// `project` returns `None` when the payload has nothing to show.
    /// A rejected slice is always `Failed`, even if it still holds the
    /// payload of an earlier success. A pending slice keeps showing its last
    /// payload.
    pub fn from_slice<F>(slice: &QuerySlice, project: F) -> Self
    where
        F: FnOnce(&Payload) -> Option<T>,
    {
        if slice.status == QueryStatus::Rejected {
            return Panel::Failed(
                slice
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Request failed".to_string()),
            );
        }

        match slice.payload.as_ref().and_then(project) {
            Some(value) => Panel::Ready(value),
            None if slice.status == QueryStatus::Pending => Panel::Loading,
            None => Panel::Empty,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Panel<U> {
        match self {
            Panel::Loading => Panel::Loading,
            Panel::Empty => Panel::Empty,
            Panel::Failed(message) => Panel::Failed(message),
            Panel::Ready(value) => Panel::Ready(f(value)),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }

    /// Placeholder text for the non-ready states
    pub fn message(&self) -> Option<&str> {
        match self {
            Panel::Loading => Some("Loading..."),
            Panel::Empty => Some(EMPTY_MESSAGE),
            Panel::Failed(message) => Some(message.as_str()),
            Panel::Ready(_) => None,
        }
    }
}

/// `Some(items)` unless the list is empty
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}
