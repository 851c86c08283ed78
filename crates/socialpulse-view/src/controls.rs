//! Filter panel projections

use crate::text::{capitalize, humanize};
use serde::Serialize;
use socialpulse_core::{FilterKey, FilterSet, models::FilterOptions};

/// One active filter, shown as a removable chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub key: FilterKey,
    pub value: String,
}

impl FilterChip {
    pub fn label(&self) -> String {
        format!("{}: {}", self.key.wire_name(), self.value)
    }
}

pub fn filter_chips(filters: &FilterSet) -> Vec<FilterChip> {
    filters
        .active()
        .into_iter()
        .map(|(key, value)| FilterChip {
            key,
            value: value.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A drop-down populated from the backend's filter options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectControl {
    pub key: FilterKey,
    pub title: &'static str,
    /// Entry for the empty value
    pub placeholder: &'static str,
    pub selected: String,
    pub options: Vec<SelectOption>,
}

fn options(values: &[String], label: impl Fn(&str) -> String) -> Vec<SelectOption> {
    values
        .iter()
        .map(|value| SelectOption {
            value: value.clone(),
            label: label(value),
        })
        .collect()
}

pub fn select_controls(available: &FilterOptions, filters: &FilterSet) -> Vec<SelectControl> {
    vec![
        SelectControl {
            key: FilterKey::Sentiment,
            title: "Sentiment",
            placeholder: "All Sentiments",
            selected: filters.sentiment.clone(),
            options: options(&available.sentiments, capitalize),
        },
        SelectControl {
            key: FilterKey::Platform,
            title: "Platform",
            placeholder: "All Platforms",
            selected: filters.platform.clone(),
            options: options(&available.platforms, capitalize),
        },
        SelectControl {
            key: FilterKey::SourceId,
            title: "Source Account",
            placeholder: "All Sources",
            selected: filters.source_id.clone(),
            options: options(&available.sources, str::to_string),
        },
        SelectControl {
            key: FilterKey::Topic,
            title: "Topic",
            placeholder: "All Topics",
            selected: filters.topic.clone(),
            options: options(&available.topics, humanize),
        },
    ]
}
