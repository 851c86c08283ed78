//! Filter selection shared by every filter-scoped query
//!
//! Every field is a plain string where the empty string means
//! "unconstrained". Empty fields never reach the wire: `query_pairs` is the
//! only path from a `FilterSet` to outgoing parameters.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One field of a [`FilterSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Keyword,
    Sentiment,
    StartDate,
    EndDate,
    Platform,
    SourceId,
    Topic,
}

impl FilterKey {
    /// All keys in declaration (and serialization) order
    pub const ALL: [FilterKey; 7] = [
        FilterKey::Keyword,
        FilterKey::Sentiment,
        FilterKey::StartDate,
        FilterKey::EndDate,
        FilterKey::Platform,
        FilterKey::SourceId,
        FilterKey::Topic,
    ];

    /// Query parameter name used by the backend
    pub fn wire_name(&self) -> &'static str {
        match self {
            FilterKey::Keyword => "keyword",
            FilterKey::Sentiment => "sentiment",
            FilterKey::StartDate => "startDate",
            FilterKey::EndDate => "endDate",
            FilterKey::Platform => "platform",
            FilterKey::SourceId => "sourceId",
            FilterKey::Topic => "topic",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FilterKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.wire_name() == s)
            .ok_or_else(|| Error::UnknownFilterKey(s.to_string()))
    }
}

/// Current filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    pub keyword: String,
    /// One of `positive`, `neutral`, `negative`, or empty
    pub sentiment: String,
    /// ISO date (`YYYY-MM-DD`) or empty
    pub start_date: String,
    /// ISO date (`YYYY-MM-DD`) or empty
    pub end_date: String,
    pub platform: String,
    pub source_id: String,
    pub topic: String,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and CLI wiring
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::Keyword => &self.keyword,
            FilterKey::Sentiment => &self.sentiment,
            FilterKey::StartDate => &self.start_date,
            FilterKey::EndDate => &self.end_date,
            FilterKey::Platform => &self.platform,
            FilterKey::SourceId => &self.source_id,
            FilterKey::Topic => &self.topic,
        }
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let slot = match key {
            FilterKey::Keyword => &mut self.keyword,
            FilterKey::Sentiment => &mut self.sentiment,
            FilterKey::StartDate => &mut self.start_date,
            FilterKey::EndDate => &mut self.end_date,
            FilterKey::Platform => &mut self.platform,
            FilterKey::SourceId => &mut self.source_id,
            FilterKey::Topic => &mut self.topic,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field constrains the query
    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.iter().all(|key| self.get(*key).is_empty())
    }

    /// Non-empty fields in declaration order
    pub fn active(&self) -> Vec<(FilterKey, &str)> {
        FilterKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    /// Query parameters for the backend; empty fields are omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        self.active()
            .into_iter()
            .map(|(key, value)| (key.wire_name(), value))
            .collect()
    }
}
