//! Independent data categories fetched from the backend

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    OverviewStats,
    Posts,
    SentimentDistribution,
    TopicDistribution,
    Influencers,
    ViralitySignals,
    Timeline,
    Keywords,
    FilterOptions,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::OverviewStats,
        Category::Posts,
        Category::SentimentDistribution,
        Category::TopicDistribution,
        Category::Influencers,
        Category::ViralitySignals,
        Category::Timeline,
        Category::Keywords,
        Category::FilterOptions,
    ];

    /// Categories re-issued when filters are applied
    pub const APPLY: [Category; 5] = [
        Category::Posts,
        Category::SentimentDistribution,
        Category::TopicDistribution,
        Category::Timeline,
        Category::Keywords,
    ];

    /// Categories re-issued by a full dashboard refresh
    pub const REFRESH: [Category; 8] = [
        Category::OverviewStats,
        Category::Posts,
        Category::SentimentDistribution,
        Category::TopicDistribution,
        Category::Influencers,
        Category::ViralitySignals,
        Category::Timeline,
        Category::Keywords,
    ];

    /// Endpoint path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Category::OverviewStats => "/stats/overview",
            Category::Posts => "/posts",
            Category::SentimentDistribution => "/sentiment/distribution",
            Category::TopicDistribution => "/topics/distribution",
            Category::Influencers => "/influencers",
            Category::ViralitySignals => "/virality/early-signals",
            Category::Timeline => "/trends/timeline",
            Category::Keywords => "/keywords/frequency",
            Category::FilterOptions => "/filters/options",
        }
    }

    /// Whether the endpoint accepts the filter set as query parameters
    pub fn is_filter_scoped(&self) -> bool {
        !matches!(
            self,
            Category::OverviewStats | Category::ViralitySignals | Category::FilterOptions
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::OverviewStats => "overview_stats",
            Category::Posts => "posts",
            Category::SentimentDistribution => "sentiment_distribution",
            Category::TopicDistribution => "topic_distribution",
            Category::Influencers => "influencers",
            Category::ViralitySignals => "virality_signals",
            Category::Timeline => "timeline",
            Category::Keywords => "keywords",
            Category::FilterOptions => "filter_options",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
