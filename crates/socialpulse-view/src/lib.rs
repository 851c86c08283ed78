//! SocialPulse View Projections
//!
//! Pure functions from store payloads to display-ready rows and series.
//! Nothing here holds state; callers recompute from a fresh
//! [`socialpulse_store::DashboardSnapshot`] whenever the store changes.

pub mod charts;
pub mod controls;
pub mod page;
pub mod panel;
pub mod tables;
pub mod text;

pub use charts::{
    KeywordTag, SentimentSlice, TimelineRow, TopicBar, ViralityCard, keyword_cloud,
    sentiment_chart, timeline_rows, topic_chart, virality_cards,
};
pub use controls::{FilterChip, SelectControl, SelectOption, filter_chips, select_controls};
pub use page::{PageView, Section, SectionBody, compose, compose_page, filtered_sections};
pub use panel::{EMPTY_MESSAGE, Panel};
pub use tables::{
    InfluencerRow, OverviewCard, PostRow, SentimentLabel, influencer_rows, overview_cards,
    post_rows,
};
