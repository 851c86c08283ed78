//! Chart series projections

use crate::text::{capitalize, humanize};
use serde::Serialize;
use socialpulse_core::models::{
    KeywordCount, SentimentBucket, TimelineBucket, TopicBucket, ViralitySignal,
};
use std::collections::BTreeMap;

pub const POSITIVE_COLOR: &str = "#10b981";
pub const NEUTRAL_COLOR: &str = "#6b7280";
pub const NEGATIVE_COLOR: &str = "#ef4444";

/// Colour for labels outside positive/neutral/negative
pub const FALLBACK_COLOR: &str = NEUTRAL_COLOR;

pub const KEYWORD_MIN_FONT: f64 = 12.0;
pub const KEYWORD_MAX_FONT: f64 = 44.0;

pub const KEYWORD_PALETTE: [&str; 6] = [
    "#2563eb", // blue
    "#16a34a", // green
    "#9333ea", // purple
    "#ea580c", // orange
    "#dc2626", // red
    "#4f46e5", // indigo
];

pub const VIRALITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSlice {
    pub label: String,
    pub value: u64,
    pub confidence: Option<f64>,
    pub color: &'static str,
}

/// Colour of a capitalized sentiment label
pub fn sentiment_color(label: &str) -> &'static str {
    match label {
        "Positive" => POSITIVE_COLOR,
        "Neutral" => NEUTRAL_COLOR,
        "Negative" => NEGATIVE_COLOR,
        _ => FALLBACK_COLOR,
    }
}

pub fn sentiment_chart(buckets: &[SentimentBucket]) -> Vec<SentimentSlice> {
    buckets
        .iter()
        .map(|bucket| {
            let label = capitalize(&bucket.id);
            let color = sentiment_color(&label);
            SentimentSlice {
                label,
                value: bucket.count,
                confidence: bucket.avg_confidence,
                color,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicBar {
    pub label: String,
    pub posts: u64,
    pub engagement: u64,
}

pub fn topic_chart(buckets: &[TopicBucket]) -> Vec<TopicBar> {
    buckets
        .iter()
        .map(|bucket| TopicBar {
            label: humanize(&bucket.id),
            posts: bucket.count,
            engagement: bucket.avg_engagement.unwrap_or(0.0).round() as u64,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub date: String,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// One row per date, ascending by date string. Sentiments other than the
/// three known ones are dropped.
pub fn timeline_rows(buckets: &[TimelineBucket]) -> Vec<TimelineRow> {
    let mut rows: BTreeMap<&str, TimelineRow> = BTreeMap::new();
    for bucket in buckets {
        let date = bucket.id.date.as_str();
        let row = rows.entry(date).or_insert_with(|| TimelineRow {
            date: date.to_string(),
            ..Default::default()
        });
        match bucket.id.sentiment.as_str() {
            "positive" => row.positive = bucket.count,
            "neutral" => row.neutral = bucket.count,
            "negative" => row.negative = bucket.count,
            _ => {}
        }
    }
    rows.into_values().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordTag {
    pub word: String,
    pub count: u64,
    pub font_size: f64,
    pub color: &'static str,
}

/// Font size for `count` relative to the largest count in the result set
pub fn keyword_font_size(count: u64, max_count: u64) -> f64 {
    if max_count == 0 {
        return KEYWORD_MIN_FONT;
    }
    let ratio = count as f64 / max_count as f64;
    KEYWORD_MIN_FONT + ratio * (KEYWORD_MAX_FONT - KEYWORD_MIN_FONT)
}

pub fn keyword_cloud(keywords: &[KeywordCount]) -> Vec<KeywordTag> {
    let max_count = keywords.iter().map(|k| k.count).max().unwrap_or(0);
    keywords
        .iter()
        .enumerate()
        .map(|(index, keyword)| KeywordTag {
            word: keyword.word.clone(),
            count: keyword.count,
            font_size: keyword_font_size(keyword.count, max_count),
            color: KEYWORD_PALETTE[index % KEYWORD_PALETTE.len()],
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViralityCard {
    pub post_id: String,
    pub source_id: String,
    pub platform: String,
    pub sentiment: Option<String>,
    pub text: String,
    /// Engagement per hour since posting
    pub velocity: f64,
    pub hours_since_post: f64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// First entries of the backend's velocity-sorted list, order preserved
pub fn virality_cards(signals: &[ViralitySignal]) -> Vec<ViralityCard> {
    signals
        .iter()
        .take(VIRALITY_LIMIT)
        .map(|signal| ViralityCard {
            post_id: signal.post_id.clone(),
            source_id: signal.source_id.clone().unwrap_or_default(),
            platform: signal.platform.clone().unwrap_or_default(),
            sentiment: signal.sentiment.clone().filter(|s| !s.is_empty()),
            text: signal
                .text
                .as_deref()
                .filter(|t| !t.is_empty())
                .or(signal.combined_text.as_deref().filter(|t| !t.is_empty()))
                .unwrap_or("No text available")
                .to_string(),
            velocity: signal.velocity,
            hours_since_post: signal.hours_since_post,
            likes: signal.likes,
            comments: signal.comments,
            shares: signal.shares,
        })
        .collect()
}
