//! Overview cards and table rows

use crate::text::despace;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use socialpulse_core::models::{Influencer, OverviewStats, PostRecord};
use std::fmt;

pub const POSTS_TABLE_LIMIT: usize = 50;

/// Influencer average sentiment beyond this magnitude is labelled
/// positive or negative
pub const SENTIMENT_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewCard {
    pub title: &'static str,
    pub value: u64,
    pub description: &'static str,
}

fn rounded(value: Option<f64>) -> u64 {
    value.unwrap_or(0.0).round() as u64
}

pub fn overview_cards(stats: &OverviewStats) -> Vec<OverviewCard> {
    let engagement = stats.engagement.clone().unwrap_or_default();
    vec![
        OverviewCard {
            title: "Total Posts",
            value: stats.total_posts,
            description: "Across all platforms",
        },
        OverviewCard {
            title: "Avg Likes",
            value: rounded(engagement.avg_likes),
            description: "Per post",
        },
        OverviewCard {
            title: "Avg Shares",
            value: rounded(engagement.avg_shares),
            description: "Per post",
        },
        OverviewCard {
            title: "Avg Comments",
            value: rounded(engagement.avg_comments),
            description: "Per post",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > SENTIMENT_THRESHOLD {
            SentimentLabel::Positive
        } else if score < -SENTIMENT_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluencerRow {
    /// 1-based position in the backend's ordering
    pub rank: usize,
    pub account: String,
    pub posts: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub engagement: u64,
    pub avg_sentiment: f64,
    pub sentiment: SentimentLabel,
}

pub fn influencer_rows(influencers: &[Influencer]) -> Vec<InfluencerRow> {
    influencers
        .iter()
        .enumerate()
        .map(|(index, influencer)| InfluencerRow {
            rank: index + 1,
            account: influencer.id.clone(),
            posts: influencer.total_posts,
            likes: influencer.total_likes,
            shares: influencer.total_shares,
            comments: influencer.total_comments,
            engagement: influencer.total_engagement,
            avg_sentiment: influencer.avg_sentiment,
            sentiment: SentimentLabel::from_score(influencer.avg_sentiment),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRow {
    pub platform: String,
    pub source: String,
    pub text: String,
    pub sentiment: String,
    /// Classifier confidence as a whole percentage
    pub confidence_pct: Option<u32>,
    pub topics: Vec<String>,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    /// `YYYY-MM-DD`, or `N/A` when the post carries no parseable time
    pub date: String,
    pub url: Option<String>,
}

/// Accepts RFC 3339, naive ISO 8601 (`isoformat()`), RFC 2822, and bare dates
fn parse_post_date(time: &str) -> Option<NaiveDate> {
    let time = time.trim();
    DateTime::parse_from_rfc3339(time)
        .map(|t| t.date_naive())
        .or_else(|_| DateTime::parse_from_rfc2822(time).map(|t| t.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.f").map(|t| t.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S%.f").map(|t| t.date()))
        .or_else(|_| NaiveDate::parse_from_str(time, "%Y-%m-%d"))
        .ok()
}

fn post_date(time: Option<&str>) -> String {
    time.and_then(parse_post_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn post_rows(posts: &[PostRecord]) -> Vec<PostRow> {
    posts
        .iter()
        .take(POSTS_TABLE_LIMIT)
        .map(|post| PostRow {
            platform: post.platform.clone().unwrap_or_default(),
            source: post.source_id.clone().unwrap_or_default(),
            text: non_empty(post.text.as_deref())
                .or(non_empty(post.combined_text.as_deref()))
                .unwrap_or("No text")
                .to_string(),
            sentiment: post.sentiment.clone().unwrap_or_default(),
            confidence_pct: post
                .sentiment_confidence
                .filter(|c| *c > 0.0)
                .map(|c| (c * 100.0).round() as u32),
            topics: post.topics.iter().map(|t| despace(t)).collect(),
            likes: post.likes.unwrap_or(0),
            comments: post.comments.unwrap_or(0),
            shares: post.shares.unwrap_or(0),
            date: post_date(post.time.as_deref()),
            url: post.url.clone().filter(|u| !u.is_empty()),
        })
        .collect()
}
