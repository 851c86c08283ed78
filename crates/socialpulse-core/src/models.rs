//! Backend payload records
//!
//! Field names follow the backend's camelCase JSON. Aggregation results key
//! their group by `_id`; plain `id` is accepted as well.

use crate::category::Category;
use serde::{Deserialize, Deserializer, Serialize};

/// Aggregation stages emit `null` for fields no grouped document carried
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /stats/overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub engagement: Option<EngagementAverages>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementAverages {
    pub avg_likes: Option<f64>,
    pub avg_shares: Option<f64>,
    pub avg_comments: Option<f64>,
}

/// `GET /posts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<PostRecord>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostRecord {
    #[serde(alias = "_id")]
    pub post_id: Option<String>,
    pub platform: Option<String>,
    pub source_id: Option<String>,
    pub text: Option<String>,
    pub combined_text: Option<String>,
    pub sentiment: Option<String>,
    pub sentiment_confidence: Option<f64>,
    pub topics: Vec<String>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub shares: Option<u64>,
    /// Publication time as sent by the backend (ISO 8601)
    pub time: Option<String>,
    pub url: Option<String>,
}

/// One bucket of `GET /sentiment/distribution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBucket {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub count: u64,
    #[serde(default)]
    pub avg_confidence: Option<f64>,
}

/// One bucket of `GET /topics/distribution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicBucket {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub count: u64,
    #[serde(default)]
    pub avg_engagement: Option<f64>,
}

/// One account of `GET /influencers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_posts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_shares: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_engagement: u64,
    /// Mean sentiment score in `[-1, 1]`
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_sentiment: f64,
}

/// One post of `GET /virality/early-signals`, pre-sorted by velocity descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralitySignal {
    pub post_id: String,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub combined_text: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shares: u64,
    pub hours_since_post: f64,
    /// Engagement per hour since posting
    pub velocity: f64,
}

/// One `(date, sentiment)` bucket of `GET /trends/timeline`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBucket {
    #[serde(rename = "_id", alias = "id")]
    pub id: TimelineKey,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineKey {
    pub date: String,
    pub sentiment: String,
}

/// One entry of `GET /keywords/frequency`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: u64,
}

/// `GET /filters/options`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub sources: Vec<String>,
    pub platforms: Vec<String>,
    pub sentiments: Vec<String>,
    pub topics: Vec<String>,
}

/// A decoded response for any category
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    OverviewStats(OverviewStats),
    Posts(PostsPage),
    SentimentDistribution(Vec<SentimentBucket>),
    TopicDistribution(Vec<TopicBucket>),
    Influencers(Vec<Influencer>),
    ViralitySignals(Vec<ViralitySignal>),
    Timeline(Vec<TimelineBucket>),
    Keywords(Vec<KeywordCount>),
    FilterOptions(FilterOptions),
}

impl Payload {
    pub fn category(&self) -> Category {
        match self {
            Payload::OverviewStats(_) => Category::OverviewStats,
            Payload::Posts(_) => Category::Posts,
            Payload::SentimentDistribution(_) => Category::SentimentDistribution,
            Payload::TopicDistribution(_) => Category::TopicDistribution,
            Payload::Influencers(_) => Category::Influencers,
            Payload::ViralitySignals(_) => Category::ViralitySignals,
            Payload::Timeline(_) => Category::Timeline,
            Payload::Keywords(_) => Category::Keywords,
            Payload::FilterOptions(_) => Category::FilterOptions,
        }
    }

    /// Decode a raw JSON body into the typed payload for `category`
    pub fn from_json(category: Category, value: serde_json::Value) -> crate::Result<Self> {
        let payload = match category {
            Category::OverviewStats => Payload::OverviewStats(serde_json::from_value(value)?),
            Category::Posts => Payload::Posts(serde_json::from_value(value)?),
            Category::SentimentDistribution => {
                Payload::SentimentDistribution(serde_json::from_value(value)?)
            }
            Category::TopicDistribution => {
                Payload::TopicDistribution(serde_json::from_value(value)?)
            }
            Category::Influencers => Payload::Influencers(serde_json::from_value(value)?),
            Category::ViralitySignals => Payload::ViralitySignals(serde_json::from_value(value)?),
            Category::Timeline => Payload::Timeline(serde_json::from_value(value)?),
            Category::Keywords => Payload::Keywords(serde_json::from_value(value)?),
            Category::FilterOptions => Payload::FilterOptions(serde_json::from_value(value)?),
        };
        Ok(payload)
    }

    /// Number of records carried, used for logging
    pub fn len(&self) -> usize {
        match self {
            Payload::OverviewStats(_) | Payload::FilterOptions(_) => 1,
            Payload::Posts(page) => page.posts.len(),
            Payload::SentimentDistribution(items) => items.len(),
            Payload::TopicDistribution(items) => items.len(),
            Payload::Influencers(items) => items.len(),
            Payload::ViralitySignals(items) => items.len(),
            Payload::Timeline(items) => items.len(),
            Payload::Keywords(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentiment_bucket_accepts_underscore_id() {
        let buckets: Vec<SentimentBucket> = serde_json::from_value(json!([
            {"_id": "positive", "count": 12, "avgConfidence": 0.91},
            {"id": "negative", "count": 3}
        ]))
        .unwrap();

        assert_eq!(buckets[0].id, "positive");
        assert_eq!(buckets[0].avg_confidence, Some(0.91));
        assert_eq!(buckets[1].id, "negative");
        assert_eq!(buckets[1].avg_confidence, None);
    }

    #[test]
    fn test_timeline_bucket_nested_key() {
        let payload = Payload::from_json(
            Category::Timeline,
            json!([{"_id": {"date": "2024-01-01", "sentiment": "positive"}, "count": 5}]),
        )
        .unwrap();

        match payload {
            Payload::Timeline(items) => {
                assert_eq!(items[0].id.date, "2024-01-01");
                assert_eq!(items[0].id.sentiment, "positive");
                assert_eq!(items[0].count, 5);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_posts_page_ignores_unknown_fields() {
        let payload = Payload::from_json(
            Category::Posts,
            json!({
                "posts": [{"postId": "p1", "platform": "twitter", "likes": 4, "extra": true}],
                "total": 120
            }),
        )
        .unwrap();

        assert_eq!(payload.category(), Category::Posts);
        assert_eq!(payload.len(), 1);
        if let Payload::Posts(page) = payload {
            assert_eq!(page.total, 120);
            assert_eq!(page.posts[0].likes, Some(4));
            assert!(page.posts[0].topics.is_empty());
        }
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = Payload::from_json(Category::Keywords, json!({"words": []})).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_influencer_null_averages_default_to_zero() {
        let payload = Payload::from_json(
            Category::Influencers,
            json!([{"_id": "acct", "totalPosts": 3, "totalLikes": null, "avgSentiment": null}]),
        )
        .unwrap();

        match payload {
            Payload::Influencers(items) => {
                assert_eq!(items[0].id, "acct");
                assert_eq!(items[0].total_posts, 3);
                assert_eq!(items[0].total_likes, 0);
                assert_eq!(items[0].avg_sentiment, 0.0);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_virality_null_counts_default_to_zero() {
        let payload = Payload::from_json(
            Category::ViralitySignals,
            json!([{
                "postId": "p1",
                "likes": null,
                "comments": 2,
                "hoursSincePost": 3.0,
                "velocity": 1.5
            }]),
        )
        .unwrap();

        match payload {
            Payload::ViralitySignals(items) => {
                assert_eq!(items[0].likes, 0);
                assert_eq!(items[0].comments, 2);
                assert_eq!(items[0].shares, 0);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_filter_options_missing_lists_default_empty() {
        let payload =
            Payload::from_json(Category::FilterOptions, json!({"platforms": ["twitter"]})).unwrap();
        assert_eq!(
            payload,
            Payload::FilterOptions(FilterOptions {
                platforms: vec!["twitter".to_string()],
                ..Default::default()
            })
        );
    }
}
