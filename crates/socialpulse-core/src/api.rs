//! Backend API trait definitions

use crate::{
    Result,
    category::Category,
    filters::FilterSet,
    models::{
        FilterOptions, Influencer, KeywordCount, OverviewStats, Payload, PostsPage,
        SentimentBucket, TimelineBucket, TopicBucket, ViralitySignal,
    },
};

/// Request/response contract of the analytics backend
///
/// Filter-independent endpoints take no `FilterSet`. Implementations must omit
/// empty filter fields from outgoing parameters.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn overview_stats(&self) -> Result<OverviewStats>;

    async fn posts(&self, filters: &FilterSet) -> Result<PostsPage>;

    async fn sentiment_distribution(&self, filters: &FilterSet) -> Result<Vec<SentimentBucket>>;

    async fn topic_distribution(&self, filters: &FilterSet) -> Result<Vec<TopicBucket>>;

    async fn influencers(&self, filters: &FilterSet) -> Result<Vec<Influencer>>;

    async fn virality_signals(&self) -> Result<Vec<ViralitySignal>>;

    async fn timeline(&self, filters: &FilterSet) -> Result<Vec<TimelineBucket>>;

    async fn keywords(&self, filters: &FilterSet) -> Result<Vec<KeywordCount>>;

    async fn filter_options(&self) -> Result<FilterOptions>;

    /// URL of the CSV export for the given filters
    fn export_url(&self, filters: &FilterSet) -> String;

    /// Fetch any category, wrapping the result in a [`Payload`]
    async fn fetch(&self, category: Category, filters: &FilterSet) -> Result<Payload> {
        let payload = match category {
            Category::OverviewStats => Payload::OverviewStats(self.overview_stats().await?),
            Category::Posts => Payload::Posts(self.posts(filters).await?),
            Category::SentimentDistribution => {
                Payload::SentimentDistribution(self.sentiment_distribution(filters).await?)
            }
            Category::TopicDistribution => {
                Payload::TopicDistribution(self.topic_distribution(filters).await?)
            }
            Category::Influencers => Payload::Influencers(self.influencers(filters).await?),
            Category::ViralitySignals => Payload::ViralitySignals(self.virality_signals().await?),
            Category::Timeline => Payload::Timeline(self.timeline(filters).await?),
            Category::Keywords => Payload::Keywords(self.keywords(filters).await?),
            Category::FilterOptions => Payload::FilterOptions(self.filter_options().await?),
        };
        Ok(payload)
    }
}
