//! Social-listening backend connector

use crate::{
    EgressError, Result,
    client::{HttpClientConfig, create_client},
};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::de::DeserializeOwned;
use socialpulse_core::{
    Category, DashboardApi, FilterSet,
    models::{
        FilterOptions, Influencer, KeywordCount, OverviewStats, PostsPage, SentimentBucket,
        TimelineBucket, TopicBucket, ViralitySignal,
    },
};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

const EXPORT_PATH: &str = "/posts/export";

/// Backend connector configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the API, including any `/api` prefix
    pub base_url: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_config: HttpClientConfig::default(),
        }
    }
}

impl BackendConfig {
    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP client configuration
    pub fn with_client_config(mut self, client_config: HttpClientConfig) -> Self {
        self.client_config = client_config;
        self
    }
}

/// Backend connector
pub struct BackendConnector {
    base_url: String,
    client: Client,
}

impl BackendConnector {
    /// Create a new backend connector
    pub fn new(config: BackendConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(EgressError::ConfigError("base_url must not be empty".to_string()));
        }
        let client = create_client(&config.client_config)?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `<base><path>[?<non-empty filters>]`
    pub fn build_url(&self, path: &str, filters: Option<&FilterSet>) -> Result<String> {
        let mut url = format!("{}{}", self.base_url, path);
        if let Some(filters) = filters {
            let pairs = filters.query_pairs();
            if !pairs.is_empty() {
                let query = serde_urlencoded::to_string(&pairs).map_err(|e| {
                    EgressError::ConfigError(format!("Failed to encode filters: {}", e))
                })?;
                url.push('?');
                url.push_str(&query);
            }
        }
        Ok(url)
    }

    /// GET a category endpoint and decode its JSON body
    #[instrument(skip_all, fields(category = %category))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        category: Category,
        filters: Option<&FilterSet>,
    ) -> Result<T> {
        let scoped = if category.is_filter_scoped() {
            filters
        } else {
            None
        };
        let url = self.build_url(category.path(), scoped)?;
        debug!(url = %url, "Fetching from backend");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;

        let body = response.bytes().await?;
        serde_json::from_slice::<T>(&body).map_err(|e| {
            warn!(error = %e, body_len = body.len(), "Backend response did not match expected shape");
            EgressError::ParseError(format!("Failed to parse {} response: {}", category, e))
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        warn!(status = status_code, "Backend returned error status");

        Err(EgressError::ServerError {
            status_code,
            message,
        })
    }

    /// Stream the CSV export for `filters` into `writer` without parsing it.
    /// Returns the number of bytes written.
    #[instrument(skip_all)]
    pub async fn download_export<W>(&self, filters: &FilterSet, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let url = self.build_url(EXPORT_PATH, Some(filters))?;
        debug!(url = %url, "Downloading CSV export");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        debug!(bytes = written, "CSV export downloaded");
        Ok(written)
    }
}

#[async_trait]
impl DashboardApi for BackendConnector {
    async fn overview_stats(&self) -> socialpulse_core::Result<OverviewStats> {
        Ok(self.get_json(Category::OverviewStats, None).await?)
    }

    async fn posts(&self, filters: &FilterSet) -> socialpulse_core::Result<PostsPage> {
        Ok(self.get_json(Category::Posts, Some(filters)).await?)
    }

    async fn sentiment_distribution(
        &self,
        filters: &FilterSet,
    ) -> socialpulse_core::Result<Vec<SentimentBucket>> {
        Ok(self
            .get_json(Category::SentimentDistribution, Some(filters))
            .await?)
    }

    async fn topic_distribution(
        &self,
        filters: &FilterSet,
    ) -> socialpulse_core::Result<Vec<TopicBucket>> {
        Ok(self
            .get_json(Category::TopicDistribution, Some(filters))
            .await?)
    }

    async fn influencers(&self, filters: &FilterSet) -> socialpulse_core::Result<Vec<Influencer>> {
        Ok(self.get_json(Category::Influencers, Some(filters)).await?)
    }

    async fn virality_signals(&self) -> socialpulse_core::Result<Vec<ViralitySignal>> {
        Ok(self.get_json(Category::ViralitySignals, None).await?)
    }

    async fn timeline(&self, filters: &FilterSet) -> socialpulse_core::Result<Vec<TimelineBucket>> {
        Ok(self.get_json(Category::Timeline, Some(filters)).await?)
    }

    async fn keywords(&self, filters: &FilterSet) -> socialpulse_core::Result<Vec<KeywordCount>> {
        Ok(self.get_json(Category::Keywords, Some(filters)).await?)
    }

    async fn filter_options(&self) -> socialpulse_core::Result<FilterOptions> {
        Ok(self.get_json(Category::FilterOptions, None).await?)
    }

    fn export_url(&self, filters: &FilterSet) -> String {
        // Only the encoder can fail here, and it cannot fail on string pairs
        self.build_url(EXPORT_PATH, Some(filters))
            .unwrap_or_else(|_| format!("{}{}", self.base_url, EXPORT_PATH))
    }
}
