//! Dashboard state container
//!
//! One `DashboardStore` is constructed per application instance and handed to
//! whoever needs it; clones share the same state. Every category's slice is an
//! independent entry in a concurrent map, so resolutions for different
//! categories never contend and a failure in one never touches another.
//!
//! Dispatch methods spawn onto the current Tokio runtime and must be called
//! from within one.

use crate::config::{StalePolicy, StoreConfig};
use crate::slice::{QuerySlice, QueryStatus};
use crate::ui::{Page, UiState};
use dashmap::DashMap;
use socialpulse_core::{
    Category, DashboardApi, FilterKey, FilterSet, Payload,
    models::{
        FilterOptions, Influencer, KeywordCount, OverviewStats, PostsPage, SentimentBucket,
        TimelineBucket, TopicBucket, ViralitySignal,
    },
};
use socialpulse_observability::{FetchMetrics, FetchOutcome};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What happened to a single fetch once it resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The result was written into the slice with this status
    Applied(QueryStatus),
    /// A newer fetch for the same category was dispatched; the result was dropped
    Discarded,
}

/// Handles for a batch of dispatched fetches
///
/// Dropping a `Dispatch` does not cancel anything; the fetches keep running
/// and still write their slices.
#[derive(Debug)]
pub struct Dispatch {
    handles: Vec<(Category, JoinHandle<Resolution>)>,
}

impl Dispatch {
    pub fn categories(&self) -> Vec<Category> {
        self.handles.iter().map(|(category, _)| *category).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every fetch in the batch to resolve
    pub async fn wait(self) -> Vec<(Category, Resolution)> {
        let mut resolutions = Vec::with_capacity(self.handles.len());
        for (category, handle) in self.handles {
            match handle.await {
                Ok(resolution) => resolutions.push((category, resolution)),
                Err(e) => warn!(category = %category, error = %e, "Fetch task did not complete"),
            }
        }
        resolutions
    }
}

/// Point-in-time copy of the whole store, for rendering
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub revision: u64,
    pub filters: FilterSet,
    pub ui: UiState,
    pub slices: BTreeMap<Category, QuerySlice>,
}

impl DashboardSnapshot {
    pub fn slice(&self, category: Category) -> &QuerySlice {
        // Every category is inserted at construction
        &self.slices[&category]
    }
}

struct Inner {
    api: Arc<dyn DashboardApi>,
    config: StoreConfig,
    filters: RwLock<FilterSet>,
    ui: RwLock<UiState>,
    slices: DashMap<Category, QuerySlice>,
    revision: watch::Sender<u64>,
    metrics: Option<FetchMetrics>,
}

impl Inner {
    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Move `category` to pending and hand out the generation for its fetch
    fn begin(&self, category: Category) -> u64 {
        let generation = self
            .slices
            .entry(category)
            .or_insert_with(|| QuerySlice::new(category))
            .begin();
        if let Some(metrics) = &self.metrics {
            metrics.record_dispatch(category.as_str());
        }
        self.bump();
        generation
    }

    fn resolve(
        &self,
        category: Category,
        generation: u64,
        result: socialpulse_core::Result<Payload>,
        elapsed: Duration,
    ) -> Resolution {
        let resolution = {
            let mut slice = self
                .slices
                .entry(category)
                .or_insert_with(|| QuerySlice::new(category));

            if self.config.stale_policy == StalePolicy::DiscardStale && slice.is_stale(generation)
            {
                debug!(
                    category = %category,
                    generation,
                    current = slice.generation,
                    "Discarding superseded response"
                );
                Resolution::Discarded
            } else {
                match result {
                    Ok(payload) => {
                        debug!(
                            category = %category,
                            generation,
                            records = payload.len(),
                            elapsed_ms = elapsed.as_millis() as u64,
                            "Fetch fulfilled"
                        );
                        slice.fulfill(generation, payload);
                        Resolution::Applied(QueryStatus::Fulfilled)
                    }
                    Err(e) => {
                        warn!(
                            category = %category,
                            generation,
                            error_kind = e.kind(),
                            error = %e,
                            "Fetch rejected"
                        );
                        slice.reject(generation, e.to_string());
                        Resolution::Applied(QueryStatus::Rejected)
                    }
                }
            }
        };

        if let Some(metrics) = &self.metrics {
            let outcome = match resolution {
                Resolution::Discarded => FetchOutcome::Stale,
                Resolution::Applied(QueryStatus::Rejected) => FetchOutcome::Rejected,
                Resolution::Applied(_) => FetchOutcome::Fulfilled,
            };
            metrics.record_resolution(category.as_str(), outcome, elapsed.as_secs_f64());
        }
        if resolution != Resolution::Discarded {
            self.bump();
        }
        resolution
    }
}

/// Filter/query state store
#[derive(Clone)]
pub struct DashboardStore {
    inner: Arc<Inner>,
}

impl DashboardStore {
    pub fn new(api: Arc<dyn DashboardApi>, config: StoreConfig) -> Self {
        Self::build(api, config, None)
    }

    /// Same as [`DashboardStore::new`], recording every fetch in `metrics`
    pub fn with_metrics(
        api: Arc<dyn DashboardApi>,
        config: StoreConfig,
        metrics: FetchMetrics,
    ) -> Self {
        Self::build(api, config, Some(metrics))
    }

    fn build(api: Arc<dyn DashboardApi>, config: StoreConfig, metrics: Option<FetchMetrics>) -> Self {
        let slices = DashMap::new();
        for category in Category::ALL {
            slices.insert(category, QuerySlice::new(category));
        }
        let (revision, _) = watch::channel(0);

        Self {
            inner: Arc::new(Inner {
                api,
                config,
                filters: RwLock::new(FilterSet::default()),
                ui: RwLock::new(UiState::default()),
                slices,
                revision,
                metrics,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// URL of the CSV export for the current filters
    pub fn export_url(&self) -> String {
        self.inner.api.export_url(&self.filters())
    }

    // ---- filters ----

    /// Set one filter field. Does not fetch anything.
    pub fn set_filter(&self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        debug!(key = %key, value = %value, "Filter changed");
        self.inner
            .filters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, value);
        self.inner.bump();
    }

    /// Restore every filter to empty. Does not fetch anything.
    pub fn reset_filters(&self) {
        debug!("Filters reset");
        self.inner
            .filters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.inner.bump();
    }

    pub fn filters(&self) -> FilterSet {
        self.inner
            .filters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ---- fetch dispatch ----

    fn dispatch(&self, categories: &[Category], filters: FilterSet) -> Dispatch {
        let snapshot = Arc::new(filters);
        let handles = categories
            .iter()
            .map(|&category| {
                let generation = self.inner.begin(category);
                let inner = Arc::clone(&self.inner);
                let filters = Arc::clone(&snapshot);
                let handle = tokio::spawn(async move {
                    let started = Instant::now();
                    let result = inner.api.fetch(category, &filters).await;
                    inner.resolve(category, generation, result, started.elapsed())
                });
                (category, handle)
            })
            .collect();

        Dispatch { handles }
    }

    /// Re-fetch the filter-dependent charts and tables against `filters`.
    /// Overview stats, influencers, virality signals, and filter options are
    /// left untouched.
    pub fn apply_filters(&self, filters: FilterSet) -> Dispatch {
        info!(
            active_filters = filters.active().len(),
            "Applying filters"
        );
        self.dispatch(&Category::APPLY, filters)
    }

    /// Apply the store's current filter selection
    pub fn apply_current_filters(&self) -> Dispatch {
        self.apply_filters(self.filters())
    }

    /// Clear the filters, then re-fetch the filter-dependent categories with
    /// the cleared snapshot
    pub fn reset_and_apply(&self) -> Dispatch {
        self.reset_filters();
        self.apply_filters(FilterSet::default())
    }

    /// Re-fetch every dashboard category. The only path that refreshes
    /// overview stats, influencers, and virality signals.
    pub fn refresh_all(&self, filters: FilterSet) -> Dispatch {
        info!(
            active_filters = filters.active().len(),
            "Refreshing all dashboard data"
        );
        self.dispatch(&Category::REFRESH, filters)
    }

    /// Fetch the enumerated filter values. Each call re-fetches and overwrites.
    pub fn load_filter_options(&self) -> Dispatch {
        debug!("Loading filter options");
        self.dispatch(&[Category::FilterOptions], FilterSet::default())
    }

    // ---- UI state ----

    pub fn set_current_page(&self, page: Page) {
        self.inner
            .ui
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .current_page = page;
        self.inner.bump();
    }

    pub fn set_filters_panel_visible(&self, visible: bool) {
        self.inner
            .ui
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .filters_panel_visible = visible;
        self.inner.bump();
    }

    pub fn toggle_filters_panel(&self) -> bool {
        let visible = {
            let mut ui = self.inner.ui.write().unwrap_or_else(PoisonError::into_inner);
            ui.filters_panel_visible = !ui.filters_panel_visible;
            ui.filters_panel_visible
        };
        self.inner.bump();
        visible
    }

    pub fn ui(&self) -> UiState {
        self.inner
            .ui
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ---- reads ----

    pub fn slice(&self, category: Category) -> QuerySlice {
        self.inner
            .slices
            .get(&category)
            .map(|slice| slice.clone())
            .unwrap_or_else(|| QuerySlice::new(category))
    }

    pub fn status(&self, category: Category) -> QueryStatus {
        self.inner
            .slices
            .get(&category)
            .map(|slice| slice.status)
            .unwrap_or_default()
    }

    /// True while any category has a fetch in flight
    pub fn is_loading(&self) -> bool {
        self.inner.slices.iter().any(|slice| slice.is_pending())
    }

    /// Error message of every rejected category
    pub fn errors(&self) -> Vec<(Category, String)> {
        let mut errors: Vec<(Category, String)> = self
            .inner
            .slices
            .iter()
            .filter(|slice| slice.status == QueryStatus::Rejected)
            .filter_map(|slice| {
                slice
                    .error_message
                    .clone()
                    .map(|message| (slice.category, message))
            })
            .collect();
        errors.sort_by_key(|(category, _)| *category);
        errors
    }

    /// Monotonic counter bumped on every state change
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            revision: self.revision(),
            filters: self.filters(),
            ui: self.ui(),
            slices: self
                .inner
                .slices
                .iter()
                .map(|entry| (*entry.key(), entry.value().clone()))
                .collect(),
        }
    }

    fn with_payload<T>(&self, category: Category, extract: impl FnOnce(&Payload) -> Option<T>) -> Option<T> {
        self.inner
            .slices
            .get(&category)
            .and_then(|slice| slice.payload.as_ref().and_then(extract))
    }

    pub fn overview_stats(&self) -> Option<OverviewStats> {
        self.with_payload(Category::OverviewStats, |p| match p {
            Payload::OverviewStats(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn posts(&self) -> Option<PostsPage> {
        self.with_payload(Category::Posts, |p| match p {
            Payload::Posts(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn sentiment_distribution(&self) -> Option<Vec<SentimentBucket>> {
        self.with_payload(Category::SentimentDistribution, |p| match p {
            Payload::SentimentDistribution(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn topic_distribution(&self) -> Option<Vec<TopicBucket>> {
        self.with_payload(Category::TopicDistribution, |p| match p {
            Payload::TopicDistribution(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn influencers(&self) -> Option<Vec<Influencer>> {
        self.with_payload(Category::Influencers, |p| match p {
            Payload::Influencers(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn virality_signals(&self) -> Option<Vec<ViralitySignal>> {
        self.with_payload(Category::ViralitySignals, |p| match p {
            Payload::ViralitySignals(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn timeline(&self) -> Option<Vec<TimelineBucket>> {
        self.with_payload(Category::Timeline, |p| match p {
            Payload::Timeline(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn keywords(&self) -> Option<Vec<KeywordCount>> {
        self.with_payload(Category::Keywords, |p| match p {
            Payload::Keywords(v) => Some(v.clone()),
            _ => None,
        })
    }

    /// Filter options, empty until the first successful load
    pub fn filter_options(&self) -> FilterOptions {
        self.with_payload(Category::FilterOptions, |p| match p {
            Payload::FilterOptions(v) => Some(v.clone()),
            _ => None,
        })
        .unwrap_or_default()
    }
}
