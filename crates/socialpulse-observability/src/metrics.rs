//! Fetch metrics with Prometheus
//!
//! Tracks every category fetch issued by the dashboard store:
//! - Fetch counts by category and outcome
//! - Fetch latency by category
//! - Responses discarded because a newer fetch superseded them

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// How a single fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Fulfilled,
    Rejected,
    /// Resolved after a newer fetch for the same category was dispatched
    Stale,
}

impl FetchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchOutcome::Fulfilled => "fulfilled",
            FetchOutcome::Rejected => "rejected",
            FetchOutcome::Stale => "stale",
        }
    }
}

/// Metrics collector for dashboard fetches
#[derive(Clone)]
pub struct FetchMetrics {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Fetches dispatched
    pub fetch_dispatched: CounterVec,
    /// Fetches resolved, by outcome
    pub fetch_total: CounterVec,
    /// Fetch duration from dispatch to resolution
    pub fetch_duration_seconds: HistogramVec,
    /// Resolutions dropped by the generation guard
    pub stale_discarded: CounterVec,
}

impl FetchMetrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let fetch_dispatched = CounterVec::new(
            Opts::new(
                "socialpulse_fetch_dispatched_total",
                "Total number of fetches dispatched",
            ),
            &["category"],
        )?;

        let fetch_total = CounterVec::new(
            Opts::new(
                "socialpulse_fetch_total",
                "Total number of fetches resolved",
            ),
            &["category", "outcome"],
        )?;

        let fetch_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "socialpulse_fetch_duration_seconds",
                "Fetch duration in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["category"],
        )?;

        let stale_discarded = CounterVec::new(
            Opts::new(
                "socialpulse_stale_discarded_total",
                "Responses discarded because a newer fetch was dispatched",
            ),
            &["category"],
        )?;

        registry.register(Box::new(fetch_dispatched.clone()))?;
        registry.register(Box::new(fetch_total.clone()))?;
        registry.register(Box::new(fetch_duration_seconds.clone()))?;
        registry.register(Box::new(stale_discarded.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            fetch_dispatched,
            fetch_total,
            fetch_duration_seconds,
            stale_discarded,
        })
    }

    /// Get the Prometheus registry for exporting metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a dispatch
    pub fn record_dispatch(&self, category: &str) {
        self.fetch_dispatched.with_label_values(&[category]).inc();
    }

    /// Record a resolution
    pub fn record_resolution(&self, category: &str, outcome: FetchOutcome, duration_secs: f64) {
        self.fetch_total
            .with_label_values(&[category, outcome.as_str()])
            .inc();
        self.fetch_duration_seconds
            .with_label_values(&[category])
            .observe(duration_secs);
        if outcome == FetchOutcome::Stale {
            self.stale_discarded.with_label_values(&[category]).inc();
        }
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        encoder.encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = FetchMetrics::new().unwrap();
        metrics.record_dispatch("posts");
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_resolution_counts_by_outcome() {
        let metrics = FetchMetrics::new().unwrap();
        metrics.record_resolution("posts", FetchOutcome::Fulfilled, 0.2);
        metrics.record_resolution("posts", FetchOutcome::Rejected, 0.4);
        metrics.record_resolution("posts", FetchOutcome::Fulfilled, 0.1);

        assert_eq!(
            metrics
                .fetch_total
                .with_label_values(&["posts", "fulfilled"])
                .get(),
            2.0
        );
        assert_eq!(
            metrics
                .fetch_total
                .with_label_values(&["posts", "rejected"])
                .get(),
            1.0
        );
    }

    #[test]
    fn test_stale_resolution_also_counts_discard() {
        let metrics = FetchMetrics::new().unwrap();
        metrics.record_resolution("timeline", FetchOutcome::Stale, 1.0);

        assert_eq!(
            metrics.stale_discarded.with_label_values(&["timeline"]).get(),
            1.0
        );
    }

    #[test]
    fn test_render_contains_metric_names() {
        let metrics = FetchMetrics::new().unwrap();
        metrics.record_dispatch("keywords");
        metrics.record_resolution("keywords", FetchOutcome::Fulfilled, 0.05);

        let text = metrics.render().unwrap();
        assert!(text.contains("socialpulse_fetch_dispatched_total"));
        assert!(text.contains("socialpulse_fetch_total"));
        assert!(text.contains("category=\"keywords\""));
    }
}
