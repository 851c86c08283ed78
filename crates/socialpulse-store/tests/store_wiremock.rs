//! End-to-end tests: store driving the real backend connector against a mock API

use socialpulse_core::{Category, FilterKey, FilterSet};
use socialpulse_egress::{BackendConfig, BackendConnector};
use socialpulse_store::{DashboardStore, QueryStatus, StoreConfig};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_dashboard(server: &MockServer) {
    mount_json(
        server,
        "/stats/overview",
        serde_json::json!({"totalPosts": 230, "engagement": {"avgLikes": 8.2}}),
    )
    .await;
    mount_json(
        server,
        "/posts",
        serde_json::json!({"posts": [{"postId": "p1", "text": "Ferry delayed"}], "total": 1}),
    )
    .await;
    mount_json(
        server,
        "/sentiment/distribution",
        serde_json::json!([{"_id": "negative", "count": 7, "avgConfidence": 0.7}]),
    )
    .await;
    mount_json(
        server,
        "/topics/distribution",
        serde_json::json!([{"_id": "transport", "count": 4, "avgEngagement": 3.5}]),
    )
    .await;
    mount_json(
        server,
        "/influencers",
        serde_json::json!([{"_id": "gov_bvi", "totalPosts": 12, "avgSentiment": 0.5}]),
    )
    .await;
    mount_json(
        server,
        "/virality/early-signals",
        serde_json::json!([{"postId": "p9", "hoursSincePost": 1.5, "velocity": 88.0}]),
    )
    .await;
    mount_json(
        server,
        "/trends/timeline",
        serde_json::json!([{"_id": {"date": "2024-01-01", "sentiment": "negative"}, "count": 2}]),
    )
    .await;
    mount_json(
        server,
        "/keywords/frequency",
        serde_json::json!([{"word": "ferry", "count": 9}]),
    )
    .await;
    mount_json(
        server,
        "/filters/options",
        serde_json::json!({"platforms": ["twitter"], "sources": ["gov_bvi"]}),
    )
    .await;
}

fn store_for(server: &MockServer) -> DashboardStore {
    let connector =
        BackendConnector::new(BackendConfig::default().with_base_url(server.uri())).unwrap();
    DashboardStore::new(Arc::new(connector), StoreConfig::default())
}

#[tokio::test]
async fn test_refresh_all_fills_every_dashboard_category() {
    let server = MockServer::start().await;
    mount_dashboard(&server).await;
    let store = store_for(&server);

    store.load_filter_options().wait().await;
    store.refresh_all(FilterSet::default()).wait().await;

    for category in Category::ALL {
        assert_eq!(store.status(category), QueryStatus::Fulfilled, "{}", category);
    }
    assert_eq!(store.overview_stats().unwrap().total_posts, 230);
    assert_eq!(store.influencers().unwrap()[0].id, "gov_bvi");
    assert_eq!(store.timeline().unwrap()[0].id.date, "2024-01-01");
    assert_eq!(store.filter_options().sources, vec!["gov_bvi"]);
    assert!(store.errors().is_empty());
}

#[tokio::test]
async fn test_one_failing_endpoint_leaves_others_fulfilled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keywords/frequency"))
        .respond_with(ResponseTemplate::new(500).set_body_string("index unavailable"))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_dashboard(&server).await;
    let store = store_for(&server);

    store.refresh_all(FilterSet::default()).wait().await;

    assert_eq!(store.status(Category::Keywords), QueryStatus::Rejected);
    assert_eq!(store.status(Category::Posts), QueryStatus::Fulfilled);
    assert_eq!(store.status(Category::Timeline), QueryStatus::Fulfilled);

    let errors = store.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, Category::Keywords);
    assert!(errors[0].1.contains("index unavailable"));
}

#[tokio::test]
async fn test_apply_filters_sends_snapshot_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("sentiment", "negative"))
        .and(query_param("sourceId", "gov_bvi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "posts": [{"postId": "neg-1"}],
            "total": 1
        })))
        .expect(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_dashboard(&server).await;
    let store = store_for(&server);

    store.set_filter(FilterKey::Sentiment, "negative");
    store.set_filter(FilterKey::SourceId, "gov_bvi");
    store.apply_current_filters().wait().await;

    let posts = store.posts().unwrap();
    assert_eq!(posts.posts[0].post_id.as_deref(), Some("neg-1"));
    assert_eq!(store.status(Category::OverviewStats), QueryStatus::Idle);
    assert!(store.export_url().ends_with("/posts/export?sentiment=negative&sourceId=gov_bvi"));
}
