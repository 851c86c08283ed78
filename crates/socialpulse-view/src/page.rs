//! Page composition
//!
//! Each tab shows a fixed list of sections; each section is one category's
//! projection wrapped in a [`Panel`].

use crate::charts::{
    KeywordTag, SentimentSlice, TimelineRow, TopicBar, ViralityCard, keyword_cloud,
    sentiment_chart, timeline_rows, topic_chart, virality_cards,
};
use crate::controls::{FilterChip, SelectControl, filter_chips, select_controls};
use crate::panel::{Panel, non_empty};
use crate::tables::{
    InfluencerRow, OverviewCard, PostRow, influencer_rows, overview_cards, post_rows,
};
use serde::Serialize;
use socialpulse_core::{Category, Payload};
use socialpulse_store::{DashboardSnapshot, Page};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    OverviewCards(Panel<Vec<OverviewCard>>),
    Virality(Panel<Vec<ViralityCard>>),
    Sentiment {
        detailed: bool,
        panel: Panel<Vec<SentimentSlice>>,
    },
    Topics {
        detailed: bool,
        panel: Panel<Vec<TopicBar>>,
    },
    Timeline(Panel<Vec<TimelineRow>>),
    Keywords(Panel<Vec<KeywordTag>>),
    Posts(Panel<Vec<PostRow>>),
    Influencers(Panel<Vec<InfluencerRow>>),
    FilterOptions(Panel<Vec<SelectControl>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub category: Category,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: &'static str,
    pub filters_panel_visible: bool,
    pub chips: Vec<FilterChip>,
    pub sections: Vec<Section>,
}

/// Compose the page currently selected in the snapshot
pub fn compose(snapshot: &DashboardSnapshot) -> PageView {
    compose_page(snapshot, snapshot.ui.current_page)
}

/// Compose `page`. When the filters panel is visible, the filter
/// drop-downs come first.
pub fn compose_page(snapshot: &DashboardSnapshot, page: Page) -> PageView {
    let mut sections = Vec::new();
    if snapshot.ui.filters_panel_visible {
        sections.push(section(snapshot, Category::FilterOptions, "Filters", false));
    }
    sections.extend(match page {
        Page::Overview => vec![
            section(snapshot, Category::OverviewStats, "Overview", false),
            section(
                snapshot,
                Category::ViralitySignals,
                "Early Virality Signals (Last 24h)",
                false,
            ),
            section(
                snapshot,
                Category::SentimentDistribution,
                "Sentiment Distribution",
                false,
            ),
            section(snapshot, Category::TopicDistribution, "Topic Trends", false),
            section(snapshot, Category::Timeline, "Daily Activity Timeline", false),
            section(snapshot, Category::Keywords, "Trending Keywords", false),
        ],
        Page::Sentiment => vec![
            section(
                snapshot,
                Category::SentimentDistribution,
                "Sentiment Analysis",
                true,
            ),
            section(snapshot, Category::Posts, "Posts by Sentiment", false),
        ],
        Page::Topics => vec![
            section(
                snapshot,
                Category::TopicDistribution,
                "Topic Distribution & Engagement",
                true,
            ),
            section(snapshot, Category::Posts, "Recent Posts", false),
        ],
        Page::Influencers => vec![section(
            snapshot,
            Category::Influencers,
            "Top Influencers by Engagement",
            false,
        )],
    });

    PageView {
        page,
        title: page.title(),
        filters_panel_visible: snapshot.ui.filters_panel_visible,
        chips: filter_chips(&snapshot.filters),
        sections,
    }
}

/// Sections for the categories re-fetched by applying filters, in
/// dispatch order
pub fn filtered_sections(snapshot: &DashboardSnapshot) -> Vec<Section> {
    const TITLES: [(Category, &str); 5] = [
        (Category::Posts, "Recent Posts"),
        (Category::SentimentDistribution, "Sentiment Distribution"),
        (Category::TopicDistribution, "Topic Trends"),
        (Category::Timeline, "Daily Activity Timeline"),
        (Category::Keywords, "Trending Keywords"),
    ];

    Category::APPLY
        .into_iter()
        .filter_map(|category| {
            TITLES
                .iter()
                .find(|(titled, _)| *titled == category)
                .map(|&(_, title)| section(snapshot, category, title, false))
        })
        .collect()
}

fn section(
    snapshot: &DashboardSnapshot,
    category: Category,
    title: &'static str,
    detailed: bool,
) -> Section {
    let slice = snapshot.slice(category);
    let body = match category {
        Category::OverviewStats => SectionBody::OverviewCards(Panel::from_slice(slice, |p| match p {
            Payload::OverviewStats(stats) => Some(overview_cards(stats)),
            _ => None,
        })),
        Category::ViralitySignals => SectionBody::Virality(Panel::from_slice(slice, |p| match p {
            Payload::ViralitySignals(signals) => non_empty(virality_cards(signals)),
            _ => None,
        })),
        Category::SentimentDistribution => SectionBody::Sentiment {
            detailed,
            panel: Panel::from_slice(slice, |p| match p {
                Payload::SentimentDistribution(buckets) => non_empty(sentiment_chart(buckets)),
                _ => None,
            }),
        },
        Category::TopicDistribution => SectionBody::Topics {
            detailed,
            panel: Panel::from_slice(slice, |p| match p {
                Payload::TopicDistribution(buckets) => non_empty(topic_chart(buckets)),
                _ => None,
            }),
        },
        Category::Timeline => SectionBody::Timeline(Panel::from_slice(slice, |p| match p {
            Payload::Timeline(buckets) => non_empty(timeline_rows(buckets)),
            _ => None,
        })),
        Category::Keywords => SectionBody::Keywords(Panel::from_slice(slice, |p| match p {
            Payload::Keywords(keywords) => non_empty(keyword_cloud(keywords)),
            _ => None,
        })),
        Category::Posts => SectionBody::Posts(Panel::from_slice(slice, |p| match p {
            Payload::Posts(page) => non_empty(post_rows(&page.posts)),
            _ => None,
        })),
        Category::Influencers => SectionBody::Influencers(Panel::from_slice(slice, |p| match p {
            Payload::Influencers(influencers) => non_empty(influencer_rows(influencers)),
            _ => None,
        })),
        Category::FilterOptions => SectionBody::FilterOptions(Panel::from_slice(slice, |p| match p {
            Payload::FilterOptions(options) => Some(select_controls(options, &snapshot.filters)),
            _ => None,
        })),
    };

    Section {
        title,
        category,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialpulse_core::{
        FilterKey, FilterSet,
        models::{FilterOptions, Influencer, KeywordCount},
    };
    use socialpulse_store::{QuerySlice, QueryStatus, UiState};
    use std::collections::BTreeMap;

    fn snapshot(page: Page) -> DashboardSnapshot {
        let slices: BTreeMap<Category, QuerySlice> = Category::ALL
            .into_iter()
            .map(|c| (c, QuerySlice::new(c)))
            .collect();
        DashboardSnapshot {
            revision: 0,
            filters: FilterSet::default(),
            ui: UiState {
                current_page: page,
                filters_panel_visible: false,
            },
            slices,
        }
    }

    fn fulfill(snapshot: &mut DashboardSnapshot, payload: Payload) {
        let slice = snapshot
            .slices
            .get_mut(&payload.category())
            .unwrap();
        slice.status = QueryStatus::Fulfilled;
        slice.payload = Some(payload);
    }

    fn categories(view: &PageView) -> Vec<Category> {
        view.sections.iter().map(|s| s.category).collect()
    }

    #[test]
    fn test_overview_page_sections() {
        let view = compose(&snapshot(Page::Overview));
        assert_eq!(
            categories(&view),
            vec![
                Category::OverviewStats,
                Category::ViralitySignals,
                Category::SentimentDistribution,
                Category::TopicDistribution,
                Category::Timeline,
                Category::Keywords,
            ]
        );
        assert_eq!(view.title, "Overview");
    }

    #[test]
    fn test_detail_pages_pair_chart_with_posts() {
        let view = compose(&snapshot(Page::Sentiment));
        assert_eq!(
            categories(&view),
            vec![Category::SentimentDistribution, Category::Posts]
        );
        assert!(matches!(
            view.sections[0].body,
            SectionBody::Sentiment { detailed: true, .. }
        ));

        let view = compose(&snapshot(Page::Topics));
        assert_eq!(
            categories(&view),
            vec![Category::TopicDistribution, Category::Posts]
        );
    }

    #[test]
    fn test_influencers_page_renders_table() {
        let mut snap = snapshot(Page::Influencers);
        fulfill(
            &mut snap,
            Payload::Influencers(vec![Influencer {
                id: "gov_bvi".to_string(),
                total_posts: 4,
                total_likes: 10,
                total_shares: 1,
                total_comments: 2,
                total_engagement: 13,
                avg_sentiment: 0.6,
            }]),
        );

        let view = compose(&snap);
        match &view.sections[0].body {
            SectionBody::Influencers(panel) => {
                let rows = panel.ready().unwrap();
                assert_eq!(rows[0].account, "gov_bvi");
                assert_eq!(rows[0].rank, 1);
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_failed_category_does_not_affect_others() {
        let mut snap = snapshot(Page::Overview);
        fulfill(
            &mut snap,
            Payload::Keywords(vec![KeywordCount {
                word: "ferry".to_string(),
                count: 3,
            }]),
        );
        let timeline = snap.slices.get_mut(&Category::Timeline).unwrap();
        timeline.status = QueryStatus::Rejected;
        timeline.error_message = Some("Network failure: reset".to_string());

        let view = compose(&snap);
        let timeline = &view.sections[4].body;
        let keywords = &view.sections[5].body;
        assert_eq!(
            *timeline,
            SectionBody::Timeline(Panel::Failed("Network failure: reset".to_string()))
        );
        assert!(matches!(keywords, SectionBody::Keywords(Panel::Ready(_))));
    }

    #[test]
    fn test_chips_follow_snapshot_filters() {
        let mut snap = snapshot(Page::Overview);
        snap.filters = FilterSet::new().with(FilterKey::Platform, "twitter");
        snap.ui.filters_panel_visible = false;

        let view = compose(&snap);
        assert_eq!(view.chips.len(), 1);
        assert!(!view.filters_panel_visible);
    }

    #[test]
    fn test_filtered_sections_cover_apply_categories() {
        let sections = filtered_sections(&snapshot(Page::Overview));
        let categories: Vec<Category> = sections.iter().map(|s| s.category).collect();
        assert_eq!(categories, Category::APPLY.to_vec());
        assert!(sections.iter().all(|s| s.title != "Filters"));
    }

    #[test]
    fn test_visible_filters_panel_leads_with_controls() {
        let mut snap = snapshot(Page::Topics);
        snap.ui.filters_panel_visible = true;
        snap.filters = FilterSet::new().with(FilterKey::Platform, "twitter");
        fulfill(
            &mut snap,
            Payload::FilterOptions(FilterOptions {
                platforms: vec!["twitter".to_string(), "facebook".to_string()],
                ..Default::default()
            }),
        );

        let view = compose(&snap);
        assert_eq!(
            categories(&view),
            vec![
                Category::FilterOptions,
                Category::TopicDistribution,
                Category::Posts
            ]
        );
        assert_eq!(view.sections[0].title, "Filters");
        match &view.sections[0].body {
            SectionBody::FilterOptions(panel) => {
                let controls = panel.ready().unwrap();
                let platform = controls
                    .iter()
                    .find(|c| c.key == FilterKey::Platform)
                    .unwrap();
                assert_eq!(platform.selected, "twitter");
                assert_eq!(platform.options.len(), 2);
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_hidden_filters_panel_omits_controls() {
        let view = compose(&snapshot(Page::Influencers));
        assert_eq!(categories(&view), vec![Category::Influencers]);
    }
}
