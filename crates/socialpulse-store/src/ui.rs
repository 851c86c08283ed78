use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dashboard tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Overview,
    Sentiment,
    Topics,
    Influencers,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Overview, Page::Sentiment, Page::Topics, Page::Influencers];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Sentiment => "sentiment",
            Page::Topics => "topics",
            Page::Influencers => "influencers",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Sentiment => "Sentiment",
            Page::Topics => "Topics",
            Page::Influencers => "Influencers",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown page '{}'", s))
    }
}

/// Presentation-only state; never touches the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub current_page: Page,
    pub filters_panel_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_page: Page::Overview,
            filters_panel_visible: true,
        }
    }
}
