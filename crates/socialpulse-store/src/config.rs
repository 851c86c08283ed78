use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do with a response that resolves after a newer fetch for the
/// same category was dispatched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop it; the slice only ever reflects the most recently dispatched fetch
    #[default]
    DiscardStale,
    /// Apply it; the slice reflects whichever fetch resolved last
    LastResolutionWins,
}

impl fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StalePolicy::DiscardStale => f.write_str("discard_stale"),
            StalePolicy::LastResolutionWins => f.write_str("last_resolution_wins"),
        }
    }
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "discard_stale" | "discard" => Ok(StalePolicy::DiscardStale),
            "last_resolution_wins" | "last_wins" => Ok(StalePolicy::LastResolutionWins),
            other => Err(format!("unknown stale policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub stale_policy: StalePolicy,
}
