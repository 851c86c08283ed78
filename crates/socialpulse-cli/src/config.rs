use anyhow::Context;
use serde::{Deserialize, Serialize};
use socialpulse_egress::{BackendConfig, HttpClientConfig, backend::DEFAULT_BASE_URL};
use socialpulse_observability::LoggingConfig;
use socialpulse_store::{StalePolicy, StoreConfig};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialPulseConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub client: HttpClientConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client: HttpClientConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl SocialPulseConfig {
    /// Load from YAML, or TOML when the file ends in `.toml`
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        self.merge_vars(|name| std::env::var(name).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SOCIALPULSE_API_URL") {
            self.api.base_url = val;
        }

        if let Some(val) = var("SOCIALPULSE_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => self.api.client.timeout_secs = secs,
                Err(_) => eprintln!(
                    "Warning: Invalid SOCIALPULSE_TIMEOUT_SECS '{}', using {}",
                    val, self.api.client.timeout_secs
                ),
            }
        }

        if let Some(val) = var("SOCIALPULSE_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Some(val) = var("SOCIALPULSE_STALE_POLICY") {
            match val.parse::<StalePolicy>() {
                Ok(policy) => self.store.stale_policy = policy,
                Err(e) => eprintln!("Warning: {}, using {}", e, self.store.stale_policy),
            }
        }
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::default()
            .with_base_url(self.api.base_url.clone())
            .with_client_config(self.api.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SocialPulseConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5001/api");
        assert_eq!(config.api.client.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.store.stale_policy, StalePolicy::DiscardStale);
    }

    #[test]
    fn test_merge_vars_overrides() {
        let mut config = SocialPulseConfig::default();
        config.merge_vars(vars(&[
            ("SOCIALPULSE_API_URL", "http://analytics.internal/api"),
            ("SOCIALPULSE_TIMEOUT_SECS", "5"),
            ("SOCIALPULSE_LOG_LEVEL", "debug"),
            ("SOCIALPULSE_STALE_POLICY", "last_resolution_wins"),
        ]));

        assert_eq!(config.api.base_url, "http://analytics.internal/api");
        assert_eq!(config.api.client.timeout_secs, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.store.stale_policy, StalePolicy::LastResolutionWins);
    }

    #[test]
    fn test_invalid_values_keep_previous() {
        let mut config = SocialPulseConfig::default();
        config.merge_vars(vars(&[
            ("SOCIALPULSE_TIMEOUT_SECS", "soon"),
            ("SOCIALPULSE_STALE_POLICY", "newest"),
        ]));

        assert_eq!(config.api.client.timeout_secs, 30);
        assert_eq!(config.store.stale_policy, StalePolicy::DiscardStale);
    }

    #[test]
    #[serial_test::serial]
    fn test_merge_env_reads_process_environment() {
        unsafe {
            std::env::set_var("SOCIALPULSE_API_URL", "http://from-env/api");
        }

        let mut config = SocialPulseConfig::default();
        config.merge_env();
        assert_eq!(config.api.base_url, "http://from-env/api");

        unsafe {
            std::env::remove_var("SOCIALPULSE_API_URL");
        }
    }

    #[test]
    fn test_backend_config_carries_client_settings() {
        let mut config = SocialPulseConfig::default();
        config.api.client.timeout_secs = 12;

        let backend = config.backend_config();
        assert_eq!(backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(backend.client_config.timeout_secs, 12);
    }
}
