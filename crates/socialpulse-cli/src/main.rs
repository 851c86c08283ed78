//! SocialPulse terminal dashboard
//!
//! Usage:
//! ```bash
//! # Overview page against the default backend
//! socialpulse dashboard
//!
//! # Negative posts on twitter, sentiment tab
//! socialpulse --sentiment negative --platform twitter dashboard --page sentiment
//!
//! # Download the filtered CSV export
//! socialpulse --topic tourism export --output tourism.csv
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use socialpulse_cli::SocialPulseConfig;
use socialpulse_cli::render::{ControlsText, PageText, SectionsText};
use socialpulse_core::{Category, FilterKey, FilterSet};
use socialpulse_egress::BackendConnector;
use socialpulse_observability::{FetchMetrics, LogFormat, init_logging};
use socialpulse_store::{DashboardStore, Page, QueryStatus, StalePolicy};
use socialpulse_view::{compose, filtered_sections, select_controls};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// SocialPulse - social-listening dashboard in the terminal
#[derive(Parser)]
#[command(name = "socialpulse")]
#[command(about = "Query and render the social-listening dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (YAML or TOML)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "SOCIALPULSE_CONFIG",
        global = true
    )]
    config: Option<PathBuf>,

    /// Backend base URL, including the /api prefix
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Log level or filter directive
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// How to treat responses superseded by a newer fetch
    #[arg(long, value_name = "POLICY", global = true)]
    stale_policy: Option<StalePolicy>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Print Prometheus fetch metrics after the command
    #[arg(long, global = true)]
    metrics: bool,

    #[command(flatten)]
    filters: FilterArgs,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Free-text search
    #[arg(long, global = true)]
    keyword: Option<String>,

    #[arg(long, global = true, value_parser = ["positive", "neutral", "negative"])]
    sentiment: Option<String>,

    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long, global = true)]
    start_date: Option<String>,

    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long, global = true)]
    end_date: Option<String>,

    #[arg(long, global = true)]
    platform: Option<String>,

    /// Source account id
    #[arg(long = "source", global = true)]
    source_id: Option<String>,

    #[arg(long, global = true)]
    topic: Option<String>,
}

impl FilterArgs {
    fn pairs(&self) -> Vec<(FilterKey, &str)> {
        [
            (FilterKey::Keyword, &self.keyword),
            (FilterKey::Sentiment, &self.sentiment),
            (FilterKey::StartDate, &self.start_date),
            (FilterKey::EndDate, &self.end_date),
            (FilterKey::Platform, &self.platform),
            (FilterKey::SourceId, &self.source_id),
            (FilterKey::Topic, &self.topic),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load everything and render one dashboard page
    Dashboard {
        /// overview, sentiment, topics or influencers
        #[arg(long, default_value = "overview")]
        page: Page,

        /// Leave the filter drop-downs out of the page
        #[arg(long)]
        hide_filters: bool,
    },
    /// Re-fetch only the filter-dependent charts and tables
    Apply,
    /// List the values available for each filter
    Options,
    /// Print the CSV export URL, or download the CSV
    Export {
        /// Write the CSV here instead of printing the URL
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<SocialPulseConfig> {
    let mut config = match &cli.config {
        Some(path) => SocialPulseConfig::from_file(path)?,
        None => SocialPulseConfig::default(),
    };
    config.merge_env();

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.log_json {
        config.logging.format = LogFormat::Json;
    }
    if let Some(policy) = cli.stale_policy {
        config.store.stale_policy = policy;
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;
    if let Some(path) = &cli.config {
        info!(path = %path.display(), "Loaded configuration");
    }
    debug!(
        base_url = %config.api.base_url,
        stale_policy = %config.store.stale_policy,
        "Effective configuration"
    );

    let metrics = FetchMetrics::new().context("Failed to create metrics registry")?;
    let connector = Arc::new(
        BackendConnector::new(config.backend_config()).context("Invalid backend configuration")?,
    );
    let store = DashboardStore::with_metrics(connector.clone(), config.store.clone(), metrics.clone());

    for (key, value) in cli.filters.pairs() {
        store.set_filter(key, value);
    }

    match cli.command {
        Commands::Dashboard { page, hide_filters } => {
            store.set_current_page(page);
            store.set_filters_panel_visible(!hide_filters);
            let options = store.load_filter_options();
            let refresh = store.refresh_all(store.filters());
            options.wait().await;
            refresh.wait().await;

            for (category, message) in store.errors() {
                warn!(category = %category, error = %message, "Category failed to load");
            }

            let view = compose(&store.snapshot());
            if cli.json {
                print_json(&view)?;
            } else {
                print!("{}", PageText(&view));
            }
        }
        Commands::Apply => {
            store.apply_current_filters().wait().await;

            let sections = filtered_sections(&store.snapshot());
            if cli.json {
                print_json(&sections)?;
            } else {
                print!("{}", SectionsText(&sections));
            }
        }
        Commands::Options => {
            store.load_filter_options().wait().await;

            let slice = store.slice(Category::FilterOptions);
            if slice.status == QueryStatus::Rejected {
                anyhow::bail!(
                    "Failed to load filter options: {}",
                    slice.error_message.unwrap_or_default()
                );
            }
            let controls = select_controls(&store.filter_options(), &store.filters());
            if cli.json {
                print_json(&controls)?;
            } else {
                print!("{}", ControlsText(&controls));
            }
        }
        Commands::Export { output } => match output {
            None => println!("{}", store.export_url()),
            Some(path) => {
                let filters: FilterSet = store.filters();
                let mut file = tokio::fs::File::create(&path)
                    .await
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let written = connector
                    .download_export(&filters, &mut file)
                    .await
                    .context("CSV export failed")?;
                info!(path = %path.display(), bytes = written, "CSV export saved");
                eprintln!("Wrote {} bytes to {}", written, path.display());
            }
        },
    }

    if cli.metrics {
        print!("{}", metrics.render()?);
    }

    Ok(())
}
