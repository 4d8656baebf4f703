//! EONET Dashboard CLI
//!
//! Command-line front end for the statistics dashboard:
//! - Watch a live, auto-refreshing dashboard in the terminal
//! - Print summary, categories, trends and filtered events

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eonet_dashboard::api::{DashboardApi, DashboardClient, EventFilter, TrendPeriod};
use eonet_dashboard::config::{generate_default_config, Config, ConfigSource, LoggingConfig};
use eonet_dashboard::dashboard::{DashboardController, RefreshScheduler};
use eonet_dashboard::headless::{HeadlessChartFactory, HeadlessPage, HeadlessSliderFactory};
use eonet_dashboard::map::HttpMapUpdater;
use eonet_dashboard::render;

#[derive(Parser)]
#[command(name = "eonet-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Natural event statistics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Statistics backend URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard and keep it refreshed
    Watch {
        /// Refresh interval in seconds (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,
        /// Render once after start-up and exit
        #[arg(long)]
        once: bool,
    },

    /// Print the aggregated summary
    Summary,

    /// List selectable event categories
    Categories,

    /// Show event-frequency trends
    Trends {
        /// Restrict to one category id
        #[arg(long)]
        category: Option<String>,
        /// Grouping period (daily, weekly, monthly)
        #[arg(short, long, default_value = "monthly")]
        period: TrendPeriod,
    },

    /// List events matching a filter
    Events {
        /// Category id
        #[arg(short = 't', long)]
        event_type: Option<String>,
        #[arg(long)]
        min_magnitude: Option<f64>,
        #[arg(long)]
        max_magnitude: Option<f64>,
        /// Earliest event date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Latest event date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Maximum number of events to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, ConfigSource::File(path.clone())),
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    source.log();

    match cli.command {
        Commands::Watch { interval, once } => {
            if let Some(secs) = interval {
                config.refresh.interval_secs = secs;
            }
            watch(&config, once).await?;
        }

        Commands::Summary => {
            let stats = client(&config)?
                .fetch_summary()
                .await
                .context("Failed to fetch summary")?;
            output(cli.format, &stats, render::summary_table)?;
        }

        Commands::Categories => {
            let list = client(&config)?
                .fetch_categories()
                .await
                .context("Failed to fetch categories")?;
            output(cli.format, &list, render::categories_table)?;
        }

        Commands::Trends { category, period } => {
            let trends = client(&config)?
                .fetch_trends(category.as_deref(), period)
                .await
                .context("Failed to fetch trends")?;
            output(cli.format, &trends, render::trends_table)?;
        }

        Commands::Events {
            event_type,
            min_magnitude,
            max_magnitude,
            start,
            end,
            limit,
        } => {
            let filter = EventFilter {
                start_date: start,
                end_date: end,
                event_type,
                min_magnitude,
                max_magnitude,
            };
            let mut events = client(&config)?
                .fetch_events(&filter)
                .await
                .context("Failed to fetch events")?;
            if let Some(limit) = limit {
                events.events.truncate(limit);
            }
            output(cli.format, &events, render::events_table)?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("eonet_dashboard={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn client(config: &Config) -> anyhow::Result<DashboardClient> {
    DashboardClient::new(&config.api)
        .with_context(|| format!("Invalid backend configuration for {}", config.api.base_url))
}

fn output<T: Serialize>(
    format: OutputFormat,
    value: &T,
    table: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print!("{}", table(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

async fn watch(config: &Config, once: bool) -> anyhow::Result<()> {
    let client = Arc::new(client(config)?);
    let charts = Arc::new(HeadlessChartFactory::new());
    let page = HeadlessPage::new();

    let controller = Arc::new(DashboardController::new(
        client.clone(),
        charts.clone(),
        Arc::new(HeadlessSliderFactory::new()),
        Arc::new(HttpMapUpdater::new(client.clone())),
        page.page()?,
    ));

    tracing::info!(api_url = client.base_url(), "Starting dashboard");
    controller.bootstrap().await;
    print!("{}", render::render_dashboard(&charts, &page, &controller.status()));

    if once || !config.refresh.enabled {
        return Ok(());
    }

    let interval: Duration = config.refresh.interval();
    let handle = RefreshScheduler::start(controller.clone(), interval);
    let mut cycles = handle.cycles();

    loop {
        tokio::select! {
            changed = cycles.changed() => {
                if changed.is_err() {
                    break;
                }
                println!();
                print!("{}", render::render_dashboard(&charts, &page, &controller.status()));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    handle.stop().await;
    Ok(())
}
