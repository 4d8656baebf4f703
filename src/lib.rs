//! # EONET Dashboard
//!
//! Statistics dashboard for natural events. Fetches aggregated counts from a
//! statistics backend and keeps three charts, a magnitude range filter and an
//! event-type selector in sync with it.
//!
//! ## Features
//!
//! - **Chart binding**: Category doughnut, magnitude bar and daily frequency line
//! - **Filtering**: Dual-handle magnitude slider plus event-type selector
//! - **Refresh**: Charts and map refreshed together, on a timer or on demand
//! - **Failure isolation**: Backend errors are logged, never propagated to the page
//!
//! ## Modules
//!
//! - [`api`]: HTTP client and wire types for the statistics backend
//! - [`widgets`]: Capability traits for charts, sliders and page elements
//! - [`headless`]: In-memory widget implementations
//! - [`dashboard`]: View controller, loading indicator and refresh scheduler
//! - [`map`]: Event map collaborator
//! - [`render`]: Plain-text rendering of headless dashboards
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eonet_dashboard::config::ApiConfig;
//! use eonet_dashboard::headless::{HeadlessChartFactory, HeadlessPage, HeadlessSliderFactory};
//! use eonet_dashboard::{DashboardClient, DashboardController, HttpMapUpdater};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(DashboardClient::new(&ApiConfig::default())?);
//!     let page = HeadlessPage::new();
//!
//!     let controller = DashboardController::new(
//!         client.clone(),
//!         Arc::new(HeadlessChartFactory::new()),
//!         Arc::new(HeadlessSliderFactory::new()),
//!         Arc::new(HttpMapUpdater::new(client)),
//!         page.page()?,
//!     );
//!
//!     // Build charts, slider and selector, then refresh with the current filter
//!     controller.bootstrap().await;
//!     controller.refresh_data().await;
//!
//!     println!("{} failures", controller.status().failures);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod headless;
pub mod map;
pub mod render;
pub mod widgets;

// Re-export top-level types for convenience
pub use api::{
    CategoryList, CountSeries, DashboardApi, DashboardClient, EventFilter, FetchError,
    FetchResult, MagnitudeBuckets, SummaryStats, TrendPeriod,
};

pub use dashboard::{
    ControllerStatus, DashboardChart, DashboardController, LoadingIndicator, RefreshHandle,
    RefreshScheduler,
};

pub use widgets::{ChartFactory, ChartWidget, RangeSlider, SliderFactory, WidgetError};

pub use map::{HttpMapUpdater, MapError, MapUpdater};

pub use config::{Config, ConfigError, ConfigSource, LoggingConfig};

/// Lock a std mutex, recovering the data if a holder panicked
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
