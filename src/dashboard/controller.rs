//! Dashboard View Controller
//!
//! Fetches statistics, binds them to the chart widgets, owns the magnitude
//! slider and fills the event-type selector. Every operation catches its
//! own failures: they are logged and counted in [`ControllerStatus`], never
//! returned, and the loading overlay is always released.

use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use super::charts::DashboardChart;
use super::loading::LoadingIndicator;
use crate::api::{DashboardApi, EventFilter, FetchResult, SummaryStats};
use crate::lock;
use crate::map::MapUpdater;
use crate::widgets::page::MAGNITUDE_SLIDER;
use crate::widgets::{
    format_range, ChartFactory, ChartWidget, DashboardPage, RangeSlider, SliderFactory,
    SliderOptions,
};

type ChartSlots = [Option<Box<dyn ChartWidget>>; 3];

/// Outcome counters for the swallowed failures of controller operations
#[derive(Debug, Clone, Default)]
pub struct ControllerStatus {
    /// Failed operations since construction
    pub failures: u64,
    /// `"<operation>: <error>"` of the most recent failure
    pub last_error: Option<String>,
    /// Completed refresh cycles
    pub refreshes: u64,
    pub last_refresh: Option<DateTime<Utc>>,
}

pub struct DashboardController {
    api: Arc<dyn DashboardApi>,
    chart_factory: Arc<dyn ChartFactory>,
    slider_factory: Arc<dyn SliderFactory>,
    map: Arc<dyn MapUpdater>,
    page: DashboardPage,
    loading: LoadingIndicator,
    charts: tokio::sync::Mutex<ChartSlots>,
    slider: Mutex<Option<Arc<dyn RangeSlider>>>,
    /// Held for the whole of `refresh_data`, so refreshes never interleave
    refresh_lock: tokio::sync::Mutex<()>,
    status: Mutex<ControllerStatus>,
}

impl DashboardController {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        chart_factory: Arc<dyn ChartFactory>,
        slider_factory: Arc<dyn SliderFactory>,
        map: Arc<dyn MapUpdater>,
        page: DashboardPage,
    ) -> Self {
        Self {
            loading: LoadingIndicator::new(Arc::clone(&page.loading_overlay)),
            api,
            chart_factory,
            slider_factory,
            map,
            page,
            charts: tokio::sync::Mutex::new(Default::default()),
            slider: Mutex::new(None),
            refresh_lock: tokio::sync::Mutex::new(()),
            status: Mutex::new(ControllerStatus::default()),
        }
    }

    /// Start chart initialization, slider initialization and category
    /// loading in that order, without waiting for one before the next.
    pub async fn bootstrap(&self) -> Option<Arc<dyn RangeSlider>> {
        let (_, slider, _) = tokio::join!(
            self.initialize_charts(),
            async { self.initialize_slider() },
            self.load_categories(),
        );
        slider
    }

    /// Fetch the summary and construct all three charts from it
    pub async fn initialize_charts(&self) {
        let _loading = self.loading.scoped();

        match self.api.fetch_summary().await {
            Ok(stats) => {
                let built = self.build_charts(&stats).await;
                tracing::info!(
                    charts = built,
                    categories = stats.categories.len(),
                    days = stats.daily_counts.len(),
                    "Charts initialized"
                );
            }
            Err(e) => self.record_failure("initialize_charts", &e),
        }
    }

    async fn build_charts(&self, stats: &SummaryStats) -> usize {
        let mut slots = self.charts.lock().await;
        let mut built = 0;

        for chart in DashboardChart::ALL {
            match self
                .chart_factory
                .create(chart.mount_id(), chart.config(), chart.data(stats))
            {
                Ok(widget) => {
                    slots[chart.index()] = Some(widget);
                    built += 1;
                }
                Err(e) => {
                    slots[chart.index()] = None;
                    self.record_failure("initialize_charts", &e);
                }
            }
        }

        built
    }

    /// Re-fetch the summary and repaint every constructed chart in place
    pub async fn update_charts(&self) {
        let _loading = self.loading.scoped();

        if let Err(e) = self.try_update_charts().await {
            self.record_failure("update_charts", &e);
        }
    }

    async fn try_update_charts(&self) -> FetchResult<usize> {
        let stats = self.api.fetch_summary().await?;
        let mut slots = self.charts.lock().await;
        let mut updated = 0;

        for chart in DashboardChart::ALL {
            match slots[chart.index()].as_mut() {
                Some(widget) => {
                    widget.set_data(chart.data(&stats));
                    widget.update();
                    updated += 1;
                }
                None => {
                    tracing::debug!(mount_id = chart.mount_id(), "Chart not initialized, skipping");
                }
            }
        }

        Ok(updated)
    }

    /// (Re)create the magnitude slider and bind its status text
    pub fn initialize_slider(&self) -> Option<Arc<dyn RangeSlider>> {
        if self.slider_factory.destroy_existing(MAGNITUDE_SLIDER) {
            tracing::debug!("Destroyed previous magnitude slider");
        }

        let slider = match self
            .slider_factory
            .create(MAGNITUDE_SLIDER, SliderOptions::default())
        {
            Ok(slider) => slider,
            Err(e) => {
                *lock(&self.slider) = None;
                self.record_failure("initialize_slider", &e);
                return None;
            }
        };

        let status = Arc::clone(&self.page.magnitude_values);
        slider.on_update(Box::new(move |range| status.set_text(&format_range(range))));

        *lock(&self.slider) = Some(Arc::clone(&slider));
        Some(slider)
    }

    /// Append one selector option per backend category, in fetch order
    pub async fn load_categories(&self) {
        let _loading = self.loading.scoped();

        match self.api.fetch_categories().await {
            Ok(list) => {
                for category in &list.categories {
                    self.page
                        .event_type
                        .append_option(&category.id, &category.title);
                }
                tracing::info!(count = list.categories.len(), "Categories loaded");
            }
            Err(e) => self.record_failure("load_categories", &e),
        }
    }

    /// Update charts and map concurrently, waiting for both
    pub async fn refresh_data(&self) {
        let refresh_id = Uuid::new_v4();
        self.run_refresh()
            .instrument(tracing::info_span!("refresh", id = %refresh_id))
            .await
    }

    async fn run_refresh(&self) {
        let _serialized = self.refresh_lock.lock().await;
        let _loading = self.loading.scoped();
        let started = Instant::now();
        let filter = self.current_filter();

        let (charts, map) = tokio::join!(self.try_update_charts(), self.map.update_map(&filter));

        if let Err(e) = &charts {
            self.record_failure("update_charts", e);
        }
        if let Err(e) = &map {
            self.record_failure("update_map", e);
        }

        {
            let mut status = lock(&self.status);
            status.refreshes += 1;
            status.last_refresh = Some(Utc::now());
        }

        tracing::info!(
            charts_updated = charts.as_ref().copied().unwrap_or(0),
            map_updated = map.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Dashboard refreshed"
        );
    }

    /// Filter reflecting the slider handles and the selected event type
    pub fn current_filter(&self) -> EventFilter {
        let range = lock(&self.slider).as_ref().map(|slider| slider.values());

        EventFilter {
            event_type: self.page.event_type.selected_value(),
            min_magnitude: range.map(|r| r.low()),
            max_magnitude: range.map(|r| r.high()),
            ..Default::default()
        }
    }

    pub fn slider(&self) -> Option<Arc<dyn RangeSlider>> {
        lock(&self.slider).clone()
    }

    /// Charts that have been constructed
    pub async fn initialized_charts(&self) -> Vec<DashboardChart> {
        let slots = self.charts.lock().await;
        DashboardChart::ALL
            .into_iter()
            .filter(|chart| slots[chart.index()].is_some())
            .collect()
    }

    pub fn status(&self) -> ControllerStatus {
        lock(&self.status).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    fn record_failure(&self, operation: &'static str, error: &dyn Display) {
        tracing::error!(operation, error = %error, "Dashboard operation failed");

        let mut status = lock(&self.status);
        status.failures += 1;
        status.last_error = Some(format!("{}: {}", operation, error));
    }
}
