//! Stub collaborators shared by the dashboard tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::controller::DashboardController;
use crate::api::{CategoryList, DashboardApi, EventFilter, FetchError, FetchResult, SummaryStats};
use crate::headless::{HeadlessChartFactory, HeadlessPage, HeadlessSliderFactory};
use crate::lock;
use crate::map::{MapError, MapUpdater};

const SCENARIO_SUMMARY: &str = r#"{
    "categories": {"Quake": 5, "Flood": 2},
    "magnitudes": {"low": 3, "medium": 2, "high": 2},
    "daily_counts": {"2024-01-01": 4, "2024-01-02": 3}
}"#;

const SCENARIO_CATEGORIES: &str = r#"{"categories": [{"id": "eq", "title": "Earthquake"}]}"#;

fn status_error(status: u16) -> FetchError {
    FetchError::Status {
        status,
        message: "stub failure".to_string(),
    }
}

/// Backend stub answering with canned bodies or HTTP error statuses
pub struct StubApi {
    summary: Mutex<Result<SummaryStats, u16>>,
    categories: Mutex<Result<CategoryList, u16>>,
    summary_calls: AtomicUsize,
    category_calls: AtomicUsize,
}

impl StubApi {
    pub fn new() -> Self {
        let summary = serde_json::from_str(SCENARIO_SUMMARY).unwrap();
        let categories = serde_json::from_str(SCENARIO_CATEGORIES).unwrap();

        Self {
            summary: Mutex::new(Ok(summary)),
            categories: Mutex::new(Ok(categories)),
            summary_calls: AtomicUsize::new(0),
            category_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_summary(&self, summary: Result<SummaryStats, u16>) {
        *lock(&self.summary) = summary;
    }

    pub fn set_categories(&self, categories: Result<CategoryList, u16>) {
        *lock(&self.categories) = categories;
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardApi for StubApi {
    async fn fetch_summary(&self) -> FetchResult<SummaryStats> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        lock(&self.summary).clone().map_err(status_error)
    }

    async fn fetch_categories(&self) -> FetchResult<CategoryList> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        lock(&self.categories).clone().map_err(status_error)
    }
}

/// Map stub recording every filter it was refreshed with
#[derive(Default)]
pub struct StubMap {
    calls: AtomicUsize,
    fail_next: AtomicBool,
    filters: Mutex<Vec<EventFilter>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubMap {
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_filter(&self) -> Option<EventFilter> {
        lock(&self.filters).last().cloned()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MapUpdater for StubMap {
    async fn update_map(&self, filter: &EventFilter) -> Result<(), MapError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        lock(&self.filters).push(filter.clone());

        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(MapError::Render("stub map failure".to_string()));
        }
        Ok(())
    }
}

/// A controller wired to headless widgets and stub collaborators
pub struct Harness {
    pub controller: Arc<DashboardController>,
    pub charts: Arc<HeadlessChartFactory>,
    pub sliders: Arc<HeadlessSliderFactory>,
    pub page: HeadlessPage,
    pub api: Arc<StubApi>,
    pub map: Arc<StubMap>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_chart_factory(HeadlessChartFactory::new())
    }

    pub fn with_chart_factory(charts: HeadlessChartFactory) -> Self {
        let charts = Arc::new(charts);
        let sliders = Arc::new(HeadlessSliderFactory::new());
        let page = HeadlessPage::new();
        let api = Arc::new(StubApi::new());
        let map = Arc::new(StubMap::default());

        let controller = Arc::new(DashboardController::new(
            api.clone(),
            charts.clone(),
            sliders.clone(),
            map.clone(),
            page.page().unwrap(),
        ));

        Self {
            controller,
            charts,
            sliders,
            page,
            api,
            map,
        }
    }
}
