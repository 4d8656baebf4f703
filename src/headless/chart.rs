//! Headless chart widgets

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::lock;
use crate::widgets::{ChartConfig, ChartData, ChartFactory, ChartKind, ChartWidget, WidgetError};

/// Point-in-time view of a headless chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub mount_id: String,
    pub kind: ChartKind,
    pub title: String,
    pub data: ChartData,
    /// Color painted for each data point
    pub colors: Vec<String>,
    /// Number of `update()` calls since construction
    pub redraws: usize,
    /// Number of times a chart was constructed on this mount point
    pub generation: usize,
}

#[derive(Debug)]
struct ChartState {
    config: ChartConfig,
    data: ChartData,
    redraws: usize,
    generation: usize,
}

struct HeadlessChart {
    state: Arc<Mutex<ChartState>>,
}

impl ChartWidget for HeadlessChart {
    fn data(&self) -> ChartData {
        lock(&self.state).data.clone()
    }

    fn set_data(&mut self, data: ChartData) {
        lock(&self.state).data = data;
    }

    fn update(&mut self) {
        lock(&self.state).redraws += 1;
    }
}

/// Chart factory that keeps every constructed chart inspectable by mount id
#[derive(Default)]
pub struct HeadlessChartFactory {
    charts: Mutex<HashMap<String, Arc<Mutex<ChartState>>>>,
    missing_mounts: Mutex<HashSet<String>>,
}

impl HeadlessChartFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a page without the given mount point
    pub fn without_mount(self, mount_id: &str) -> Self {
        self.remove_mount(mount_id);
        self
    }

    /// Remove a mount point from the page; charts already built on it keep
    /// their last state
    pub fn remove_mount(&self, mount_id: &str) {
        lock(&self.missing_mounts).insert(mount_id.to_string());
    }

    pub fn snapshot(&self, mount_id: &str) -> Option<ChartSnapshot> {
        let charts = lock(&self.charts);
        let state = charts.get(mount_id)?;
        let state = lock(state);

        Some(ChartSnapshot {
            mount_id: mount_id.to_string(),
            kind: state.config.kind,
            title: state.config.title.clone(),
            colors: (0..state.data.len())
                .filter_map(|i| state.config.color_for(i).map(str::to_string))
                .collect(),
            data: state.data.clone(),
            redraws: state.redraws,
            generation: state.generation,
        })
    }

    /// Number of mount points holding a chart
    pub fn chart_count(&self) -> usize {
        lock(&self.charts).len()
    }
}

impl ChartFactory for HeadlessChartFactory {
    fn create(
        &self,
        mount_id: &str,
        config: ChartConfig,
        data: ChartData,
    ) -> Result<Box<dyn ChartWidget>, WidgetError> {
        if lock(&self.missing_mounts).contains(mount_id) {
            return Err(WidgetError::MountNotFound(mount_id.to_string()));
        }

        let mut charts = lock(&self.charts);
        let generation = charts
            .get(mount_id)
            .map(|previous| lock(previous).generation + 1)
            .unwrap_or(1);

        let kind = config.kind;
        let state = Arc::new(Mutex::new(ChartState {
            config,
            data,
            redraws: 0,
            generation,
        }));
        charts.insert(mount_id.to_string(), Arc::clone(&state));

        tracing::trace!(mount_id, kind = kind.as_str(), generation, "Chart created");

        Ok(Box::new(HeadlessChart { state }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_mutate() {
        let factory = HeadlessChartFactory::new();
        let mut chart = factory
            .create(
                "categoryChart",
                ChartConfig::new(ChartKind::Doughnut, "Categories"),
                ChartData::from_points([("Quake", 5.0)]),
            )
            .unwrap();

        chart.set_data(ChartData::from_points([("Quake", 6.0), ("Flood", 1.0)]));
        chart.update();

        let snapshot = factory.snapshot("categoryChart").unwrap();
        assert_eq!(snapshot.kind, ChartKind::Doughnut);
        assert_eq!(snapshot.data.values(), [6.0, 1.0]);
        assert_eq!(snapshot.redraws, 1);
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.colors.is_empty());
        assert_eq!(chart.data(), snapshot.data);
    }

    #[test]
    fn test_recreate_bumps_generation() {
        let factory = HeadlessChartFactory::new();
        let config = ChartConfig::new(ChartKind::Bar, "Magnitudes");

        factory.create("m", config.clone(), ChartData::default()).unwrap();
        factory.create("m", config, ChartData::default()).unwrap();

        assert_eq!(factory.snapshot("m").unwrap().generation, 2);
        assert_eq!(factory.chart_count(), 1);
    }

    #[test]
    fn test_missing_mount() {
        let factory = HeadlessChartFactory::new().without_mount("frequencyChart");
        let result = factory.create(
            "frequencyChart",
            ChartConfig::new(ChartKind::Line, "Daily"),
            ChartData::default(),
        );

        assert!(matches!(result, Err(WidgetError::MountNotFound(_))));
        assert!(factory.snapshot("frequencyChart").is_none());
    }
}
