//! Chart capability
//!
//! Charts are bound to a label array and a value array of equal length.
//! [`ChartData`] is the only way to hand data to a chart, so the
//! invariant holds at every construction and every refresh.

use super::WidgetError;

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Doughnut => "doughnut",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        }
    }
}

/// Where the legend is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LegendPosition {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
    Hidden,
}

/// Fixed visual configuration of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub dataset_label: String,
    /// One color per data point for doughnut/bar, a single stroke color for line
    pub colors: Vec<String>,
    pub legend: LegendPosition,
    /// Start the value axis at zero (ignored by doughnut)
    pub begin_at_zero: bool,
    /// Bezier tension for line charts, 0.0 draws straight segments
    pub tension: f64,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            kind,
            dataset_label: title.clone(),
            title,
            colors: Vec::new(),
            legend: LegendPosition::default(),
            begin_at_zero: false,
            tension: 0.0,
        }
    }

    pub fn dataset_label(mut self, label: impl Into<String>) -> Self {
        self.dataset_label = label.into();
        self
    }

    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    pub fn begin_at_zero(mut self, begin_at_zero: bool) -> Self {
        self.begin_at_zero = begin_at_zero;
        self
    }

    pub fn tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    /// Color of the data point at `index`, cycling through the palette
    pub fn color_for(&self, index: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[index % self.colors.len()].as_str())
    }
}

/// Labels and values bound to a chart, always of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartData {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self, WidgetError> {
        if labels.len() != values.len() {
            return Err(WidgetError::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    pub fn from_points<I, L>(points: I) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let (labels, values) = points
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

/// A constructed chart widget
pub trait ChartWidget: Send {
    /// Currently bound data
    fn data(&self) -> ChartData;

    /// Replace the bound labels and values in place
    fn set_data(&mut self, data: ChartData);

    /// Repaint with the currently bound data
    fn update(&mut self);
}

/// Constructs chart widgets on mount points
pub trait ChartFactory: Send + Sync {
    fn create(
        &self,
        mount_id: &str,
        config: ChartConfig,
        data: ChartData,
    ) -> Result<Box<dyn ChartWidget>, WidgetError>;
}
