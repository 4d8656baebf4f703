//! Widget Capabilities
//!
//! The dashboard never renders anything itself. It drives externally
//! constructed widgets through these traits:
//!
//! - [`ChartFactory`] / [`ChartWidget`]: doughnut, bar and line charts
//! - [`SliderFactory`] / [`RangeSlider`]: dual-handle range input
//! - [`page`]: loading overlay, status text and selection control
//!
//! [`crate::headless`] provides in-memory implementations.

pub mod chart;
pub mod page;
pub mod slider;

pub use chart::{ChartConfig, ChartData, ChartFactory, ChartKind, ChartWidget, LegendPosition};
pub use page::{DashboardPage, LoadingOverlay, PageElements, SelectControl, StatusText};
pub use slider::{
    format_range, HandleRange, RangeSlider, SliderCallback, SliderFactory, SliderOptions,
};

use thiserror::Error;

/// Errors raised while constructing or binding widgets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("Mount point not found: {0}")]
    MountNotFound(String),

    #[error("Label/data length mismatch: {labels} labels, {values} values")]
    LengthMismatch { labels: usize, values: usize },

    #[error("Invalid slider options: {0}")]
    InvalidOptions(String),
}
