//! Headless Widgets
//!
//! In-memory implementations of every widget capability. They hold the
//! state a real widget would display and expose snapshots for inspection,
//! which makes them the backend for tests and for the terminal renderer.

mod chart;
mod page;
mod slider;

pub use chart::{ChartSnapshot, HeadlessChartFactory};
pub use page::{HeadlessOverlay, HeadlessPage, HeadlessSelect, HeadlessText, SelectOption};
pub use slider::{HeadlessSlider, HeadlessSliderFactory};
