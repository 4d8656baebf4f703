//! Page elements
//!
//! Mount point identifiers and the small non-chart elements the
//! dashboard writes to.

use std::sync::Arc;

use super::WidgetError;

/// Category doughnut chart mount point
pub const CATEGORY_CHART: &str = "categoryChart";
/// Magnitude bar chart mount point
pub const MAGNITUDE_CHART: &str = "magnitudeChart";
/// Daily frequency line chart mount point
pub const FREQUENCY_CHART: &str = "frequencyChart";
/// Magnitude range slider mount point
pub const MAGNITUDE_SLIDER: &str = "magnitudeSlider";
/// Slider status text element
pub const MAGNITUDE_VALUES: &str = "magnitudeValues";
/// Event type selection control
pub const EVENT_TYPE_SELECT: &str = "eventType";
/// Loading overlay selector
pub const LOADING_OVERLAY: &str = ".loading-overlay";

/// Shared loading overlay
pub trait LoadingOverlay: Send + Sync {
    fn set_visible(&self, visible: bool);

    fn is_visible(&self) -> bool;
}

/// Text element
pub trait StatusText: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Drop-down selection control
pub trait SelectControl: Send + Sync {
    fn append_option(&self, value: &str, label: &str);

    /// Value of the selected option, `None` for the empty "all" option
    fn selected_value(&self) -> Option<String>;
}

/// Element lookup on a rendered page
pub trait PageElements {
    fn overlay(&self, selector: &str) -> Option<Arc<dyn LoadingOverlay>>;

    fn status_text(&self, id: &str) -> Option<Arc<dyn StatusText>>;

    fn select(&self, id: &str) -> Option<Arc<dyn SelectControl>>;
}

/// Elements of the dashboard page besides charts and slider
#[derive(Clone)]
pub struct DashboardPage {
    pub loading_overlay: Arc<dyn LoadingOverlay>,
    pub magnitude_values: Arc<dyn StatusText>,
    pub event_type: Arc<dyn SelectControl>,
}

impl DashboardPage {
    /// Resolve every element the dashboard writes to
    pub fn bind(elements: &dyn PageElements) -> Result<Self, WidgetError> {
        let missing = |id: &str| WidgetError::MountNotFound(id.to_string());

        Ok(Self {
            loading_overlay: elements
                .overlay(LOADING_OVERLAY)
                .ok_or_else(|| missing(LOADING_OVERLAY))?,
            magnitude_values: elements
                .status_text(MAGNITUDE_VALUES)
                .ok_or_else(|| missing(MAGNITUDE_VALUES))?,
            event_type: elements
                .select(EVENT_TYPE_SELECT)
                .ok_or_else(|| missing(EVENT_TYPE_SELECT))?,
        })
    }
}
