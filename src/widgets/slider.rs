//! Range slider capability
//!
//! A dual-handle slider over a bounded domain. Handle positions snap to
//! the step grid, stay inside the domain and never cross.

use std::sync::Arc;

use super::WidgetError;

/// Lower bound of the magnitude domain
pub const MAGNITUDE_MIN: f64 = 0.0;
/// Upper bound of the magnitude domain
pub const MAGNITUDE_MAX: f64 = 10.0;
/// Handle step
pub const MAGNITUDE_STEP: f64 = 0.1;

/// Positions of the two handles, `low <= high`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleRange {
    low: f64,
    high: f64,
}

impl HandleRange {
    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Render both handles to one decimal place, e.g. `"2.5 - 7.0"`
pub fn format_range(range: HandleRange) -> String {
    format!("{:.1} - {:.1}", range.low, range.high)
}

/// Slider construction options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderOptions {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub start: (f64, f64),
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            min: MAGNITUDE_MIN,
            max: MAGNITUDE_MAX,
            step: MAGNITUDE_STEP,
            start: (MAGNITUDE_MIN, MAGNITUDE_MAX),
        }
    }
}

impl SliderOptions {
    pub fn validate(&self) -> Result<(), WidgetError> {
        if !(self.min < self.max) {
            return Err(WidgetError::InvalidOptions(format!(
                "min {} must be below max {}",
                self.min, self.max
            )));
        }
        if !(self.step > 0.0) {
            return Err(WidgetError::InvalidOptions(format!(
                "step {} must be positive",
                self.step
            )));
        }
        let (low, high) = self.start;
        if low > high || low < self.min || high > self.max {
            return Err(WidgetError::InvalidOptions(format!(
                "start [{}, {}] outside [{}, {}]",
                low, high, self.min, self.max
            )));
        }
        Ok(())
    }

    /// Snap a value to the step grid inside `[min, max]`
    pub fn snap(&self, value: f64) -> f64 {
        let value = if value.is_nan() { self.min } else { value };
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        // strip float noise such as 0.30000000000000004
        let snapped = ((self.min + steps * self.step) * 1e9).round() / 1e9;
        snapped.clamp(self.min, self.max)
    }

    /// Initial handle positions
    pub fn initial_range(&self) -> HandleRange {
        let low = self.snap(self.start.0);
        let high = self.snap(self.start.1);
        HandleRange {
            low: low.min(high),
            high,
        }
    }

    /// Move the low handle, stopping at the high handle
    pub fn move_low(&self, current: HandleRange, value: f64) -> HandleRange {
        HandleRange {
            low: self.snap(value).min(current.high),
            high: current.high,
        }
    }

    /// Move the high handle, stopping at the low handle
    pub fn move_high(&self, current: HandleRange, value: f64) -> HandleRange {
        HandleRange {
            low: current.low,
            high: self.snap(value).max(current.low),
        }
    }
}

/// Invoked with the handle positions whenever they change
pub type SliderCallback = Box<dyn Fn(HandleRange) + Send + Sync>;

/// A constructed range slider
pub trait RangeSlider: Send + Sync {
    fn values(&self) -> HandleRange;

    /// Register an update callback.
    ///
    /// Implementations call it once immediately with the current values.
    fn on_update(&self, callback: SliderCallback);

    /// Unbind from the mount point and drop all callbacks
    fn destroy(&self);
}

/// Constructs sliders on mount points
pub trait SliderFactory: Send + Sync {
    /// Destroy a slider previously created on `mount_id`.
    ///
    /// Returns whether one existed.
    fn destroy_existing(&self, mount_id: &str) -> bool;

    fn create(
        &self,
        mount_id: &str,
        options: SliderOptions,
    ) -> Result<Arc<dyn RangeSlider>, WidgetError>;
}
