//! Headless range slider

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::lock;
use crate::widgets::{HandleRange, RangeSlider, SliderCallback, SliderFactory, SliderOptions, WidgetError};

/// In-memory dual-handle slider.
///
/// `drag_low`/`drag_high` simulate user interaction and notify every
/// registered callback, like a real widget's update event.
pub struct HeadlessSlider {
    options: SliderOptions,
    range: Mutex<HandleRange>,
    callbacks: Mutex<Vec<SliderCallback>>,
    destroyed: AtomicBool,
}

impl HeadlessSlider {
    fn new(options: SliderOptions) -> Self {
        Self {
            range: Mutex::new(options.initial_range()),
            options,
            callbacks: Mutex::new(Vec::new()),
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn drag_low(&self, value: f64) {
        self.apply(|options, current| options.move_low(current, value));
    }

    pub fn drag_high(&self, value: f64) {
        self.apply(|options, current| options.move_high(current, value));
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub fn callback_count(&self) -> usize {
        lock(&self.callbacks).len()
    }

    fn apply(&self, movement: impl FnOnce(&SliderOptions, HandleRange) -> HandleRange) {
        if self.is_destroyed() {
            return;
        }

        let updated = {
            let mut range = lock(&self.range);
            *range = movement(&self.options, *range);
            *range
        };

        for callback in lock(&self.callbacks).iter() {
            callback(updated);
        }
    }
}

impl RangeSlider for HeadlessSlider {
    fn values(&self) -> HandleRange {
        *lock(&self.range)
    }

    fn on_update(&self, callback: SliderCallback) {
        if self.is_destroyed() {
            return;
        }
        callback(self.values());
        lock(&self.callbacks).push(callback);
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
        lock(&self.callbacks).clear();
    }
}

/// Slider factory that keeps the live slider per mount id
#[derive(Default)]
pub struct HeadlessSliderFactory {
    sliders: Mutex<HashMap<String, Arc<HeadlessSlider>>>,
    destroyed: AtomicUsize,
}

impl HeadlessSliderFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live slider on a mount point
    pub fn slider(&self, mount_id: &str) -> Option<Arc<HeadlessSlider>> {
        lock(&self.sliders).get(mount_id).cloned()
    }

    /// Number of sliders torn down by re-initialization
    pub fn destroyed_count(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl SliderFactory for HeadlessSliderFactory {
    fn destroy_existing(&self, mount_id: &str) -> bool {
        match lock(&self.sliders).remove(mount_id) {
            Some(slider) => {
                slider.destroy();
                self.destroyed.fetch_add(1, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    fn create(
        &self,
        mount_id: &str,
        options: SliderOptions,
    ) -> Result<Arc<dyn RangeSlider>, WidgetError> {
        options.validate()?;

        let mut sliders = lock(&self.sliders);
        if sliders.contains_key(mount_id) {
            return Err(WidgetError::InvalidOptions(format!(
                "slider already initialized on {}",
                mount_id
            )));
        }

        let slider = Arc::new(HeadlessSlider::new(options));
        sliders.insert(mount_id.to_string(), Arc::clone(&slider));
        Ok(slider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::format_range;

    #[test]
    fn test_callback_fires_on_register_and_drag() {
        let factory = HeadlessSliderFactory::new();
        let slider = factory.create("s", SliderOptions::default()).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        slider.on_update(Box::new(move |range| lock(&sink).push(format_range(range))));

        let handle = factory.slider("s").unwrap();
        handle.drag_low(3.14);
        handle.drag_high(8.96);

        assert_eq!(*lock(&seen), vec!["0.0 - 10.0", "3.1 - 10.0", "3.1 - 9.0"]);
    }

    #[test]
    fn test_drag_past_partner_stops() {
        let factory = HeadlessSliderFactory::new();
        factory.create("s", SliderOptions::default()).unwrap();
        let slider = factory.slider("s").unwrap();

        slider.drag_high(2.0);
        slider.drag_low(5.0);

        let range = slider.values();
        assert_eq!(range.low(), 2.0);
        assert_eq!(range.high(), 2.0);
    }

    #[test]
    fn test_double_create_requires_destroy() {
        let factory = HeadlessSliderFactory::new();
        factory.create("s", SliderOptions::default()).unwrap();
        assert!(factory.create("s", SliderOptions::default()).is_err());

        let old = factory.slider("s").unwrap();
        assert!(factory.destroy_existing("s"));
        assert!(old.is_destroyed());
        assert_eq!(old.callback_count(), 0);
        assert!(!factory.destroy_existing("s"));

        assert!(factory.create("s", SliderOptions::default()).is_ok());
        assert_eq!(factory.destroyed_count(), 1);
    }
}
