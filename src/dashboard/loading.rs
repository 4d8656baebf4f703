//! Loading indicator
//!
//! Wraps the shared overlay with a count of active operations so that
//! overlapping fetches keep it visible until the last one finishes.

use std::sync::{Arc, Mutex};

use crate::lock;
use crate::widgets::LoadingOverlay;

pub struct LoadingIndicator {
    overlay: Arc<dyn LoadingOverlay>,
    /// Active scopes; held while the overlay is toggled so that count and
    /// visibility change together
    active: Mutex<usize>,
}

impl LoadingIndicator {
    pub fn new(overlay: Arc<dyn LoadingOverlay>) -> Self {
        Self {
            overlay,
            active: Mutex::new(0),
        }
    }

    pub fn show_loading(&self) {
        let mut active = lock(&self.active);
        *active += 1;
        self.overlay.set_visible(true);
    }

    pub fn hide_loading(&self) {
        let mut active = lock(&self.active);
        *active = active.saturating_sub(1);
        if *active == 0 {
            self.overlay.set_visible(false);
        }
    }

    /// Show the overlay until the returned guard is dropped
    pub fn scoped(&self) -> LoadingGuard<'_> {
        self.show_loading();
        LoadingGuard { indicator: self }
    }

    pub fn is_loading(&self) -> bool {
        *lock(&self.active) > 0
    }
}

/// Hides the overlay on drop, on success and failure paths alike
#[must_use = "the overlay is hidden as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    indicator: &'a LoadingIndicator,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.indicator.hide_loading();
    }
}
