//! Headless page elements

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::lock;
use crate::widgets::page::{EVENT_TYPE_SELECT, LOADING_OVERLAY, MAGNITUDE_VALUES};
use crate::widgets::{DashboardPage, LoadingOverlay, PageElements, SelectControl, StatusText, WidgetError};

/// Overlay that records every visibility transition
#[derive(Debug, Default)]
pub struct HeadlessOverlay {
    visible: AtomicBool,
    shown: AtomicUsize,
    hidden: AtomicUsize,
}

impl HeadlessOverlay {
    /// Number of times the overlay went from hidden to visible
    pub fn times_shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    /// Number of times the overlay went from visible to hidden
    pub fn times_hidden(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }
}

impl LoadingOverlay for HeadlessOverlay {
    fn set_visible(&self, visible: bool) {
        let was_visible = self.visible.swap(visible, Ordering::SeqCst);
        match (was_visible, visible) {
            (false, true) => {
                self.shown.fetch_add(1, Ordering::SeqCst);
            }
            (true, false) => {
                self.hidden.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct HeadlessText {
    text: Mutex<String>,
}

impl HeadlessText {
    pub fn text(&self) -> String {
        lock(&self.text).clone()
    }
}

impl StatusText for HeadlessText {
    fn set_text(&self, text: &str) {
        *lock(&self.text) = text.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Selection control starting with only the implicit "all" option
#[derive(Debug, Default)]
pub struct HeadlessSelect {
    options: Mutex<Vec<SelectOption>>,
    selected: Mutex<Option<String>>,
}

impl HeadlessSelect {
    pub fn options(&self) -> Vec<SelectOption> {
        lock(&self.options).clone()
    }

    /// Select an option by value, `None` or an unknown value selects "all"
    pub fn select(&self, value: Option<&str>) {
        let known = value.filter(|v| lock(&self.options).iter().any(|o| o.value == *v));
        *lock(&self.selected) = known.map(str::to_string);
    }
}

impl SelectControl for HeadlessSelect {
    fn append_option(&self, value: &str, label: &str) {
        lock(&self.options).push(SelectOption {
            value: value.to_string(),
            label: label.to_string(),
        });
    }

    fn selected_value(&self) -> Option<String> {
        lock(&self.selected).clone()
    }
}

/// The headless elements of one dashboard page, found under the
/// standard dashboard ids
#[derive(Debug, Default, Clone)]
pub struct HeadlessPage {
    pub overlay: Arc<HeadlessOverlay>,
    pub magnitude_values: Arc<HeadlessText>,
    pub event_type: Arc<HeadlessSelect>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page handle for the controller, sharing state with `self`
    pub fn page(&self) -> Result<DashboardPage, WidgetError> {
        DashboardPage::bind(self)
    }
}

impl PageElements for HeadlessPage {
    fn overlay(&self, selector: &str) -> Option<Arc<dyn LoadingOverlay>> {
        (selector == LOADING_OVERLAY).then(|| self.overlay.clone() as Arc<dyn LoadingOverlay>)
    }

    fn status_text(&self, id: &str) -> Option<Arc<dyn StatusText>> {
        (id == MAGNITUDE_VALUES).then(|| self.magnitude_values.clone() as Arc<dyn StatusText>)
    }

    fn select(&self, id: &str) -> Option<Arc<dyn SelectControl>> {
        (id == EVENT_TYPE_SELECT).then(|| self.event_type.clone() as Arc<dyn SelectControl>)
    }
}
