//! View implementation that records what would have been displayed

use std::sync::{Arc, Mutex};

use crate::traits::*;
use crate::types::*;

/// Rendered state captured by a `RecordingView`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Quote currently on display
    pub current: Option<QuoteRecord>,
    /// Empty-state message, when no quote matched
    pub empty_message: Option<String>,
    /// Last viewed quote text and category, as rendered
    pub last_viewed: Option<(String, String)>,
    /// Category options currently offered
    pub categories: Vec<String>,
    /// Filter currently selected in the options
    pub selected: CategoryFilter,
    /// Every notice shown, oldest first
    pub notices: Vec<Notice>,
}

/// Headless view for tests and demos
///
/// Clones share state, so a handle kept outside the quote book observes
/// everything the book renders.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    state: Arc<Mutex<ViewSnapshot>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current rendered state
    pub fn snapshot(&self) -> ViewSnapshot {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    /// Most recent notice
    pub fn last_notice(&self) -> Option<Notice> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.notices.last().cloned())
    }

    fn update(&self, apply: impl FnOnce(&mut ViewSnapshot)) {
        if let Ok(mut state) = self.state.lock() {
            apply(&mut state);
        }
    }
}

impl QuoteView for RecordingView {
    fn show_quote(&mut self, quote: &QuoteRecord) {
        self.update(|state| {
            state.current = Some(quote.clone());
            state.empty_message = None;
        });
    }

    fn show_empty(&mut self, message: &str) {
        self.update(|state| {
            state.current = None;
            state.empty_message = Some(message.to_string());
        });
    }

    fn show_last_viewed(&mut self, last: Option<(&str, &str)>) {
        self.update(|state| {
            state.last_viewed =
                last.map(|(text, category)| (text.to_string(), category.to_string()));
        });
    }

    fn set_categories(&mut self, categories: &[String], selected: &CategoryFilter) {
        self.update(|state| {
            state.categories = categories.to_vec();
            state.selected = selected.clone();
        });
    }

    fn notify(&mut self, notice: Notice) {
        self.update(|state| state.notices.push(notice));
    }
}
