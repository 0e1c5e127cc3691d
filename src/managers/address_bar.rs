//! The one address bar and progress indicator shared by all tabs of a window.
//!
//! Only the active tab may write to them. Updates from background tabs are
//! dropped; activating a tab pulls its state immediately.

use log::trace;

use crate::types::tab::{LoadState, ProgressIndicator, TabHandle};

#[derive(Debug, Default)]
pub struct AddressBarSync {
    text: String,
    progress: ProgressIndicator,
}

impl AddressBarSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }

    pub fn progress(&self) -> ProgressIndicator {
        self.progress
    }

    /// Replaces the text with what the user is typing.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// A tab's URL changed. Returns whether the bar was updated.
    pub fn on_url_changed(
        &mut self,
        emitter: TabHandle,
        active: Option<TabHandle>,
        url: &str,
    ) -> bool {
        if active != Some(emitter) {
            trace!("address bar: url from background tab {} dropped", emitter);
            return false;
        }
        self.text = url.to_string();
        true
    }

    /// A tab's load state changed. Returns whether the indicator was updated.
    pub fn on_load_state(
        &mut self,
        emitter: TabHandle,
        active: Option<TabHandle>,
        state: LoadState,
    ) -> bool {
        if active != Some(emitter) {
            return false;
        }
        self.progress = ProgressIndicator::for_state(state);
        true
    }

    /// A different tab became active: show its URL and progress now.
    pub fn on_activated(&mut self, url: &str, state: LoadState) {
        self.text = url.to_string();
        self.progress = ProgressIndicator::for_state(state);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.progress = ProgressIndicator::default();
    }
}
