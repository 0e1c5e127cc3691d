//! Per-tab load state machine.
//!
//! ```text
//! Idle ──LoadStarted──▶ Loading(0) ──LoadProgress(p)──▶ Loading(p)
//!                           │
//!                     LoadFinished(ok)
//!                           ▼
//!                     Done | Failed ──next navigation──▶ Loading(0)
//! ```
//!
//! Progress outside `Loading` is dropped. No state is terminal.

use std::collections::HashMap;

use log::{debug, trace};

use crate::surface::SurfaceEvent;
use crate::types::tab::{LabelHint, LoadState, TabHandle};

/// Load state of every open tab.
#[derive(Debug, Default)]
pub struct LoadProgressTracker {
    states: HashMap<TabHandle, LoadState>,
}

impl LoadProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a new tab in `Idle`.
    pub fn register(&mut self, handle: TabHandle) {
        self.states.insert(handle, LoadState::Idle);
    }

    /// Stops tracking a closed tab.
    pub fn forget(&mut self, handle: TabHandle) {
        self.states.remove(&handle);
    }

    pub fn is_tracked(&self, handle: TabHandle) -> bool {
        self.states.contains_key(&handle)
    }

    /// Current state; `Idle` for tabs that are not tracked.
    pub fn state_of(&self, handle: TabHandle) -> LoadState {
        self.states.get(&handle).copied().unwrap_or_default()
    }

    /// A navigation, reload or home request was issued: restart at `Loading(0)`.
    pub fn restart(&mut self, handle: TabHandle) {
        if let Some(state) = self.states.get_mut(&handle) {
            *state = LoadState::Loading(0);
        }
    }

    /// Advances the state machine for `handle`.
    ///
    /// `title` is the page title known when the event arrives. Returns the
    /// label change the tab should show, if any.
    pub fn on_event(
        &mut self,
        handle: TabHandle,
        event: &SurfaceEvent,
        title: &str,
    ) -> Option<LabelHint> {
        let state = self.states.get_mut(&handle)?;
        let previous = *state;

        let hint = match event {
            SurfaceEvent::LoadStarted => {
                *state = LoadState::Loading(0);
                Some(LabelHint::Loading)
            }
            SurfaceEvent::LoadProgress(p) => {
                if state.is_loading() {
                    *state = LoadState::Loading((*p).min(100));
                } else {
                    trace!("tab {}: progress {} outside a load ignored", handle, p);
                }
                None
            }
            SurfaceEvent::LoadFinished(true) => {
                *state = LoadState::Done;
                title.is_empty().then_some(LabelHint::Untitled)
            }
            SurfaceEvent::LoadFinished(false) => {
                *state = LoadState::Failed;
                None
            }
            SurfaceEvent::TitleChanged(_) | SurfaceEvent::UrlChanged(_) => None,
        };

        if *state != previous {
            debug!("tab {}: {:?} -> {:?}", handle, previous, state);
        }
        hint
    }
}
