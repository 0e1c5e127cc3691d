//! Window core for Tabshell.
//!
//! `BrowserWindow` is everything one browser window knows, independent of how
//! it is drawn: its tabs, their load states, the shared address bar and the
//! classifier for typed input. The hosting shell forwards user actions and
//! surface events into it and carries out the [`WindowCommand`]s it returns.
//!
//! Windows share nothing; a "new window" is a second `BrowserWindow` with its
//! own factory.

use log::{debug, info, warn};

use crate::managers::address_bar::AddressBarSync;
use crate::managers::load_progress::LoadProgressTracker;
use crate::managers::tab_registry::{CloseOutcome, TabRegistry, TabRegistryTrait};
use crate::managers::tab_session::TabSession;
use crate::services::navigation_classifier::NavigationClassifier;
use crate::surface::home::home_document;
use crate::surface::{SurfaceEvent, SurfaceFactory};
use crate::types::action::{ShellAction, WindowCommand};
use crate::types::errors::TabError;
use crate::types::navigation::NavigationTarget;
use crate::types::settings::ShellSettings;
use crate::types::tab::{LoadState, NavigationState, TabHandle, TabSummary};

/// One browser window's core state.
pub struct BrowserWindow<F: SurfaceFactory> {
    factory: F,
    tabs: TabRegistry<F::Surface>,
    tracker: LoadProgressTracker,
    address_bar: AddressBarSync,
    classifier: NavigationClassifier,
    zoom_step: f64,
}

impl<F: SurfaceFactory> BrowserWindow<F> {
    /// Creates a window with one tab showing the home document.
    pub fn new(factory: F, settings: &ShellSettings) -> Result<Self, TabError> {
        let mut window = Self {
            factory,
            tabs: TabRegistry::new(home_document(&settings.general.home_title)),
            tracker: LoadProgressTracker::new(),
            address_bar: AddressBarSync::new(),
            classifier: NavigationClassifier::new(settings.general.search_url.clone()),
            zoom_step: settings.view.zoom_step,
        };
        window.open_tab(None, true)?;
        info!("window: opened");
        Ok(window)
    }

    pub fn tabs(&self) -> &TabRegistry<F::Surface> {
        &self.tabs
    }

    pub fn tracker(&self) -> &LoadProgressTracker {
        &self.tracker
    }

    pub fn address_bar(&self) -> &AddressBarSync {
        &self.address_bar
    }

    pub fn classifier(&self) -> &NavigationClassifier {
        &self.classifier
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn active_handle(&self) -> Option<TabHandle> {
        self.tabs.active_handle()
    }

    pub fn active_session(&self) -> Option<&TabSession<F::Surface>> {
        self.tabs.active_session()
    }

    pub fn session_mut(&mut self, handle: TabHandle) -> Option<&mut TabSession<F::Surface>> {
        self.tabs.get_mut(handle)
    }

    pub fn state_of(&self, handle: TabHandle) -> LoadState {
        self.tracker.state_of(handle)
    }

    /// Back/forward availability for the active tab.
    pub fn navigation_state(&self) -> NavigationState {
        self.tabs
            .active_session()
            .map(|s| s.navigation_state())
            .unwrap_or_default()
    }

    /// Everything the chrome needs to draw the tab strip, in display order.
    pub fn summaries(&self) -> Vec<TabSummary> {
        let active = self.tabs.active_handle();
        self.tabs
            .handles()
            .iter()
            .filter_map(|&handle| {
                let session = self.tabs.get(handle)?;
                let label = self.tabs.label(handle)?.clone();
                Some(TabSummary {
                    handle,
                    label,
                    url: session.url().to_string(),
                    state: self.tracker.state_of(handle),
                    zoom: session.zoom(),
                    active: active == Some(handle),
                })
            })
            .collect()
    }

    /// Opens a tab, loading `target` or the home document.
    pub fn open_tab(
        &mut self,
        target: Option<&NavigationTarget>,
        make_active: bool,
    ) -> Result<TabHandle, TabError> {
        let handle =
            self.tabs
                .create_tab(&mut self.factory, target.map(|t| t.as_str()), make_active)?;
        self.tracker.register(handle);
        self.tracker.restart(handle);
        if self.tabs.active_handle() == Some(handle) {
            self.refresh_address_bar();
        }
        Ok(handle)
    }

    /// Closes a tab. Closing the last tab asks for the window to close.
    pub fn close_tab(&mut self, handle: TabHandle) -> Option<WindowCommand> {
        match self.tabs.close_tab(handle) {
            CloseOutcome::Closed { activated } => {
                self.tracker.forget(handle);
                if activated.is_some() {
                    self.refresh_address_bar();
                }
                None
            }
            CloseOutcome::WindowCloseRequested => Some(WindowCommand::CloseWindow),
            CloseOutcome::Stale => None,
        }
    }

    pub fn close_active_tab(&mut self) -> Option<WindowCommand> {
        let handle = self.tabs.active_handle()?;
        self.close_tab(handle)
    }

    /// Makes `handle` the active tab and pulls its state into the address bar.
    pub fn set_active(&mut self, handle: TabHandle) -> Result<(), TabError> {
        self.tabs.set_active(handle)?;
        self.refresh_address_bar();
        Ok(())
    }

    /// Handles text submitted from the address bar.
    ///
    /// Empty text goes home. Returns the target navigated to.
    pub fn submit_address(&mut self, text: &str) -> Option<NavigationTarget> {
        let text = text.trim();
        if text.is_empty() {
            self.go_home();
            return None;
        }
        let target = self.classifier.classify(text);
        debug!("window: '{}' -> {:?}", text, target);
        self.navigate_active(&target);
        Some(target)
    }

    /// Navigates the active tab to an already-resolved target.
    pub fn navigate_active(&mut self, target: &NavigationTarget) {
        let Some(handle) = self.tabs.active_handle() else {
            return;
        };
        if let Some(session) = self.tabs.get_mut(handle) {
            session.navigate(target.as_str());
            self.restart_load(handle);
        }
    }

    pub fn go_home(&mut self) {
        let Some(handle) = self.tabs.active_handle() else {
            return;
        };
        let home = self.tabs.home_html().to_string();
        if let Some(session) = self.tabs.get_mut(handle) {
            session.load_home(&home);
            self.restart_load(handle);
        }
    }

    pub fn back(&mut self) {
        if let Some(session) = self.tabs.active_session_mut() {
            session.back();
        }
    }

    pub fn forward(&mut self) {
        if let Some(session) = self.tabs.active_session_mut() {
            session.forward();
        }
    }

    pub fn reload(&mut self) {
        let Some(handle) = self.tabs.active_handle() else {
            return;
        };
        if let Some(session) = self.tabs.get_mut(handle) {
            session.reload();
            self.restart_load(handle);
        }
    }

    pub fn zoom_in(&mut self) -> Option<f64> {
        let step = self.zoom_step;
        self.tabs.active_session_mut().map(|s| s.zoom_in(step))
    }

    pub fn zoom_out(&mut self) -> Option<f64> {
        let step = self.zoom_step;
        self.tabs.active_session_mut().map(|s| s.zoom_out(step))
    }

    pub fn reset_zoom(&mut self) -> Option<f64> {
        self.tabs.active_session_mut().map(|s| s.reset_zoom())
    }

    /// Records what the user typed without navigating.
    pub fn edit_address(&mut self, text: &str) {
        self.address_bar.set_text(text);
    }

    /// Runs a toolbar, menu or shortcut action.
    pub fn perform(&mut self, action: ShellAction) -> Result<Option<WindowCommand>, TabError> {
        match action {
            ShellAction::Back => self.back(),
            ShellAction::Forward => self.forward(),
            ShellAction::Reload => self.reload(),
            ShellAction::Home => self.go_home(),
            ShellAction::NewTab => {
                self.open_tab(None, true)?;
            }
            ShellAction::CloseTab => return Ok(self.close_active_tab()),
            ShellAction::NewWindow => return Ok(Some(WindowCommand::SpawnWindow)),
            ShellAction::Quit => return Ok(Some(WindowCommand::CloseWindow)),
            ShellAction::ZoomIn => {
                self.zoom_in();
            }
            ShellAction::ZoomOut => {
                self.zoom_out();
            }
            ShellAction::ZoomReset => {
                self.reset_zoom();
            }
            ShellAction::ToggleFullscreen => return Ok(Some(WindowCommand::ToggleFullscreen)),
            ShellAction::FocusAddressBar => return Ok(Some(WindowCommand::FocusAddressBar)),
        }
        Ok(None)
    }

    /// Routes an event from the surface of tab `handle`.
    ///
    /// Events for tabs that are no longer open are dropped. Returns whether
    /// the event was applied.
    pub fn dispatch(&mut self, handle: TabHandle, event: SurfaceEvent) -> bool {
        let active = self.tabs.active_handle();
        let Some(session) = self.tabs.get_mut(handle) else {
            debug!("window: {:?} for closed tab {} dropped", event, handle);
            return false;
        };

        let event = session.apply(event);
        let title = session.title().to_string();

        if let Some(hint) = self.tracker.on_event(handle, &event, &title) {
            self.tabs.apply_label_hint(handle, hint);
        }

        match &event {
            SurfaceEvent::TitleChanged(title) => self.tabs.set_title_label(handle, title),
            // No TitleChanged arrives when a reload keeps the title; the
            // session picked it up from the surface instead.
            SurfaceEvent::LoadFinished(true) if !title.is_empty() => {
                self.tabs.set_title_label(handle, &title);
            }
            SurfaceEvent::UrlChanged(url) => {
                self.address_bar.on_url_changed(handle, active, url);
            }
            SurfaceEvent::LoadFinished(false) => {
                warn!("window: tab {} failed to load", handle);
            }
            _ => {}
        }

        if matches!(
            event,
            SurfaceEvent::LoadStarted
                | SurfaceEvent::LoadProgress(_)
                | SurfaceEvent::LoadFinished(_)
        ) {
            let state = self.tracker.state_of(handle);
            self.address_bar.on_load_state(handle, active, state);
        }
        true
    }

    /// Releases every tab; the window is going away.
    pub fn shutdown(&mut self) {
        for &handle in self.tabs.handles() {
            self.tracker.forget(handle);
        }
        self.tabs.close_all();
        self.address_bar.clear();
        info!("window: closed");
    }

    fn restart_load(&mut self, handle: TabHandle) {
        self.tracker.restart(handle);
        let active = self.tabs.active_handle();
        self.address_bar
            .on_load_state(handle, active, self.tracker.state_of(handle));
    }

    fn refresh_address_bar(&mut self) {
        let Some(session) = self.tabs.active_session() else {
            self.address_bar.clear();
            return;
        };
        let state = self.tracker.state_of(session.handle());
        self.address_bar.on_activated(session.url(), state);
    }
}
