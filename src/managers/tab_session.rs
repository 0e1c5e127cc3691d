//! Tab Session for Tabshell.
//!
//! Wraps one rendering surface for the lifetime of a tab: forwards toolbar
//! commands to it, keeps the tab's URL, title and zoom, and re-emits the
//! surface's lifecycle events after recording what they change.

use log::debug;

use crate::surface::home::HOME_URL;
use crate::surface::{RenderingSurface, SurfaceEvent};
use crate::types::tab::{NavigationState, TabHandle};

/// Smallest zoom factor a tab accepts.
pub const MIN_ZOOM: f64 = 0.3;

/// Zoom factor of a new tab and of a zoom reset.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// One tab: a rendering surface plus what the shell knows about its page.
///
/// The surface is stopped and released when the session is dropped, so a
/// closed tab never leaks its engine instance.
#[derive(Debug)]
pub struct TabSession<S: RenderingSurface> {
    handle: TabHandle,
    surface: S,
    url: String,
    title: String,
    zoom: f64,
}

impl<S: RenderingSurface> TabSession<S> {
    /// Opens a session and starts loading `target`, or the home document
    /// (`home_html`) when there is no target.
    pub fn open(handle: TabHandle, surface: S, target: Option<&str>, home_html: &str) -> Self {
        let mut session = Self {
            handle,
            surface,
            url: String::new(),
            title: String::new(),
            zoom: DEFAULT_ZOOM,
        };
        match target {
            Some(url) => session.navigate(url),
            None => session.load_home(home_html),
        }
        session
    }

    pub fn handle(&self) -> TabHandle {
        self.handle
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn navigate(&mut self, url: &str) {
        debug!("tab {}: navigate {}", self.handle, url);
        self.url = url.to_string();
        self.surface.navigate(url);
    }

    /// Shows the static home document instead of fetching anything.
    pub fn load_home(&mut self, home_html: &str) {
        debug!("tab {}: home", self.handle);
        self.url = HOME_URL.to_string();
        self.surface.load_html(home_html, HOME_URL);
    }

    pub fn back(&mut self) {
        self.surface.back();
    }

    pub fn forward(&mut self) {
        self.surface.forward();
    }

    pub fn reload(&mut self) {
        self.surface.reload();
    }

    /// Sets the zoom factor, clamped to [`MIN_ZOOM`]. There is no upper bound.
    /// Returns the factor actually applied.
    pub fn set_zoom(&mut self, factor: f64) -> f64 {
        let factor = if factor.is_finite() {
            // Repeated 0.1 steps drift; keep four decimals.
            ((factor * 10_000.0).round() / 10_000.0).max(MIN_ZOOM)
        } else {
            MIN_ZOOM
        };
        self.zoom = factor;
        self.surface.set_zoom(factor);
        factor
    }

    pub fn zoom_in(&mut self, step: f64) -> f64 {
        self.set_zoom(self.zoom + step)
    }

    pub fn zoom_out(&mut self, step: f64) -> f64 {
        self.set_zoom(self.zoom - step)
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.set_zoom(DEFAULT_ZOOM)
    }

    pub fn navigation_state(&self) -> NavigationState {
        NavigationState {
            can_go_back: self.surface.can_go_back(),
            can_go_forward: self.surface.can_go_forward(),
        }
    }

    /// Records what `event` changes about the page and returns it for
    /// re-emission. Progress above 100 is clamped.
    pub fn apply(&mut self, event: SurfaceEvent) -> SurfaceEvent {
        match event {
            SurfaceEvent::TitleChanged(title) => {
                self.title = title.clone();
                SurfaceEvent::TitleChanged(title)
            }
            SurfaceEvent::UrlChanged(url) => {
                self.url = url.clone();
                SurfaceEvent::UrlChanged(url)
            }
            SurfaceEvent::LoadStarted => {
                self.title.clear();
                SurfaceEvent::LoadStarted
            }
            SurfaceEvent::LoadProgress(p) => SurfaceEvent::LoadProgress(p.min(100)),
            SurfaceEvent::LoadFinished(ok) => {
                if self.title.is_empty() {
                    self.title = self.surface.current_title();
                }
                SurfaceEvent::LoadFinished(ok)
            }
        }
    }
}

impl<S: RenderingSurface> Drop for TabSession<S> {
    fn drop(&mut self) {
        debug!("tab {}: releasing surface", self.handle);
        self.surface.stop();
        self.surface.release();
    }
}
