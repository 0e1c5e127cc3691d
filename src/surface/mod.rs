//! The rendering-surface capability the shell is built on.
//!
//! A surface is one embedded engine instance showing one tab's content. The
//! shell only sends it commands; everything the engine does in response comes
//! back later as [`SurfaceEvent`]s, delivered on the event-loop thread and
//! tagged with the [`TabHandle`] the surface was created for.
//!
//! Commands are fire-and-forget. Engine failures never cross this boundary as
//! errors: a failed load is reported as `LoadFinished(false)`.

pub mod headless;
pub mod home;

use serde::{Deserialize, Serialize};

use crate::types::errors::SurfaceError;
use crate::types::tab::TabHandle;

/// Lifecycle signal emitted by a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    TitleChanged(String),
    UrlChanged(String),
    LoadStarted,
    /// Percent complete, 0 through 100.
    LoadProgress(u8),
    /// `true` when the page loaded successfully.
    LoadFinished(bool),
}

/// One engine instance, exclusively owned by a tab session.
pub trait RenderingSurface {
    fn navigate(&mut self, url: &str);
    /// Renders `html` in place of a network load, with `base_url` as its address.
    fn load_html(&mut self, html: &str, base_url: &str);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    /// Cancels any in-flight load.
    fn stop(&mut self);
    fn set_zoom(&mut self, factor: f64);
    fn current_title(&self) -> String;
    fn current_url(&self) -> String;

    fn can_go_back(&self) -> bool {
        true
    }

    fn can_go_forward(&self) -> bool {
        true
    }

    /// Frees the engine instance. Called exactly once, after `stop()`.
    fn release(&mut self);
}

/// Creates rendering surfaces for new tabs.
pub trait SurfaceFactory {
    type Surface: RenderingSurface;

    /// `handle` is the identity events from the new surface must carry.
    fn create_surface(&mut self, handle: TabHandle) -> Result<Self::Surface, SurfaceError>;
}
