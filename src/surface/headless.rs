//! A surface that renders nothing.
//!
//! `HeadlessSurface` keeps the navigation history and zoom an engine would
//! keep and logs every command it receives. It never emits events on its
//! own; whoever drives it (the console demo, the tests) feeds
//! [`SurfaceEvent`](super::SurfaceEvent)s to the window explicitly.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use super::{RenderingSurface, SurfaceFactory};
use crate::types::errors::SurfaceError;
use crate::types::tab::TabHandle;

/// A command received by a headless surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Navigate(String),
    LoadHtml { base_url: String },
    Back,
    Forward,
    Reload,
    Stop,
    SetZoom(f64),
    Release,
}

/// Counters shared between a factory and every surface it created.
#[derive(Debug, Default)]
pub struct SurfaceStats {
    pub created: usize,
    pub released: usize,
    /// Commands per surface, in creation order.
    pub commands: Vec<(TabHandle, Vec<SurfaceCommand>)>,
}

impl SurfaceStats {
    /// Surfaces created and not yet released.
    pub fn live(&self) -> usize {
        self.created - self.released
    }

    /// All commands sent to the surface created for `handle`.
    pub fn commands_for(&self, handle: TabHandle) -> &[SurfaceCommand] {
        self.commands
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, cmds)| cmds.as_slice())
            .unwrap_or(&[])
    }
}

/// Factory for [`HeadlessSurface`]s.
#[derive(Debug, Default)]
pub struct HeadlessFactory {
    stats: Rc<RefCell<SurfaceStats>>,
    fail_next: bool,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of what this factory's surfaces have done.
    pub fn stats(&self) -> Rc<RefCell<SurfaceStats>> {
        Rc::clone(&self.stats)
    }

    /// Makes the next `create_surface` call fail, as an engine out of
    /// resources would.
    pub fn fail_next_creation(&mut self) {
        self.fail_next = true;
    }
}

impl SurfaceFactory for HeadlessFactory {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, handle: TabHandle) -> Result<HeadlessSurface, SurfaceError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(SurfaceError::Creation(format!(
                "headless engine refused surface for tab {}",
                handle
            )));
        }
        {
            let mut stats = self.stats.borrow_mut();
            stats.created += 1;
            stats.commands.push((handle, Vec::new()));
        }
        Ok(HeadlessSurface {
            handle,
            stats: Rc::clone(&self.stats),
            history: Vec::new(),
            position: 0,
            title: String::new(),
            zoom: 1.0,
        })
    }
}

/// A rendering surface with history and zoom but no engine behind it.
#[derive(Debug)]
pub struct HeadlessSurface {
    handle: TabHandle,
    stats: Rc<RefCell<SurfaceStats>>,
    history: Vec<String>,
    position: usize,
    title: String,
    zoom: f64,
}

impl HeadlessSurface {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the title the engine would report for the current page.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn record(&self, command: SurfaceCommand) {
        trace!("headless {}: {:?}", self.handle, command);
        let mut stats = self.stats.borrow_mut();
        if let Some((_, cmds)) = stats.commands.iter_mut().find(|(h, _)| *h == self.handle) {
            cmds.push(command);
        }
    }

    fn push_history(&mut self, url: &str) {
        if !self.history.is_empty() {
            self.history.truncate(self.position + 1);
        }
        self.history.push(url.to_string());
        self.position = self.history.len() - 1;
        self.title.clear();
    }
}

impl RenderingSurface for HeadlessSurface {
    fn navigate(&mut self, url: &str) {
        self.record(SurfaceCommand::Navigate(url.to_string()));
        self.push_history(url);
    }

    fn load_html(&mut self, _html: &str, base_url: &str) {
        self.record(SurfaceCommand::LoadHtml {
            base_url: base_url.to_string(),
        });
        self.push_history(base_url);
    }

    fn back(&mut self) {
        self.record(SurfaceCommand::Back);
        if self.can_go_back() {
            self.position -= 1;
        }
    }

    fn forward(&mut self) {
        self.record(SurfaceCommand::Forward);
        if self.can_go_forward() {
            self.position += 1;
        }
    }

    fn reload(&mut self) {
        self.record(SurfaceCommand::Reload);
    }

    fn stop(&mut self) {
        self.record(SurfaceCommand::Stop);
    }

    fn set_zoom(&mut self, factor: f64) {
        self.record(SurfaceCommand::SetZoom(factor));
        self.zoom = factor;
    }

    fn current_title(&self) -> String {
        self.title.clone()
    }

    fn current_url(&self) -> String {
        self.history.get(self.position).cloned().unwrap_or_default()
    }

    fn can_go_back(&self) -> bool {
        self.position > 0
    }

    fn can_go_forward(&self) -> bool {
        self.position + 1 < self.history.len()
    }

    fn release(&mut self) {
        self.record(SurfaceCommand::Release);
        self.stats.borrow_mut().released += 1;
    }
}
