use log::{debug, info, warn};

use crate::managers::tab_session::TabSession;
use crate::surface::{RenderingSurface, SurfaceFactory};
use crate::types::errors::TabError;
use crate::types::tab::{LabelHint, TabHandle, TabLabel};

/// What happened when a tab close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab was removed. `activated` is the tab that became active
    /// because the closed one was active.
    Closed { activated: Option<TabHandle> },
    /// It was the only tab: the window should close instead.
    WindowCloseRequested,
    /// The handle no longer refers to an open tab. Nothing happened.
    Stale,
}

/// Trait defining the tab registry interface.
pub trait TabRegistryTrait {
    type Surface: RenderingSurface;

    fn create_tab<F>(
        &mut self,
        factory: &mut F,
        target: Option<&str>,
        make_active: bool,
    ) -> Result<TabHandle, TabError>
    where
        F: SurfaceFactory<Surface = Self::Surface>;
    fn close_tab(&mut self, handle: TabHandle) -> CloseOutcome;
    fn set_active(&mut self, handle: TabHandle) -> Result<(), TabError>;
    fn active_handle(&self) -> Option<TabHandle>;
    fn active_session(&self) -> Option<&TabSession<Self::Surface>>;
    fn active_session_mut(&mut self) -> Option<&mut TabSession<Self::Surface>>;
    fn get(&self, handle: TabHandle) -> Option<&TabSession<Self::Surface>>;
    fn get_mut(&mut self, handle: TabHandle) -> Option<&mut TabSession<Self::Surface>>;
    fn contains(&self, handle: TabHandle) -> bool;
    fn handles(&self) -> &[TabHandle];
    fn tab_count(&self) -> usize;
}

struct TabEntry<S: RenderingSurface> {
    session: TabSession<S>,
    label: TabLabel,
}

struct TabSlot<S: RenderingSurface> {
    generation: u32,
    entry: Option<TabEntry<S>>,
}

/// Owner of every open tab in one window.
///
/// Tabs live in a generational slot arena so that handles of closed tabs go
/// stale instead of dangling; `order` holds the display order.
pub struct TabRegistry<S: RenderingSurface> {
    slots: Vec<TabSlot<S>>,
    free: Vec<usize>,
    order: Vec<TabHandle>,
    active: Option<TabHandle>,
    home_html: String,
}

impl<S: RenderingSurface> TabRegistry<S> {
    /// `home_html` is the document shown by tabs opened without a target.
    pub fn new(home_html: impl Into<String>) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            active: None,
            home_html: home_html.into(),
        }
    }

    pub fn home_html(&self) -> &str {
        &self.home_html
    }

    /// Position of the tab in display order.
    pub fn index_of(&self, handle: TabHandle) -> Option<usize> {
        self.order.iter().position(|h| *h == handle)
    }

    pub fn label(&self, handle: TabHandle) -> Option<&TabLabel> {
        self.entry(handle).map(|e| &e.label)
    }

    pub fn set_label(&mut self, handle: TabHandle, label: TabLabel) {
        if let Some(entry) = self.entry_mut(handle) {
            entry.label = label;
        }
    }

    /// Applies a label change requested by the load tracker.
    pub fn apply_label_hint(&mut self, handle: TabHandle, hint: LabelHint) {
        let label = match hint {
            LabelHint::Loading => TabLabel::loading(),
            LabelHint::Untitled => TabLabel::untitled(),
        };
        self.set_label(handle, label);
    }

    /// Shows `title` on the tab. Empty titles leave the label as it is.
    pub fn set_title_label(&mut self, handle: TabHandle, title: &str) {
        if !title.is_empty() {
            self.set_label(handle, TabLabel::from_title(title));
        }
    }

    /// Releases every tab. Only for when the window itself is closing.
    pub fn close_all(&mut self) -> usize {
        let count = self.order.len();
        for handle in std::mem::take(&mut self.order) {
            self.vacate(handle);
        }
        self.active = None;
        info!("registry: released {} tab(s) on window close", count);
        count
    }

    fn allocate(&mut self) -> TabHandle {
        if let Some(index) = self.free.pop() {
            TabHandle::new(index as u32, self.slots[index].generation)
        } else {
            self.slots.push(TabSlot {
                generation: 0,
                entry: None,
            });
            TabHandle::new((self.slots.len() - 1) as u32, 0)
        }
    }

    fn entry(&self, handle: TabHandle) -> Option<&TabEntry<S>> {
        self.slots
            .get(handle.slot_index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry_mut(&mut self, handle: TabHandle) -> Option<&mut TabEntry<S>> {
        self.slots
            .get_mut(handle.slot_index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.entry.as_mut())
    }

    /// Empties the slot and bumps its generation; dropping the entry
    /// stops and releases the surface.
    fn vacate(&mut self, handle: TabHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.slot_index()) else {
            return false;
        };
        if slot.generation != handle.generation() {
            return false;
        }
        let Some(entry) = slot.entry.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.slot_index());
        drop(entry);
        true
    }
}

impl<S: RenderingSurface> TabRegistryTrait for TabRegistry<S> {
    type Surface = S;

    /// Opens a tab at the end of the tab strip.
    ///
    /// Without a target the tab shows the home document. The first tab of a
    /// window is always made active.
    fn create_tab<F>(
        &mut self,
        factory: &mut F,
        target: Option<&str>,
        make_active: bool,
    ) -> Result<TabHandle, TabError>
    where
        F: SurfaceFactory<Surface = S>,
    {
        let handle = self.allocate();
        let surface = match factory.create_surface(handle) {
            Ok(surface) => surface,
            Err(e) => {
                self.free.push(handle.slot_index());
                warn!("registry: could not create surface for {}: {}", handle, e);
                return Err(e.into());
            }
        };

        let session = TabSession::open(handle, surface, target, &self.home_html);
        self.slots[handle.slot_index()].entry = Some(TabEntry {
            session,
            label: TabLabel::loading(),
        });
        self.order.push(handle);

        if make_active || self.active.is_none() {
            self.active = Some(handle);
        }
        debug!(
            "registry: opened {} ({} tab(s), active {:?})",
            handle,
            self.order.len(),
            self.active
        );
        Ok(handle)
    }

    /// Closes a tab, releasing its surface.
    ///
    /// The last tab is never removed; the window is asked to close instead.
    /// If the closed tab was active, the tab to its left becomes active, or
    /// the new first tab when there is none.
    fn close_tab(&mut self, handle: TabHandle) -> CloseOutcome {
        let Some(order_idx) = self.index_of(handle) else {
            debug!("registry: close of stale tab {} ignored", handle);
            return CloseOutcome::Stale;
        };

        if self.order.len() <= 1 {
            info!("registry: last tab {} closing, requesting window close", handle);
            return CloseOutcome::WindowCloseRequested;
        }

        let was_active = self.active == Some(handle);
        self.order.remove(order_idx);
        let vacated = self.vacate(handle);
        debug_assert!(vacated, "ordered handle {} had no live slot", handle);
        debug_assert!(!self.order.is_empty(), "registry emptied while window open");

        let activated = if was_active {
            let next = self.order[order_idx.saturating_sub(1)];
            self.active = Some(next);
            Some(next)
        } else {
            None
        };

        debug!(
            "registry: closed {} ({} tab(s) left, active {:?})",
            handle,
            self.order.len(),
            self.active
        );
        CloseOutcome::Closed { activated }
    }

    fn set_active(&mut self, handle: TabHandle) -> Result<(), TabError> {
        if !self.contains(handle) {
            return Err(TabError::NotFound(handle));
        }
        self.active = Some(handle);
        Ok(())
    }

    fn active_handle(&self) -> Option<TabHandle> {
        self.active
    }

    fn active_session(&self) -> Option<&TabSession<S>> {
        self.active.and_then(|h| self.get(h))
    }

    fn active_session_mut(&mut self) -> Option<&mut TabSession<S>> {
        let active = self.active?;
        self.get_mut(active)
    }

    fn get(&self, handle: TabHandle) -> Option<&TabSession<S>> {
        self.entry(handle).map(|e| &e.session)
    }

    fn get_mut(&mut self, handle: TabHandle) -> Option<&mut TabSession<S>> {
        self.entry_mut(handle).map(|e| &mut e.session)
    }

    fn contains(&self, handle: TabHandle) -> bool {
        self.entry(handle).is_some()
    }

    /// Open tabs in display order.
    fn handles(&self) -> &[TabHandle] {
        &self.order
    }

    fn tab_count(&self) -> usize {
        self.order.len()
    }
}
