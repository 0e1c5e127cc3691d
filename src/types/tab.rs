use std::fmt;

use serde::{Deserialize, Serialize};

/// Label shown on a tab while its page is loading.
pub const LOADING_LABEL: &str = "Loading...";

/// Label shown on a tab whose page has no title.
pub const NEW_TAB_LABEL: &str = "New Tab";

/// Maximum number of characters of a title shown on the tab itself.
pub const MAX_LABEL_CHARS: usize = 20;

/// Opaque identity of a tab.
///
/// A handle is a slot index plus the generation of that slot at the time the
/// tab was created. Once the tab closes the slot's generation moves on, so an
/// old handle never resolves again even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabHandle {
    index: u32,
    generation: u32,
}

impl TabHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn slot_index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TabHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// UI-facing load state of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    Idle,
    /// Percent complete, 0 through 100.
    Loading(u8),
    Done,
    Failed,
}

impl LoadState {
    pub fn is_loading(self) -> bool {
        matches!(self, LoadState::Loading(_))
    }
}

/// Text and tooltip displayed on a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabLabel {
    pub text: String,
    pub tooltip: String,
}

impl TabLabel {
    /// Label for a tab that is still loading.
    pub fn loading() -> Self {
        Self {
            text: LOADING_LABEL.to_string(),
            tooltip: String::new(),
        }
    }

    /// Label for a tab that finished loading without a title.
    pub fn untitled() -> Self {
        Self {
            text: NEW_TAB_LABEL.to_string(),
            tooltip: String::new(),
        }
    }

    /// Builds a label from a page title, truncating long titles.
    /// The tooltip always carries the full title.
    pub fn from_title(title: &str) -> Self {
        let text = if title.chars().count() > MAX_LABEL_CHARS {
            let short: String = title.chars().take(MAX_LABEL_CHARS).collect();
            format!("{}...", short)
        } else {
            title.to_string()
        };
        Self {
            text,
            tooltip: title.to_string(),
        }
    }
}

/// Change to a tab's label requested by the load tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelHint {
    /// Show the loading placeholder.
    Loading,
    /// The page finished without a title; show the "new tab" placeholder.
    Untitled,
}

/// Progress indicator next to the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressIndicator {
    pub visible: bool,
    pub value: u8,
}

impl ProgressIndicator {
    /// Indicator contents for a given load state.
    pub fn for_state(state: LoadState) -> Self {
        match state {
            LoadState::Loading(p) => Self {
                visible: true,
                value: p,
            },
            LoadState::Done => Self {
                visible: false,
                value: 100,
            },
            LoadState::Idle | LoadState::Failed => Self::default(),
        }
    }
}

/// Whether the toolbar's back/forward buttons should be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Serializable view of one tab, used by the chrome to draw the tab strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSummary {
    pub handle: TabHandle,
    pub label: TabLabel,
    pub url: String,
    pub state: LoadState,
    pub zoom: f64,
    pub active: bool,
}
