use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default base URL that search queries are appended to.
pub const DEFAULT_SEARCH_URL: &str = "https://duckduckgo.com/?q=";

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellSettings {
    pub general: GeneralSettings,
    pub view: ViewSettings,
    #[serde(default)]
    pub window: WindowSettings,
    pub shortcuts: HashMap<String, String>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            view: ViewSettings::default(),
            window: WindowSettings::default(),
            shortcuts: Self::default_shortcuts(),
        }
    }
}

impl ShellSettings {
    /// Returns the default keyboard shortcuts.
    pub fn default_shortcuts() -> HashMap<String, String> {
        let mut shortcuts = HashMap::new();
        shortcuts.insert("back".to_string(), "Alt+Left".to_string());
        shortcuts.insert("forward".to_string(), "Alt+Right".to_string());
        shortcuts.insert("reload".to_string(), "F5".to_string());
        shortcuts.insert("home".to_string(), "Alt+Home".to_string());
        shortcuts.insert("new_tab".to_string(), "Ctrl+T".to_string());
        shortcuts.insert("close_tab".to_string(), "Ctrl+W".to_string());
        shortcuts.insert("new_window".to_string(), "Ctrl+N".to_string());
        shortcuts.insert("quit".to_string(), "Ctrl+Q".to_string());
        shortcuts.insert("zoom_in".to_string(), "Ctrl+Plus".to_string());
        shortcuts.insert("zoom_out".to_string(), "Ctrl+Minus".to_string());
        shortcuts.insert("zoom_reset".to_string(), "Ctrl+0".to_string());
        shortcuts.insert("fullscreen".to_string(), "F11".to_string());
        shortcuts.insert("address_bar".to_string(), "Ctrl+L".to_string());
        shortcuts
    }
}

/// General shell settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Base URL for search queries; the encoded query is appended to it.
    pub search_url: String,
    /// Title of the built-in home document.
    pub home_title: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            home_title: "Tabshell".to_string(),
        }
    }
}

/// Page zoom settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewSettings {
    /// Amount added or removed by one zoom-in/zoom-out action.
    pub zoom_step: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { zoom_step: 0.1 }
    }
}

/// Window state persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WindowSettings {
    /// Last saved geometry; `None` means open maximized.
    pub geometry: Option<WindowGeometry>,
}

/// Position and size of a top-level window, in logical pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WindowGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub maximized: bool,
}
