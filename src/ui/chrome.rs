//! Messages between a window's chrome webview and the shell.
//!
//! The chrome posts JSON messages over wry IPC; the shell answers by
//! evaluating `window.__tabshell.update(state)` with a [`ChromeState`].

use serde::{Deserialize, Serialize};

use crate::app::BrowserWindow;
use crate::surface::SurfaceFactory;
use crate::types::tab::ProgressIndicator;

pub const CHROME_HTML: &str = include_str!("../../resources/ui/chrome.html");
pub const KEYS_JS: &str = include_str!("../../resources/ui/keys.js");

/// Height of the tab strip plus toolbar, in logical pixels.
pub const CHROME_HEIGHT: f64 = 76.0;

/// A message posted by the chrome, or by a page (only `Key` is honoured
/// from pages).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ChromeMessage {
    Ready,
    Submit { text: String },
    Edit { text: String },
    Action { name: String },
    Switch { index: usize },
    Close { index: usize },
    Key { keys: String },
}

impl ChromeMessage {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[derive(Debug, Serialize)]
struct ChromeTab {
    label: String,
    tooltip: String,
    active: bool,
}

/// Everything the chrome draws.
#[derive(Debug, Serialize)]
pub struct ChromeState {
    tabs: Vec<ChromeTab>,
    address: String,
    reset_address: bool,
    progress: ProgressIndicator,
    can_go_back: bool,
    can_go_forward: bool,
}

impl ChromeState {
    /// Snapshot of `window`. `reset_address` overwrites the address field
    /// even while the user is typing in it (after a tab switch or submit).
    pub fn of<F: SurfaceFactory>(window: &BrowserWindow<F>, reset_address: bool) -> Self {
        let nav = window.navigation_state();
        Self {
            tabs: window
                .summaries()
                .into_iter()
                .map(|t| ChromeTab {
                    label: t.label.text,
                    tooltip: t.label.tooltip,
                    active: t.active,
                })
                .collect(),
            address: window.address_bar().current_text().to_string(),
            reset_address,
            progress: window.address_bar().progress(),
            can_go_back: nav.can_go_back,
            can_go_forward: nav.can_go_forward,
        }
    }

    pub fn to_script(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "null".to_string());
        format!("window.__tabshell && window.__tabshell.update({})", json)
    }
}

/// Initialization script that makes pages forward bound shortcuts.
pub fn key_capture_script(bound: &[String]) -> String {
    let list = serde_json::to_string(bound).unwrap_or_else(|_| "[]".to_string());
    format!("window.__tabshellBound = {};\n{}", list, KEYS_JS)
}
