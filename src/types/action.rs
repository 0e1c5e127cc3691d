use serde::{Deserialize, Serialize};

/// A toolbar, menu or keyboard action the user can trigger in a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellAction {
    Back,
    Forward,
    Reload,
    Home,
    NewTab,
    CloseTab,
    NewWindow,
    Quit,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleFullscreen,
    FocusAddressBar,
}

impl ShellAction {
    pub const ALL: [ShellAction; 13] = [
        ShellAction::Back,
        ShellAction::Forward,
        ShellAction::Reload,
        ShellAction::Home,
        ShellAction::NewTab,
        ShellAction::CloseTab,
        ShellAction::NewWindow,
        ShellAction::Quit,
        ShellAction::ZoomIn,
        ShellAction::ZoomOut,
        ShellAction::ZoomReset,
        ShellAction::ToggleFullscreen,
        ShellAction::FocusAddressBar,
    ];

    /// Name used as the key in the shortcut settings.
    pub fn name(self) -> &'static str {
        match self {
            ShellAction::Back => "back",
            ShellAction::Forward => "forward",
            ShellAction::Reload => "reload",
            ShellAction::Home => "home",
            ShellAction::NewTab => "new_tab",
            ShellAction::CloseTab => "close_tab",
            ShellAction::NewWindow => "new_window",
            ShellAction::Quit => "quit",
            ShellAction::ZoomIn => "zoom_in",
            ShellAction::ZoomOut => "zoom_out",
            ShellAction::ZoomReset => "zoom_reset",
            ShellAction::ToggleFullscreen => "fullscreen",
            ShellAction::FocusAddressBar => "address_bar",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// Request from a window's core to the shell hosting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowCommand {
    /// Close this window (its last tab was closed, or the user quit).
    CloseWindow,
    /// Open a new, independent window.
    SpawnWindow,
    /// Move keyboard focus to the address bar.
    FocusAddressBar,
    /// Enter fullscreen, or leave it if the window is already fullscreen.
    ToggleFullscreen,
}
