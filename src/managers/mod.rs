// Tabshell state managers
// Managers own per-window state: tab sessions, the tab registry, load progress and the address bar.

pub mod address_bar;
pub mod load_progress;
pub mod shortcut_manager;
pub mod tab_registry;
pub mod tab_session;
