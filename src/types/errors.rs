use thiserror::Error;

use super::tab::TabHandle;

// === SurfaceError ===

/// Errors reported by a rendering surface or its factory.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The engine could not create a new surface.
    #[error("Surface creation failed: {0}")]
    Creation(String),
    /// A command sent to a live surface was rejected by the engine.
    #[error("Surface command failed: {0}")]
    Command(String),
}

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// The handle does not refer to a live tab.
    #[error("Tab not found: {0}")]
    NotFound(TabHandle),
    /// The tab's rendering surface could not be created.
    #[error("Tab surface error: {0}")]
    Surface(#[from] SurfaceError),
}

// === SettingsError ===

/// Errors related to the settings engine.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// The settings file could not be (de)serialized.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
}

// === ShortcutError ===

/// Errors related to keyboard shortcut bindings.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// The shortcut keys are already bound to another action.
    #[error("Shortcut conflict: {0}")]
    Conflict(String),
    /// The provided key combination is invalid.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
}
