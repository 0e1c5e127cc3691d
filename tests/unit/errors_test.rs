use tabshell::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use tabshell::surface::headless::{HeadlessFactory, HeadlessSurface};
use tabshell::types::errors::*;
use tabshell::types::tab::TabHandle;

/// Handles are only minted by a registry; this one's tab is already gone.
fn stale_handle() -> TabHandle {
    let mut factory = HeadlessFactory::new();
    let mut registry: TabRegistry<HeadlessSurface> = TabRegistry::new("home");
    registry.create_tab(&mut factory, None, true).unwrap();
    let second = registry.create_tab(&mut factory, None, false).unwrap();
    registry.close_tab(second);
    second
}

// === TabError Tests ===

#[test]
fn tab_error_not_found_display() {
    let handle = stale_handle();
    let err = TabError::NotFound(handle);
    assert_eq!(err.to_string(), format!("Tab not found: {}", handle));
    assert_eq!(err.to_string(), "Tab not found: 1v0");
}

#[test]
fn tab_error_wraps_surface_error() {
    let err: TabError = SurfaceError::Creation("out of memory".to_string()).into();
    assert_eq!(
        err.to_string(),
        "Tab surface error: Surface creation failed: out of memory"
    );
}

#[test]
fn tab_error_exposes_surface_source() {
    use std::error::Error;
    let err = TabError::from(SurfaceError::Command("rejected".to_string()));
    assert!(err.source().is_some());
    assert!(TabError::NotFound(stale_handle()).source().is_none());
}

// === SurfaceError Tests ===

#[test]
fn surface_error_creation_display() {
    let err = SurfaceError::Creation("no GPU".to_string());
    assert_eq!(err.to_string(), "Surface creation failed: no GPU");
}

#[test]
fn surface_error_command_display() {
    let err = SurfaceError::Command("navigation refused".to_string());
    assert_eq!(err.to_string(), "Surface command failed: navigation refused");
}

// === SettingsError Tests ===

#[test]
fn settings_error_io_display() {
    let err = SettingsError::IoError("disk full".to_string());
    assert_eq!(err.to_string(), "Settings I/O error: disk full");
}

#[test]
fn settings_error_serialization_display() {
    let err = SettingsError::SerializationError("bad json".to_string());
    assert_eq!(err.to_string(), "Settings serialization error: bad json");
}

// === ShortcutError Tests ===

#[test]
fn shortcut_error_conflict_display() {
    let err = ShortcutError::Conflict("Ctrl+T".to_string());
    assert_eq!(err.to_string(), "Shortcut conflict: Ctrl+T");
}

#[test]
fn shortcut_error_invalid_keys_display() {
    let err = ShortcutError::InvalidKeys("".to_string());
    assert_eq!(err.to_string(), "Invalid shortcut keys: ");
}

#[test]
fn errors_implement_error_trait() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(SurfaceError::Creation("x".to_string())),
        Box::new(SettingsError::IoError("x".to_string())),
        Box::new(ShortcutError::Conflict("x".to_string())),
    ];
    for err in errors {
        assert!(!err.to_string().is_empty());
    }
}
