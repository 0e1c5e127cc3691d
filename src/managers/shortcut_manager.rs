//! Shortcut Manager for Tabshell.
//!
//! Maps key combinations such as `Ctrl+T` to shell actions, with conflict
//! detection and platform-specific modifier key adaptation.

use std::collections::HashMap;

use log::warn;

use crate::types::action::ShellAction;
use crate::types::errors::ShortcutError;
use crate::types::settings::ShellSettings;

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: ShellAction, keys: &str) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: ShellAction) -> Option<&str>;
    fn resolve(&self, keys: &str) -> Option<ShellAction>;
    fn has_conflict(&self, keys: &str, exclude_action: Option<ShellAction>) -> Option<ShellAction>;
}

/// Shortcut table built from the shell settings.
#[derive(Debug, Clone)]
pub struct ShortcutManager {
    shortcuts: HashMap<ShellAction, String>,
}

impl ShortcutManager {
    /// Builds the table from `name -> keys` pairs. Unknown action names and
    /// conflicting bindings are skipped with a warning.
    pub fn from_bindings(bindings: &HashMap<String, String>) -> Self {
        let mut mgr = Self {
            shortcuts: HashMap::new(),
        };
        let mut names: Vec<&String> = bindings.keys().collect();
        names.sort();
        for name in names {
            let Some(action) = ShellAction::from_name(name) else {
                warn!("shortcuts: unknown action '{}'", name);
                continue;
            };
            if let Err(e) = mgr.register_shortcut(action, &bindings[name]) {
                warn!("shortcuts: {}", e);
            }
        }
        mgr
    }

    /// Every bound key combination, lowercased, for key capture in pages.
    pub fn bound_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .shortcuts
            .values()
            .map(|k| k.to_ascii_lowercase())
            .collect();
        keys.sort();
        keys
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }

    /// Normalises a key combination so `ctrl+t` and `Ctrl+T` compare equal.
    fn normalize(keys: &str) -> String {
        Self::adapt_for_platform(keys.trim()).to_ascii_lowercase()
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::from_bindings(&ShellSettings::default_shortcuts())
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: ShellAction, keys: &str) -> Result<(), ShortcutError> {
        if keys.trim().is_empty() {
            return Err(ShortcutError::InvalidKeys("Keys cannot be empty".to_string()));
        }

        if let Some(conflicting) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys,
                conflicting.name()
            )));
        }

        self.shortcuts.insert(action, Self::adapt_for_platform(keys.trim()));
        Ok(())
    }

    fn get_shortcut(&self, action: ShellAction) -> Option<&str> {
        self.shortcuts.get(&action).map(|s| s.as_str())
    }

    /// Action bound to `keys`, if any.
    fn resolve(&self, keys: &str) -> Option<ShellAction> {
        let wanted = Self::normalize(keys);
        self.shortcuts
            .iter()
            .find(|(_, bound)| bound.to_ascii_lowercase() == wanted)
            .map(|(action, _)| *action)
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<ShellAction>) -> Option<ShellAction> {
        let wanted = Self::normalize(keys);
        self.shortcuts
            .iter()
            .filter(|(action, _)| Some(**action) != exclude_action)
            .find(|(_, bound)| bound.to_ascii_lowercase() == wanted)
            .map(|(action, _)| *action)
    }
}
