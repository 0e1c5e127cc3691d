//! Settings persistence.
//!
//! The whole [`ShellSettings`] lives in one JSON file, `settings.json` in the
//! platform config directory. Users edit that file by hand; the shell reads
//! it once at startup and only writes back the last window geometry on exit.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{ShellSettings, WindowGeometry};

/// File name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// What a shell needs from its settings store.
pub trait SettingsEngineTrait {
    /// Reads the file. A missing file yields the defaults.
    fn load(&mut self) -> Result<ShellSettings, SettingsError>;
    /// Writes the in-memory settings, creating the directory if needed.
    fn save(&self) -> Result<(), SettingsError>;
    /// Remembers where the last window was. Written on the next `save()`.
    fn set_window_geometry(&mut self, geometry: Option<WindowGeometry>);
    fn config_path(&self) -> &Path;
}

/// JSON file-backed settings.
#[derive(Debug)]
pub struct SettingsEngine {
    path: PathBuf,
    settings: ShellSettings,
}

impl SettingsEngine {
    /// Uses `path_override`, or `settings.json` in the platform config dir.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let path = path_override.unwrap_or_else(|| platform::get_config_dir().join(SETTINGS_FILE));
        Self {
            path,
            settings: ShellSettings::default(),
        }
    }

    /// Like [`load`](SettingsEngineTrait::load), but a damaged file only
    /// costs a warning: startup never fails on settings.
    pub fn load_or_default(&mut self) -> ShellSettings {
        self.load().unwrap_or_else(|e| {
            warn!("settings: {} ({}); using defaults", e, self.path.display());
            self.settings = ShellSettings::default();
            self.settings.clone()
        })
    }
}

impl SettingsEngineTrait for SettingsEngine {
    fn load(&mut self) -> Result<ShellSettings, SettingsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("settings: no file at {}", self.path.display());
                self.settings = ShellSettings::default();
                return Ok(self.settings.clone());
            }
            Err(e) => return Err(SettingsError::IoError(format!("read: {}", e))),
        };

        self.settings = serde_json::from_str(&text)
            .map_err(|e| SettingsError::SerializationError(format!("parse: {}", e)))?;
        info!("settings: loaded {}", self.path.display());
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| SettingsError::IoError(format!("create {}: {}", dir.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(format!("encode: {}", e)))?;
        fs::write(&self.path, json).map_err(|e| SettingsError::IoError(format!("write: {}", e)))?;
        debug!("settings: saved {}", self.path.display());
        Ok(())
    }

    fn set_window_geometry(&mut self, geometry: Option<WindowGeometry>) {
        self.settings.window.geometry = geometry;
    }

    fn config_path(&self) -> &Path {
        &self.path
    }
}
