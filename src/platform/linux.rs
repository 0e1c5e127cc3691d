// Linux config location: $XDG_CONFIG_HOME/tabshell, else ~/.config/tabshell

use std::env;
use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    config_dir_from(env::var("XDG_CONFIG_HOME").ok(), env::var("HOME").ok())
}

fn config_dir_from(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    match xdg_config_home.filter(|xdg| !xdg.is_empty()) {
        Some(xdg) => PathBuf::from(xdg).join("tabshell"),
        None => PathBuf::from(home.unwrap_or_else(|| String::from("/tmp")))
            .join(".config")
            .join("tabshell"),
    }
}
