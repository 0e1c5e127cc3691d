//! Tabshell: a minimal multi-tab browser shell over an embedded web engine.
//!
//! The crate owns tab lifecycle, address-bar classification and per-tab load
//! progress; the engine itself sits behind the [`surface::RenderingSurface`]
//! trait. This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod surface;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
