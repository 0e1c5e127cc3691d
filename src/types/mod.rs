// Shared type definitions for the tab shell.
// Each submodule defines types used across the application.

pub mod action;
pub mod errors;
pub mod navigation;
pub mod settings;
pub mod tab;
