// Tabshell services
// Stateless or persistence-facing functionality: address classification and settings.

pub mod navigation_classifier;
pub mod settings_engine;
