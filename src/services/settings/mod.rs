// Settings service module
// TOML persistence for grid settings

pub mod service;

pub use service::{SettingsService, SETTINGS_FILE};
