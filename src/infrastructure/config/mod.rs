//! Configuration for the envstack tool itself
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;
pub mod settings;

pub use loader::{SettingsError, SettingsLoader};
pub use settings::Settings;
