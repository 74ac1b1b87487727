//! Application layer: the end-to-end load use case.

pub mod loader;

pub use loader::{check, load_config, CoercionPolicy, EnvLoader, Layers};
