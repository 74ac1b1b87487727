//! Domain layer: values, field declarations, constraints, and errors.
//!
//! Nothing here performs I/O.

pub mod constraints;
pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CoercionError, ConfigurationError, ExtractError, LoadError, LoadResult};
