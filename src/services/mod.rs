//! Load pipeline stages.
//!
//! Each stage is a pure function over domain types:
//! merge -> bind (with coercions) -> validate -> aggregate.

pub mod aggregator;
pub mod binder;
pub mod coercion;
pub mod merge;
pub mod validator;

pub use aggregator::aggregate;
pub use binder::{bind, bind_field};
pub use merge::merge;
pub use validator::{validate, validate_fields};
