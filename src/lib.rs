//! Envstack - layered dotenv configuration with aggregated validation
//!
//! Envstack reads `.env.default`, `.env` and `.env.local` from a directory,
//! overlays the process environment, coerces the raw strings into typed values,
//! runs every declared constraint, and reports all violations in one error.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Values, field declarations, constraints and errors
//! - **Service Layer** (`services`): Merge, coercion, binding, validation, aggregation
//! - **Application Layer** (`application`): The load pipeline
//! - **Infrastructure Layer** (`infrastructure`): Dotenv files, schema files, settings, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use envstack::domain::constraints::{Contains, Each, IsNotEmpty};
//! use envstack::domain::models::{FieldSpec, Schema};
//! use envstack::services::coercion;
//! use envstack::EnvLoader;
//!
//! let schema = Schema::new()
//!     .field(FieldSpec::new("DATABASE_URL").constraint(IsNotEmpty))
//!     .field(
//!         FieldSpec::new("KAFKA_BROKERS")
//!             .coerce(coercion::split(","))
//!             .constraint(Each::new(Contains(":".to_string()))),
//!     );
//!
//! match EnvLoader::new().load_candidate("./config", &schema) {
//!     Ok(config) => println!("brokers: {:?}", config.get("KAFKA_BROKERS")),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{check, load_config, CoercionPolicy, EnvLoader};
pub use domain::errors::{CoercionError, ConfigurationError, ExtractError, LoadError, LoadResult};
pub use domain::models::{CandidateObject, FieldSpec, Schema, Value};
pub use domain::ports::{EnvConfig, SourceReader};
pub use infrastructure::config::{Settings, SettingsError, SettingsLoader};
pub use infrastructure::source::{DotenvReader, EnvInjection};
