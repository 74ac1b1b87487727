//! Infrastructure layer module
//!
//! This module contains the adapters that touch the outside world:
//! - Dotenv file reading and process environment access
//! - YAML schema files
//! - Settings for the command-line tool
//! - Logging infrastructure
//! - Secret masking for printed values
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod redact;
pub mod schema_file;
pub mod source;
