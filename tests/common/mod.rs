//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use envstack::domain::models::RawMapping;
use envstack::EnvLoader;
use tempfile::TempDir;

/// Directory holding `.env.default`, `.env` and `.env.local` samples
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/config-samples")
}

/// Path of the sample YAML schema
pub fn fixture_schema() -> PathBuf {
    fixtures_dir().join("schema.yaml")
}

/// Loader that ignores the live process environment
pub fn hermetic_loader() -> EnvLoader {
    EnvLoader::new().with_environment(RawMapping::new())
}

/// Create a temporary directory containing the given files
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn env_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("Failed to write env file");
    }
    dir
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
