//! Error types surfaced by a load call.

use thiserror::Error;

use super::models::Violation;

/// Every constraint violation found in one load call, rendered as a single
/// operator-facing message.
///
/// The message format is stable: consumers match on substrings of it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ConfigurationError {
    message: String,
    violations: Vec<Violation>,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            message: message.into(),
            violations,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Names of the fields that failed, in the order they were reported.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for violation in &self.violations {
            if !fields.contains(&violation.field.as_str()) {
                fields.push(&violation.field);
            }
        }
        fields
    }
}

/// A coercion rejected its input.
///
/// Aborts the load unless the loader collects coercion failures as violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to coerce {field} with {coercion}: {reason}")]
pub struct CoercionError {
    pub field: String,
    pub coercion: String,
    pub reason: String,
}

impl CoercionError {
    /// Error raised inside a coercion; the binder attaches the field name.
    pub fn new(coercion: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: String::new(),
            coercion: coercion.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

/// Reading a typed value out of a validated candidate failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{field} is not set")]
    Missing { field: String },

    #[error("{field} holds {found}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: String,
    },
}

/// Failure of a load call.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("Typed extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

pub type LoadResult<T> = Result<T, LoadError>;
