//! Seams between the load pipeline and its collaborators.

use std::path::Path;

use super::errors::ExtractError;
use super::models::{CandidateObject, RawMapping, Schema};

/// Reads one layered source file.
///
/// Implementations must return an empty mapping when the file is missing or
/// unreadable, and must not touch the process environment.
pub trait SourceReader {
    fn read(&self, dir: &Path, file_name: &str) -> RawMapping;
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn read(&self, dir: &Path, file_name: &str) -> RawMapping {
        (**self).read(dir, file_name)
    }
}

/// A typed configuration object that can be loaded from layered sources.
///
/// # Example
///
/// ```
/// use envstack::domain::constraints::{IsInt, IsString};
/// use envstack::domain::errors::ExtractError;
/// use envstack::domain::models::{CandidateObject, FieldSpec, Schema};
/// use envstack::domain::ports::EnvConfig;
/// use envstack::services::coercion;
///
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl EnvConfig for Server {
///     fn schema() -> Schema {
///         Schema::new()
///             .field(FieldSpec::new("HOST").constraint(IsString))
///             .field(
///                 FieldSpec::new("PORT")
///                     .coerce(coercion::parse_int_default())
///                     .constraint(IsInt),
///             )
///     }
///
///     fn from_candidate(candidate: &CandidateObject) -> Result<Self, ExtractError> {
///         Ok(Self {
///             host: candidate.extract("HOST")?,
///             port: candidate.extract("PORT")?,
///         })
///     }
/// }
/// ```
pub trait EnvConfig: Sized {
    /// Field declarations, in the order they are bound and validated.
    fn schema() -> Schema;

    /// Build the typed object from a candidate that passed validation.
    fn from_candidate(candidate: &CandidateObject) -> Result<Self, ExtractError>;
}
