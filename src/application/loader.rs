//! The load pipeline.
//!
//! Reads the three layered files from a directory, overlays an environment
//! snapshot, binds the result onto a schema, validates it, and either returns
//! the candidate or one aggregated error.

use serde::{Deserialize, Serialize};
use std::iter;
use std::path::Path;
use tracing::{debug, info, info_span, warn};

use crate::domain::errors::{ConfigurationError, LoadResult};
use crate::domain::models::{
    CandidateObject, MergedMapping, RawMapping, Schema, Value, Violation, DEFAULT_FILE, LOCAL_FILE,
    PRIMARY_FILE,
};
use crate::domain::ports::{EnvConfig, SourceReader};
use crate::infrastructure::source::{environment_snapshot, inject_missing, DotenvReader, EnvInjection};
use crate::services::{aggregate, bind, bind_field, merge, validate, validate_fields};

/// What happens when a coercion rejects its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// The first failing coercion ends the load with a `LoadError::Coercion`.
    #[default]
    Abort,
    /// A failing coercion becomes a violation and that field's constraints are
    /// skipped; the raw string stays in the candidate.
    Collect,
}

/// Contents of the three file-backed layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layers {
    pub default: RawMapping,
    pub primary: RawMapping,
    pub local: RawMapping,
}

/// Configurable load pipeline.
///
/// ```no_run
/// use envstack::application::EnvLoader;
/// use envstack::domain::constraints::IsNotEmpty;
/// use envstack::domain::models::{FieldSpec, Schema};
///
/// let schema = Schema::new().field(FieldSpec::new("DATABASE_URL").constraint(IsNotEmpty));
/// let config = EnvLoader::new().load_candidate("./config", &schema)?;
/// println!("{:?}", config.get("DATABASE_URL"));
/// # Ok::<(), envstack::domain::LoadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnvLoader<R = DotenvReader> {
    reader: R,
    environment: Option<RawMapping>,
    injection: EnvInjection,
    coercion_policy: CoercionPolicy,
}

impl EnvLoader<DotenvReader> {
    pub const fn new() -> Self {
        Self {
            reader: DotenvReader,
            environment: None,
            injection: EnvInjection::Disabled,
            coercion_policy: CoercionPolicy::Abort,
        }
    }
}

impl Default for EnvLoader<DotenvReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SourceReader> EnvLoader<R> {
    /// Replace the file reader.
    pub fn with_reader<S: SourceReader>(self, reader: S) -> EnvLoader<S> {
        EnvLoader {
            reader,
            environment: self.environment,
            injection: self.injection,
            coercion_policy: self.coercion_policy,
        }
    }

    /// Use a fixed environment instead of the live process environment.
    #[must_use]
    pub fn with_environment(mut self, environment: RawMapping) -> Self {
        self.environment = Some(environment);
        self
    }

    #[must_use]
    pub fn with_injection(mut self, injection: EnvInjection) -> Self {
        self.injection = injection;
        self
    }

    #[must_use]
    pub fn with_coercion_policy(mut self, policy: CoercionPolicy) -> Self {
        self.coercion_policy = policy;
        self
    }

    pub const fn injection(&self) -> EnvInjection {
        self.injection
    }

    pub const fn coercion_policy(&self) -> CoercionPolicy {
        self.coercion_policy
    }

    /// Read the three files. With injection enabled each layer is written to
    /// the process environment right after it is read, local first.
    pub fn read_layers(&self, dir: &Path) -> Layers {
        let local = self.reader.read(dir, LOCAL_FILE);
        self.inject(&local);
        let primary = self.reader.read(dir, PRIMARY_FILE);
        self.inject(&primary);
        let default = self.reader.read(dir, DEFAULT_FILE);
        self.inject(&default);

        Layers {
            default,
            primary,
            local,
        }
    }

    /// Merged mapping for `dir`, with the environment as it stands after any
    /// injection.
    pub fn merged(&self, dir: impl AsRef<Path>) -> MergedMapping {
        let layers = self.read_layers(dir.as_ref());
        match &self.environment {
            Some(environment) => merge(&layers.default, &layers.primary, &layers.local, environment),
            None => merge(
                &layers.default,
                &layers.primary,
                &layers.local,
                &environment_snapshot(),
            ),
        }
    }

    /// Load and validate `schema` from `dir`, returning the bound candidate.
    pub fn load_candidate(&self, dir: impl AsRef<Path>, schema: &Schema) -> LoadResult<CandidateObject> {
        let dir = dir.as_ref();
        let span = info_span!("load_config", dir = %dir.display());
        let _enter = span.enter();

        let merged = self.merged(dir);
        let (candidate, violations) = match self.coercion_policy {
            CoercionPolicy::Abort => {
                let candidate = bind(&merged, schema)?;
                let violations = validate(&candidate, schema);
                (candidate, violations)
            }
            CoercionPolicy::Collect => bind_collecting(&merged, schema),
        };

        if let Some(err) = aggregate(violations) {
            warn!(
                violations = err.violations().len(),
                fields = ?err.fields(),
                "configuration rejected"
            );
            return Err(err.into());
        }

        info!(fields = schema.len(), "configuration loaded");
        Ok(candidate)
    }

    /// Load a typed configuration object.
    pub fn load<T: EnvConfig>(&self, dir: impl AsRef<Path>) -> LoadResult<T> {
        let candidate = self.load_candidate(dir, &T::schema())?;
        Ok(T::from_candidate(&candidate)?)
    }

    fn inject(&self, mapping: &RawMapping) {
        if self.injection == EnvInjection::FillMissing {
            let injected = inject_missing(mapping);
            debug!(injected, "injected file values into process environment");
        }
    }
}

/// Bind field by field, turning coercion failures into violations.
fn bind_collecting(merged: &MergedMapping, schema: &Schema) -> (CandidateObject, Vec<Violation>) {
    let mut candidate = CandidateObject::new();
    let mut violations = Vec::new();

    for spec in schema.fields() {
        match bind_field(merged, spec) {
            Ok(value) => {
                candidate.set(spec.name(), value);
                violations.extend(validate_fields(&candidate, iter::once(spec)));
            }
            Err(err) => {
                let raw = merged.get(spec.name()).map(Value::from);
                violations.push(Violation::new(
                    spec.name(),
                    "coercion",
                    format!(
                        "{} could not be coerced by {}: {}",
                        spec.name(),
                        err.coercion,
                        err.reason
                    ),
                    raw.clone(),
                ));
                candidate.set(spec.name(), raw);
            }
        }
    }

    (candidate, violations)
}

/// Validate a candidate without loading it, e.g. one assembled by hand.
pub fn check(candidate: &CandidateObject, schema: &Schema) -> Result<(), ConfigurationError> {
    aggregate(validate(candidate, schema)).map_or(Ok(()), Err)
}

/// Load `T` from `dir` with default settings: dotenv files, live environment,
/// no injection, coercion failures abort.
pub fn load_config<T: EnvConfig>(dir: impl AsRef<Path>) -> LoadResult<T> {
    EnvLoader::new().load(dir)
}
