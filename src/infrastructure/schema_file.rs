//! YAML schema descriptions.
//!
//! Lets the CLI validate a directory without compiling a Rust type:
//!
//! ```yaml
//! fields:
//!   - name: KAFKA_BROKERS
//!     coerce:
//!       - split: ","
//!     constraints:
//!       - each:
//!           contains: ":"
//!   - name: PORT
//!     coerce: [parse_int]
//!     constraints: [is_int, { min: 1 }, { max: 65535 }]
//!   - name: LOG_LEVEL
//!     optional: true
//!     constraints:
//!       - is_in: [debug, info, warn, error]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::constraints::{
    Constraint, Contains, Each, IsBoolean, IsDefined, IsIn, IsInt, IsNotEmpty, IsNumber, IsString,
    Matches, Max, MaxLength, Min, MinLength,
};
use crate::domain::models::{Coercion, FieldSpec, Schema, Value};
use crate::services::coercion;

/// Errors reading or interpreting a schema file.
#[derive(Debug, Error)]
pub enum SchemaFileError {
    #[error("Failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unsupported allowed value for {field}: {value}")]
    UnsupportedValue { field: String, value: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDoc {
    fields: Vec<FieldDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDecl {
    name: String,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    coerce: Vec<CoercionDecl>,
    #[serde(default)]
    constraints: Vec<ConstraintDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoercionDecl {
    Bare(BareCoercion),
    WithArg(CoercionWithArg),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BareCoercion {
    ParseInt,
    ParseFloat,
    ParseBool,
    Trim,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CoercionWithArg {
    Split(String),
    ParseInt(u32),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConstraintDecl {
    Bare(BareConstraint),
    WithArg(ConstraintWithArg),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BareConstraint {
    IsString,
    IsNotEmpty,
    IsDefined,
    IsInt,
    IsNumber,
    IsBoolean,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConstraintWithArg {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    IsIn(Vec<serde_yaml::Value>),
    Contains(String),
    Matches(String),
    Each(Box<ConstraintDecl>),
}

/// Read and build a schema from a YAML file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, SchemaFileError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SchemaFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&content)
}

/// Build a schema from a YAML document.
pub fn parse_schema(yaml: &str) -> Result<Schema, SchemaFileError> {
    let doc: SchemaDoc = serde_yaml::from_str(yaml)?;
    let mut schema = Schema::new();

    for decl in doc.fields {
        let mut spec = FieldSpec::new(decl.name.as_str());
        if decl.optional {
            spec = spec.optional();
        }
        for coercion in decl.coerce {
            spec = spec.coerce(build_coercion(coercion));
        }
        for constraint in decl.constraints {
            spec = spec.shared_constraint(build_constraint(&decl.name, constraint)?);
        }
        schema.push(spec);
    }

    Ok(schema)
}

fn build_coercion(decl: CoercionDecl) -> Coercion {
    match decl {
        CoercionDecl::Bare(BareCoercion::ParseInt) => coercion::parse_int_default(),
        CoercionDecl::Bare(BareCoercion::ParseFloat) => coercion::parse_float(),
        CoercionDecl::Bare(BareCoercion::ParseBool) => coercion::parse_bool(),
        CoercionDecl::Bare(BareCoercion::Trim) => coercion::trim(),
        CoercionDecl::WithArg(CoercionWithArg::Split(delimiter)) => coercion::split(delimiter),
        CoercionDecl::WithArg(CoercionWithArg::ParseInt(base)) => coercion::parse_int(base),
    }
}

fn build_constraint(field: &str, decl: ConstraintDecl) -> Result<Arc<dyn Constraint>, SchemaFileError> {
    let constraint: Arc<dyn Constraint> = match decl {
        ConstraintDecl::Bare(bare) => match bare {
            BareConstraint::IsString => Arc::new(IsString),
            BareConstraint::IsNotEmpty => Arc::new(IsNotEmpty),
            BareConstraint::IsDefined => Arc::new(IsDefined),
            BareConstraint::IsInt => Arc::new(IsInt),
            BareConstraint::IsNumber => Arc::new(IsNumber),
            BareConstraint::IsBoolean => Arc::new(IsBoolean),
        },
        ConstraintDecl::WithArg(with_arg) => match with_arg {
            ConstraintWithArg::MinLength(n) => Arc::new(MinLength(n)),
            ConstraintWithArg::MaxLength(n) => Arc::new(MaxLength(n)),
            ConstraintWithArg::Min(n) => Arc::new(Min(n)),
            ConstraintWithArg::Max(n) => Arc::new(Max(n)),
            ConstraintWithArg::IsIn(values) => Arc::new(IsIn(
                values
                    .iter()
                    .map(|v| yaml_to_value(field, v))
                    .collect::<Result<_, _>>()?,
            )),
            ConstraintWithArg::Contains(needle) => Arc::new(Contains(needle)),
            ConstraintWithArg::Matches(pattern) => {
                Arc::new(Matches::new(&pattern).map_err(|source| {
                    SchemaFileError::InvalidPattern {
                        field: field.to_string(),
                        source,
                    }
                })?)
            }
            ConstraintWithArg::Each(inner) => Arc::new(Each(build_constraint(field, *inner)?)),
        },
    };
    Ok(constraint)
}

fn yaml_to_value(field: &str, value: &serde_yaml::Value) -> Result<Value, SchemaFileError> {
    match value {
        serde_yaml::Value::String(s) => Ok(Value::Str(s.clone())),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .ok_or_else(|| SchemaFileError::UnsupportedValue {
                field: field.to_string(),
                value: n.to_string(),
            }),
        other => Err(SchemaFileError::UnsupportedValue {
            field: field.to_string(),
            value: format!("{other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
fields:
  - name: KAFKA_BROKERS
    coerce:
      - split: ","
    constraints:
      - each:
          contains: ":"
  - name: PORT
    coerce: [parse_int]
    constraints: [is_int, { min: 1 }, { max: 65535 }]
  - name: MASK
    coerce:
      - parse_int: 16
  - name: LOG_LEVEL
    optional: true
    constraints:
      - is_in: [debug, info]
      - matches: "^[a-z]+$"
"#;

    #[test]
    fn test_parse_sample_schema() {
        let schema = parse_schema(SAMPLE).unwrap();

        let names: Vec<&str> = schema.fields().iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["KAFKA_BROKERS", "PORT", "MASK", "LOG_LEVEL"]);

        let brokers = schema.get("KAFKA_BROKERS").unwrap();
        assert_eq!(brokers.coercions()[0].name(), "split(,)");
        assert_eq!(
            brokers.constraints()[0].message("KAFKA_BROKERS"),
            "each value in KAFKA_BROKERS must contain a : string"
        );

        let port = schema.get("PORT").unwrap();
        let constraint_names: Vec<&str> = port.constraints().iter().map(|c| c.name()).collect();
        assert_eq!(constraint_names, vec!["is_int", "min", "max"]);

        assert_eq!(schema.get("MASK").unwrap().coercions()[0].name(), "parse_int(16)");
        assert!(schema.get("LOG_LEVEL").unwrap().is_optional());
    }

    #[test]
    fn test_invalid_pattern_is_reported_with_field() {
        let yaml = "fields:\n  - name: ID\n    constraints:\n      - matches: \"([\"\n";
        let err = parse_schema(yaml).unwrap_err();
        assert!(matches!(err, SchemaFileError::InvalidPattern { ref field, .. } if field == "ID"));
    }

    #[test]
    fn test_unknown_constraint_is_rejected() {
        let yaml = "fields:\n  - name: ID\n    constraints: [is_uuid]\n";
        assert!(matches!(parse_schema(yaml), Err(SchemaFileError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_schema("/nonexistent/schema.yaml").unwrap_err();
        assert!(matches!(err, SchemaFileError::Io { .. }));
    }
}
