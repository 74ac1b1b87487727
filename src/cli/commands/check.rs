//! Implementation of the `envstack check` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::application::EnvLoader;
use crate::cli::output::{list_table, output, truncate, CommandOutput};
use crate::domain::errors::{ConfigurationError, LoadError};
use crate::domain::models::{inspect, CandidateObject};
use crate::infrastructure::redact::{SecretMasker, MASK};
use crate::infrastructure::schema_file::load_schema;

/// Widest value printed in the human table.
const MAX_VALUE_WIDTH: usize = 60;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory holding .env.default, .env and .env.local
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// YAML schema describing the expected fields
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Print secret-looking values instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Debug, Serialize)]
pub struct FieldRow {
    pub field: String,
    pub value: String,
    pub defined: bool,
    pub masked: bool,
}

#[derive(Debug, Serialize)]
pub struct ViolationRow {
    pub field: String,
    pub constraint: String,
    pub message: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub dir: PathBuf,
    pub fields: Vec<FieldRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub violations: Vec<ViolationRow>,
}

impl CheckOutput {
    fn passed(dir: &Path, candidate: &CandidateObject, masker: Option<&SecretMasker>) -> Self {
        let fields = candidate
            .fields()
            .iter()
            .map(|bound| {
                let rendered = inspect(bound.value.as_ref());
                let masked = match (masker, bound.value.as_ref()) {
                    (Some(masker), Some(value)) => {
                        masker.is_secret(&bound.name, value.as_str().unwrap_or(&rendered))
                    }
                    _ => false,
                };
                FieldRow {
                    field: bound.name.clone(),
                    value: if masked { MASK.to_string() } else { rendered },
                    defined: bound.value.is_some(),
                    masked,
                }
            })
            .collect();

        Self {
            valid: true,
            dir: dir.to_path_buf(),
            fields,
            error: None,
            violations: Vec::new(),
        }
    }

    fn failed(dir: &Path, err: &ConfigurationError) -> Self {
        let violations = err
            .violations()
            .iter()
            .map(|v| ViolationRow {
                field: v.field.clone(),
                constraint: v.constraint.clone(),
                message: v.message.clone(),
                value: v.rendered_value(),
            })
            .collect();

        Self {
            valid: false,
            dir: dir.to_path_buf(),
            fields: Vec::new(),
            error: Some(err.to_string()),
            violations,
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        if let Some(ref error) = self.error {
            return format!("{} {}", style("\u{2717}").red().bold(), error);
        }

        let mut table = list_table(&["field", "value"]);
        for row in &self.fields {
            let value = if row.masked {
                style(row.value.clone()).dim().to_string()
            } else {
                truncate(&row.value, MAX_VALUE_WIDTH)
            };
            table.add_row(vec![row.field.clone(), value]);
        }

        format!(
            "{} {} is valid ({} field{})\n{}",
            style("\u{2713}").green().bold(),
            self.dir.display(),
            self.fields.len(),
            if self.fields.len() == 1 { "" } else { "s" },
            table
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run the check; `Ok(false)` means the directory loaded but failed validation.
pub fn execute(args: CheckArgs, loader: &EnvLoader, reveal: bool, json_mode: bool) -> Result<bool> {
    if !args.dir.is_dir() {
        bail!("{} is not a directory", args.dir.display());
    }

    let schema = load_schema(&args.schema)
        .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;

    let masker = (!(reveal || args.reveal)).then(SecretMasker::new);
    let report = match loader.load_candidate(&args.dir, &schema) {
        Ok(candidate) => CheckOutput::passed(&args.dir, &candidate, masker.as_ref()),
        Err(LoadError::Configuration(err)) => CheckOutput::failed(&args.dir, &err),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to load {}", args.dir.display()))
        }
    };

    output(&report, json_mode);
    Ok(report.valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CoercionPolicy;
    use crate::domain::models::{RawMapping, Value, Violation};
    use std::fs;
    use tempfile::TempDir;

    const SCHEMA: &str = "fields:
  - name: PORT
    coerce: [parse_int]
    constraints: [is_int, { min: 1 }]
  - name: DEBUG
    optional: true
    coerce: [parse_bool]
";

    fn workspace(env: &str) -> (TempDir, CheckArgs) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), env).unwrap();
        fs::write(dir.path().join("schema.yaml"), SCHEMA).unwrap();
        let args = CheckArgs {
            dir: dir.path().to_path_buf(),
            schema: dir.path().join("schema.yaml"),
            reveal: false,
        };
        (dir, args)
    }

    fn hermetic() -> EnvLoader {
        EnvLoader::new().with_environment(RawMapping::new())
    }

    fn candidate(pairs: &[(&str, Option<Value>)]) -> CandidateObject {
        let mut candidate = CandidateObject::new();
        for (name, value) in pairs {
            candidate.set(*name, value.clone());
        }
        candidate
    }

    #[test]
    fn test_passed_masks_secrets() {
        let candidate = candidate(&[
            ("PORT", Some(Value::Int(5000))),
            ("DB_PASSWORD", Some(Value::from("hunter2"))),
            ("API_KEY", None),
        ]);
        let masker = SecretMasker::new();

        let report = CheckOutput::passed(Path::new("cfg"), &candidate, Some(&masker));

        assert!(report.valid);
        assert_eq!(report.fields[0].value, "5000");
        assert_eq!(report.fields[1].value, MASK);
        assert!(report.fields[1].masked);
        assert_eq!(report.fields[2].value, "undefined");
        assert!(!report.fields[2].defined);
    }

    #[test]
    fn test_passed_reveal_keeps_values() {
        let candidate = candidate(&[("DB_PASSWORD", Some(Value::from("hunter2")))]);
        let report = CheckOutput::passed(Path::new("cfg"), &candidate, None);
        assert_eq!(report.fields[0].value, "'hunter2'");
    }

    #[test]
    fn test_failed_report_json() {
        let err = ConfigurationError::new(
            "Configuration error: PORT must be an integer number. Got value: NaN",
            vec![Violation::new(
                "PORT",
                "is_int",
                "PORT must be an integer number",
                Some(Value::Float(f64::NAN)),
            )],
        );

        let json = CheckOutput::failed(Path::new("cfg"), &err).to_json();

        assert_eq!(json["valid"], false);
        assert_eq!(json["violations"][0]["constraint"], "is_int");
        assert_eq!(json["violations"][0]["value"], "NaN");
        assert!(json["error"].as_str().unwrap().starts_with("Configuration error: "));
    }

    #[test]
    fn test_execute_valid_directory() {
        let (_dir, args) = workspace("PORT=5000\n");
        assert!(execute(args, &hermetic(), false, true).unwrap());
    }

    #[test]
    fn test_execute_reports_violations_as_false() {
        let (_dir, args) = workspace("PORT=0\n");
        assert!(!execute(args, &hermetic(), false, true).unwrap());
    }

    #[test]
    fn test_execute_coercion_failure_follows_policy() {
        let (_dir, args) = workspace("PORT=5000\nDEBUG=maybe\n");
        assert!(execute(args, &hermetic(), false, true).is_err());

        let (_dir, args) = workspace("PORT=5000\nDEBUG=maybe\n");
        let collecting = hermetic().with_coercion_policy(CoercionPolicy::Collect);
        assert!(!execute(args, &collecting, false, true).unwrap());
    }

    #[test]
    fn test_execute_rejects_missing_directory() {
        let (dir, mut args) = workspace("PORT=5000\n");
        args.dir = dir.path().join("nope");
        let err = execute(args, &hermetic(), false, true).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_execute_rejects_missing_schema() {
        let (dir, mut args) = workspace("PORT=5000\n");
        args.schema = dir.path().join("missing.yaml");
        let err = execute(args, &hermetic(), false, true).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load schema"));
    }
}
