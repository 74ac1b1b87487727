//! Implementation of the `envstack show` command.

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::application::EnvLoader;
use crate::cli::output::{list_table, output, truncate, CommandOutput};
use crate::domain::models::{Layer, MergedMapping};
use crate::infrastructure::redact::SecretMasker;

/// Widest value printed in the human table.
const MAX_VALUE_WIDTH: usize = 60;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Directory holding .env.default, .env and .env.local
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Only show these keys (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Print secret-looking values instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub key: String,
    pub value: String,
    pub layer: Layer,
    pub source: String,
    pub masked: bool,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub dir: PathBuf,
    pub entries: Vec<EntryRow>,
    /// Requested keys that no layer supplies
    pub missing: Vec<String>,
}

impl ShowOutput {
    fn new(dir: &Path, merged: &MergedMapping, keys: &[String], masker: Option<&SecretMasker>) -> Self {
        let wanted = |key: &str| keys.is_empty() || keys.iter().any(|k| k == key);

        let entries = merged
            .iter()
            .filter(|(key, _, _)| wanted(*key))
            .map(|(key, value, layer)| {
                let masked = masker.is_some_and(|m| m.is_secret(key, value));
                EntryRow {
                    key: key.to_string(),
                    value: masker.map_or(value, |m| m.mask(key, value)).to_string(),
                    layer,
                    source: layer.file_name().unwrap_or("environment").to_string(),
                    masked,
                }
            })
            .collect();

        let missing = keys
            .iter()
            .filter(|k| !merged.contains_key(k))
            .cloned()
            .collect();

        Self {
            dir: dir.to_path_buf(),
            entries,
            missing,
        }
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        if self.entries.is_empty() {
            lines.push("No values found.".to_string());
        } else {
            let mut table = list_table(&["key", "value", "source"]);
            for entry in &self.entries {
                let value = if entry.masked {
                    style(entry.value.clone()).dim().to_string()
                } else {
                    truncate(&entry.value, MAX_VALUE_WIDTH)
                };
                table.add_row(vec![entry.key.clone(), value, entry.source.clone()]);
            }
            lines.push(format!(
                "{} value{} in {}:",
                style(self.entries.len()).bold(),
                if self.entries.len() == 1 { "" } else { "s" },
                self.dir.display()
            ));
            lines.push(table.to_string());
        }

        if !self.missing.is_empty() {
            lines.push(format!(
                "\n{} {}",
                style("Not set:").yellow(),
                self.missing.join(", ")
            ));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: ShowArgs, loader: &EnvLoader, reveal: bool, json_mode: bool) -> Result<()> {
    if !args.dir.is_dir() {
        bail!("{} is not a directory", args.dir.display());
    }

    let merged = loader.merged(&args.dir);
    let masker = (!(reveal || args.reveal)).then(SecretMasker::new);

    output(
        &ShowOutput::new(&args.dir, &merged, &args.keys, masker.as_ref()),
        json_mode,
    );
    Ok(())
}
