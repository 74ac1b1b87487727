//! Dotenv-backed source reader and process environment access.

use std::path::Path;
use std::{env, fs, io};

use tracing::{debug, warn};

use crate::domain::models::RawMapping;
use crate::domain::ports::SourceReader;

/// Reads `KEY=VALUE` files with `dotenvy`.
///
/// Quoting, comments and `export` prefixes follow dotenvy's rules. Values are
/// taken literally: `$VAR` and `${VAR}` are never expanded, so a file reads
/// the same whatever the live environment holds. The process environment is
/// never modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvReader;

impl SourceReader for DotenvReader {
    fn read(&self, dir: &Path, file_name: &str) -> RawMapping {
        let path = dir.join(file_name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "source file absent, using empty layer");
                return RawMapping::new();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "source file unreadable, using empty layer");
                return RawMapping::new();
            }
        };

        let literal = escape_substitutions(content.strip_prefix('\u{feff}').unwrap_or(&content));
        let mut mapping = RawMapping::new();
        for item in dotenvy::from_read_iter(literal.as_bytes()) {
            match item {
                Ok((key, value)) => {
                    mapping.insert(key, value);
                }
                Err(dotenvy::Error::Io(err)) => {
                    warn!(path = %path.display(), error = %err, "stopped reading source file");
                    break;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping malformed line");
                }
            }
        }

        debug!(path = %path.display(), keys = mapping.len(), "read source file");
        mapping
    }
}

/// Line scanner state, tracking quotes the way dotenvy splits logical lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Plain,
    Escape,
    Whitespace,
    Weak,
    WeakEscape,
    Strong,
    StrongEscape,
}

/// Prefix every `$` that dotenvy would start a substitution at with `\`.
///
/// Single-quoted text, already escaped dollars and comments pass through
/// unchanged.
fn escape_substitutions(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut state = Scan::Plain;
    for line in content.split_inclusive('\n') {
        if state == Scan::Plain && line.trim_start().starts_with('#') {
            out.push_str(line);
            continue;
        }
        for (pos, c) in line.char_indices() {
            if state == Scan::Whitespace && c == '#' {
                out.push_str(&line[pos..]);
                state = Scan::Plain;
                break;
            }
            if c == '$' && matches!(state, Scan::Plain | Scan::Whitespace | Scan::Weak) {
                out.push('\\');
            }
            out.push(c);
            state = match (state, c) {
                (Scan::Escape, _) => Scan::Plain,
                (Scan::WeakEscape, _) => Scan::Weak,
                (Scan::StrongEscape, _) => Scan::Strong,
                (Scan::Weak, '\\') => Scan::WeakEscape,
                (Scan::Weak, '"') => Scan::Plain,
                (Scan::Weak, _) => Scan::Weak,
                (Scan::Strong, '\\') => Scan::StrongEscape,
                (Scan::Strong, '\'') => Scan::Plain,
                (Scan::Strong, _) => Scan::Strong,
                (Scan::Plain | Scan::Whitespace, '\\') => Scan::Escape,
                (Scan::Plain | Scan::Whitespace, '"') => Scan::Weak,
                (Scan::Plain | Scan::Whitespace, '\'') => Scan::Strong,
                (Scan::Plain, c) if c.is_whitespace() && c != '\n' && c != '\r' => {
                    Scan::Whitespace
                }
                (Scan::Plain | Scan::Whitespace, _) => Scan::Plain,
            };
        }
    }
    out
}

/// Whether loading writes file values into the process environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvInjection {
    /// Leave the process environment untouched.
    #[default]
    Disabled,
    /// Set every file key that is not already in the environment, the way
    /// dotenv loaders do. Local values are applied first, then primary, then
    /// default, so earlier layers win among the injected values.
    FillMissing,
}

/// Snapshot of the live process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn environment_snapshot() -> RawMapping {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Write each entry of `mapping` into the process environment unless the key
/// is already set. Returns how many variables were written.
pub fn inject_missing(mapping: &RawMapping) -> usize {
    let mut injected = 0;
    for (key, value) in mapping {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
            injected += 1;
        }
    }
    injected
}
