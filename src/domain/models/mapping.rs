use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lowest-precedence file, usually committed with project defaults.
pub const DEFAULT_FILE: &str = ".env.default";
/// Primary settings file.
pub const PRIMARY_FILE: &str = ".env";
/// Machine-local overrides, usually not committed.
pub const LOCAL_FILE: &str = ".env.local";

/// Key/value pairs read from one source, before any merging.
pub type RawMapping = BTreeMap<String, String>;

/// A source contributing values, ordered lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// `.env.default`
    Default,
    /// `.env`
    Primary,
    /// `.env.local`
    Local,
    /// Live process environment
    Environment,
}

impl Layer {
    /// File-backed layers, lowest precedence first.
    pub const FILES: [Self; 3] = [Self::Default, Self::Primary, Self::Local];

    /// Conventional file name for this layer, `None` for the environment.
    pub const fn file_name(self) -> Option<&'static str> {
        match self {
            Self::Default => Some(DEFAULT_FILE),
            Self::Primary => Some(PRIMARY_FILE),
            Self::Local => Some(LOCAL_FILE),
            Self::Environment => None,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Primary => write!(f, "primary"),
            Self::Local => write!(f, "local"),
            Self::Environment => write!(f, "environment"),
        }
    }
}

/// Result of combining every layer under precedence.
///
/// Alongside each value it remembers which layer supplied it, so callers can
/// explain where a setting came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedMapping {
    values: RawMapping,
    origins: BTreeMap<String, Layer>,
}

impl MergedMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any value from a lower layer.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>, layer: Layer) {
        let key = key.into();
        self.origins.insert(key.clone(), layer);
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Layer that supplied the current value of `key`.
    pub fn origin(&self, key: &str) -> Option<Layer> {
        self.origins.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Entries in key order with their origin.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Layer)> {
        self.values.iter().map(|(key, value)| {
            let layer = self.origins.get(key).copied().unwrap_or(Layer::Default);
            (key.as_str(), value.as_str(), layer)
        })
    }
}
