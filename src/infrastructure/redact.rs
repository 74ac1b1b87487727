//! Masking of secret-looking values in command output.

use regex::Regex;
use std::fmt;

/// Replacement shown instead of a masked value.
pub const MASK: &str = "[REDACTED]";

/// Decides which values are secrets, by key name or by value shape.
#[derive(Clone)]
pub struct SecretMasker {
    key_pattern: Regex,
    value_pattern: Regex,
}

impl SecretMasker {
    /// Create a masker with the built-in patterns.
    pub fn new() -> Self {
        Self {
            // Match keys such as DB_PASSWORD, API_KEY, GITHUB_TOKEN, CLIENT_SECRET
            key_pattern: Regex::new(
                r"(?i)(password|passwd|secret|token|api_?key|private_?key|credential)",
            )
            .expect("static key pattern is valid"),
            // Match provider keys (sk-...), bearer tokens and credentials in URLs
            value_pattern: Regex::new(r"(?i)(^sk-[a-z0-9_-]{16,}|^bearer\s+\S+|://[^/\s:@]+:[^/\s@]+@)")
                .expect("static value pattern is valid"),
        }
    }

    pub fn is_secret(&self, key: &str, value: &str) -> bool {
        !value.is_empty() && (self.key_pattern.is_match(key) || self.value_pattern.is_match(value))
    }

    /// `value` unchanged, or [`MASK`] if it looks secret.
    pub fn mask<'a>(&self, key: &str, value: &'a str) -> &'a str {
        if self.is_secret(key, value) {
            MASK
        } else {
            value
        }
    }
}

impl Default for SecretMasker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretMasker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretMasker").finish()
    }
}
