use serde::{Deserialize, Serialize};

use crate::application::CoercionPolicy;
use crate::infrastructure::logging::LogConfig;
use crate::infrastructure::source::EnvInjection;

/// Settings for the envstack command-line tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,

    /// What to do when a coercion rejects its input
    #[serde(default)]
    pub coercion_policy: CoercionPolicy,

    /// Whether file values are written into the process environment
    #[serde(default)]
    pub injection: EnvInjection,

    /// Print secret-looking values from `show` instead of masking them
    #[serde(default)]
    pub reveal_secrets: bool,
}
