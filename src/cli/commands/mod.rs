//! CLI command implementations.

pub mod check;
pub mod show;

use crate::application::{CoercionPolicy, EnvLoader};
use crate::cli::Cli;
use crate::infrastructure::config::Settings;
use crate::infrastructure::source::EnvInjection;

/// Loader configured from the tool settings, with command-line flags taking precedence.
pub fn loader_for(cli: &Cli, settings: &Settings) -> EnvLoader {
    let policy = if cli.collect {
        CoercionPolicy::Collect
    } else {
        settings.coercion_policy
    };
    let injection = if cli.inject {
        EnvInjection::FillMissing
    } else {
        settings.injection
    };

    EnvLoader::new()
        .with_coercion_policy(policy)
        .with_injection(injection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_settings_apply_without_flags() {
        let cli = Cli::parse_from(["envstack", "show"]);
        let settings = Settings {
            coercion_policy: CoercionPolicy::Collect,
            injection: EnvInjection::FillMissing,
            ..Settings::default()
        };

        let loader = loader_for(&cli, &settings);

        assert_eq!(loader.coercion_policy(), CoercionPolicy::Collect);
        assert_eq!(loader.injection(), EnvInjection::FillMissing);
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from(["envstack", "--collect", "--inject", "show"]);
        let settings = Settings::default();

        let loader = loader_for(&cli, &settings);

        assert_eq!(loader.coercion_policy(), CoercionPolicy::Collect);
        assert_eq!(loader.injection(), EnvInjection::FillMissing);
    }

    #[test]
    fn test_defaults_without_flags_or_settings() {
        let cli = Cli::parse_from(["envstack", "show"]);

        let loader = loader_for(&cli, &Settings::default());

        assert_eq!(loader.coercion_policy(), CoercionPolicy::Abort);
        assert_eq!(loader.injection(), EnvInjection::Disabled);
    }
}
