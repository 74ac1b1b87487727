//! Error aggregator: folds violations into one configuration error.

use crate::domain::errors::ConfigurationError;
use crate::domain::models::Violation;

/// Prefix of every aggregated message.
pub const MESSAGE_PREFIX: &str = "Configuration error: ";

/// Build the aggregated error, or `None` when there is nothing to report.
///
/// Message layout:
///
/// ```text
/// Configuration error: <msg>[; <msg>...]. Got value: <value>
/// <msg>[; <msg>...]. Got value: <value>
/// ```
///
/// One line per field, in the order fields first appear in `violations`.
pub fn aggregate(violations: Vec<Violation>) -> Option<ConfigurationError> {
    if violations.is_empty() {
        return None;
    }

    let message = format!("{MESSAGE_PREFIX}{}", render_groups(&violations));
    Some(ConfigurationError::new(message, violations))
}

fn render_groups(violations: &[Violation]) -> String {
    let mut groups: Vec<(&str, Vec<&Violation>)> = Vec::new();
    for violation in violations {
        match groups.iter_mut().find(|(field, _)| *field == violation.field) {
            Some((_, members)) => members.push(violation),
            None => groups.push((&violation.field, vec![violation])),
        }
    }

    groups
        .iter()
        .map(|(_, members)| {
            let messages = members
                .iter()
                .map(|v| v.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            format!("{messages}. Got value: {}", members[0].rendered_value())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
