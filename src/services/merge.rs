//! Merge engine: combines layered sources under fixed precedence.

use tracing::debug;

use crate::domain::models::{Layer, MergedMapping, RawMapping};

/// Combine the three file layers and an environment snapshot.
///
/// Precedence (lowest to highest):
/// 1. `default`
/// 2. `primary`
/// 3. `local`
/// 4. `environment`, but only for keys some file already defines
///
/// Keys that only exist in the environment are not pulled in. The function is
/// pure: the environment is whatever snapshot the caller passes.
pub fn merge(
    default: &RawMapping,
    primary: &RawMapping,
    local: &RawMapping,
    environment: &RawMapping,
) -> MergedMapping {
    let mut merged = MergedMapping::new();

    for (layer, mapping) in Layer::FILES.into_iter().zip([default, primary, local]) {
        for (key, value) in mapping {
            merged.insert(key.as_str(), value.as_str(), layer);
        }
    }

    let overridden: Vec<(String, String)> = merged
        .keys()
        .filter_map(|key| environment.get(key).map(|value| (key.to_string(), value.clone())))
        .collect();
    let env_overrides = overridden.len();
    for (key, value) in overridden {
        merged.insert(key, value, Layer::Environment);
    }

    debug!(
        default = default.len(),
        primary = primary.len(),
        local = local.len(),
        env_overrides,
        merged = merged.len(),
        "merged configuration layers"
    );

    merged
}
