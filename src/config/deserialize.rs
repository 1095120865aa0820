// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Enforces a non-empty environment list with unique names.

use std::collections::HashSet;

use nonempty::NonEmpty;
use serde::Deserialize;

use super::EnvironmentConfig;

pub fn deserialize_environments<'de, D>(
    deserializer: D,
) -> Result<NonEmpty<EnvironmentConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<EnvironmentConfig> = Vec::deserialize(deserializer)?;

    let mut seen = HashSet::new();
    for env in &values {
        if env.name.trim().is_empty() {
            return Err(serde::de::Error::custom("environment name cannot be empty"));
        }
        if env.cluster.trim().is_empty() {
            return Err(serde::de::Error::custom(format!(
                "environment '{}' has an empty cluster",
                env.name
            )));
        }
        if !seen.insert(env.name.as_str()) {
            return Err(serde::de::Error::custom(format!(
                "duplicate environment: {}",
                env.name
            )));
        }
    }

    NonEmpty::from_vec(values)
        .ok_or_else(|| serde::de::Error::custom("at least one environment is required"))
}
