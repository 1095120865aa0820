// ABOUTME: Environment entry mapping a symbolic name to a cluster and region.
// ABOUTME: Parsed from the `environments` list in rollguard.yml.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvironmentConfig {
    pub name: String,
    pub cluster: String,
    #[serde(default = "default_region")]
    pub region: String,
}

pub(crate) fn default_region() -> String {
    "us-east-1".to_string()
}

impl EnvironmentConfig {
    pub fn new(name: &str, cluster: &str, region: &str) -> Self {
        Self {
            name: name.to_string(),
            cluster: cluster.to_string(),
            region: region.to_string(),
        }
    }
}
