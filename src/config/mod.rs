// ABOUTME: Configuration types and parsing for rollguard.yml.
// ABOUTME: Built-in defaults for the video-analytics service, overridable from YAML.

mod deserialize;
mod environment;
mod health;

pub use environment::EnvironmentConfig;
pub use health::{HealthConfig, MIN_HEALTH_TIMEOUT};

use crate::error::{Error, Result};
use crate::types::{DeploymentTarget, ImageRef, ParseImageRefError};
use deserialize::deserialize_environments;
use nonempty::{NonEmpty, nonempty};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "rollguard.yml";
pub const CONFIG_FILENAME_ALT: &str = "rollguard.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".rollguard/config.yml";

/// Everything the orchestrator needs to know about the service and its clusters.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_registry")]
    pub registry: String,

    #[serde(default = "default_repository")]
    pub repository: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_deployment")]
    pub deployment: String,

    /// Container to update; defaults to the deployment name.
    #[serde(default)]
    pub container: Option<String>,

    /// Pod label selector; defaults to `app=<deployment>`.
    #[serde(default)]
    pub selector: Option<String>,

    #[serde(
        default = "default_environments",
        deserialize_with = "deserialize_environments"
    )]
    pub environments: NonEmpty<EnvironmentConfig>,

    #[serde(default)]
    pub health: HealthConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Control-plane binaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_kubectl")]
    pub kubectl: String,
    #[serde(default = "default_aws")]
    pub aws: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            kubectl: default_kubectl(),
            aws: default_aws(),
        }
    }
}

fn default_kubectl() -> String {
    "kubectl".to_string()
}

fn default_aws() -> String {
    "aws".to_string()
}

fn default_registry() -> String {
    "123456789012.dkr.ecr.us-east-1.amazonaws.com".to_string()
}

fn default_repository() -> String {
    "video-processor".to_string()
}

fn default_namespace() -> String {
    "video-analytics".to_string()
}

fn default_deployment() -> String {
    "video-processor".to_string()
}

fn default_environments() -> NonEmpty<EnvironmentConfig> {
    nonempty![
        EnvironmentConfig::new("staging", "vlt-staging", &environment::default_region()),
        EnvironmentConfig::new("production", "vlt-prod", &environment::default_region())
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registry: default_registry(),
            repository: default_repository(),
            namespace: default_namespace(),
            deployment: default_deployment(),
            container: None,
            selector: None,
            environments: default_environments(),
            health: HealthConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ConfigNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like [`Config::discover`], falling back to the built-in defaults.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => {
                tracing::debug!("No configuration file found, using built-in defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("repository", &self.repository),
            ("namespace", &self.namespace),
            ("deployment", &self.deployment),
            ("tools.kubectl", &self.tools.kubectl),
            ("tools.aws", &self.tools.aws),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{} cannot be empty", field)));
            }
        }

        let timeouts = [
            ("health.deploy_timeout", self.health.deploy_timeout),
            ("health.rollback_timeout", self.health.rollback_timeout),
        ];
        for (field, value) in timeouts {
            if value < MIN_HEALTH_TIMEOUT {
                return Err(Error::InvalidConfig(format!(
                    "{} must be at least 1s, got {}",
                    field,
                    humantime::format_duration(value)
                )));
            }
        }

        Ok(())
    }

    pub fn environment(&self, name: &str) -> Option<&EnvironmentConfig> {
        self.environments.iter().find(|e| e.name == name)
    }

    /// Names of all configured environments, in configuration order.
    pub fn environment_names(&self) -> Vec<String> {
        self.environments.iter().map(|e| e.name.clone()).collect()
    }

    pub fn target(&self) -> DeploymentTarget {
        let mut target = DeploymentTarget::new(&self.namespace, &self.deployment);
        if let Some(container) = &self.container {
            target.container = container.clone();
        }
        if let Some(selector) = &self.selector {
            target.selector = selector.clone();
        }
        target
    }

    /// Full image reference for a caller-supplied tag.
    pub fn image(&self, tag: &str) -> std::result::Result<ImageRef, ParseImageRefError> {
        ImageRef::new(&self.registry, &self.repository, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_describe_video_processor() {
        let config = Config::default();
        assert_eq!(config.namespace, "video-analytics");
        assert_eq!(config.deployment, "video-processor");
        assert_eq!(config.environment_names(), vec!["staging", "production"]);
        assert_eq!(config.environment("production").unwrap().cluster, "vlt-prod");
        assert_eq!(config.health.deploy_timeout, Duration::from_secs(300));
        assert_eq!(config.health.rollback_timeout, Duration::from_secs(120));
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn target_honours_overrides() {
        let mut config = Config::default();
        config.container = Some("worker".to_string());
        config.selector = Some("tier=video".to_string());

        let target = config.target();
        assert_eq!(target.container, "worker");
        assert_eq!(target.selector, "tier=video");
        assert_eq!(target.deployment, "video-processor");
    }

    #[test]
    fn image_uses_registry_and_repository() {
        let image = Config::default().image("abc123").unwrap();
        assert_eq!(
            image.to_string(),
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/video-processor:abc123"
        );
    }

    #[test]
    fn unknown_environment_is_none() {
        assert!(Config::default().environment("stg").is_none());
    }
}
