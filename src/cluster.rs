// ABOUTME: Resolves a logical environment name to its cluster and binds kubectl to it.
// ABOUTME: Unknown environments fail before any command is issued.

use serde::Serialize;

use crate::config::{Config, EnvironmentConfig};
use crate::error::{Error, Result};
use crate::exec::Executor;
use crate::kubectl;

/// The cluster an operation is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterContext {
    pub environment: String,
    pub cluster: String,
    pub region: String,
}

impl From<&EnvironmentConfig> for ClusterContext {
    fn from(env: &EnvironmentConfig) -> Self {
        Self {
            environment: env.name.clone(),
            cluster: env.cluster.clone(),
            region: env.region.clone(),
        }
    }
}

/// Look up an environment without touching the cluster.
pub fn resolve<'c>(config: &'c Config, environment: &str) -> Result<&'c EnvironmentConfig> {
    config.environment(environment).ok_or_else(|| {
        let valid = config.environment_names();
        tracing::error!(
            "Unknown environment '{}'. Valid: {}",
            environment,
            valid.join(", ")
        );
        Error::UnknownEnvironment {
            name: environment.to_string(),
            valid,
        }
    })
}

/// Resolve `environment` and point the local kubeconfig at its cluster.
///
/// Always runs live, also for dry-run operations: later reads need the
/// right context and the switch does not mutate the cluster.
pub async fn bind(
    config: &Config,
    executor: &Executor<'_>,
    environment: &str,
) -> Result<ClusterContext> {
    let env = resolve(config, environment)?;

    tracing::debug!(
        environment = %env.name,
        cluster = %env.cluster,
        region = %env.region,
        "Binding cluster context"
    );
    executor
        .run(&kubectl::update_kubeconfig(&config.tools.aws, env))
        .await?;

    Ok(ClusterContext::from(env))
}
