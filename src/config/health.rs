// ABOUTME: Health verification deadlines for deploy and rollback.
// ABOUTME: Durations parse from humantime strings such as "90s" or "5m".

use serde::Deserialize;
use std::time::Duration;

/// Shortest budget the rollout wait can honour; the control plane counts
/// its timeout in whole seconds and treats zero as "wait forever".
pub const MIN_HEALTH_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_deploy_timeout", with = "humantime_serde")]
    pub deploy_timeout: Duration,

    #[serde(default = "default_rollback_timeout", with = "humantime_serde")]
    pub rollback_timeout: Duration,
}

fn default_deploy_timeout() -> Duration {
    Duration::from_secs(300)
}

fn default_rollback_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            deploy_timeout: default_deploy_timeout(),
            rollback_timeout: default_rollback_timeout(),
        }
    }
}
