// ABOUTME: Error types for deploy and rollback orchestration.
// ABOUTME: Covers command failures and unhealthy rollouts, with compensation results.

use std::fmt;

use serde::Serialize;

use crate::exec::ExecError;
use crate::health::HealthFailure;

/// What happened to the automatic rollback after a failed deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum CompensationStatus {
    /// Previous revision restored and healthy.
    Recovered,
    /// Previous revision restored but still unhealthy.
    Unhealthy { failure: HealthFailure },
    /// The rollback could not be carried out.
    Failed { message: String },
}

impl fmt::Display for CompensationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompensationStatus::Recovered => write!(f, "rolled back to the previous revision"),
            CompensationStatus::Unhealthy { failure } => write!(
                f,
                "rollback is also unhealthy ({}), manual intervention required",
                failure
            ),
            CompensationStatus::Failed { message } => write!(f, "rollback failed: {}", message),
        }
    }
}

/// Errors from deploy and rollback orchestration.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A control-plane command failed.
    #[error(transparent)]
    Execution(#[from] ExecError),

    /// The new image never became healthy; one rollback was attempted.
    #[error("[{environment}] deploy failed health check: {failure}; {rollback}")]
    HealthCheckFailed {
        environment: String,
        failure: HealthFailure,
        rollback: CompensationStatus,
    },

    /// A rollback left the deployment unhealthy.
    #[error(
        "[{environment}] rollback health check failed: {failure}; manual intervention required"
    )]
    RollbackUnhealthy {
        environment: String,
        failure: HealthFailure,
    },
}
