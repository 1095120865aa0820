// ABOUTME: Two-phase rollout health verification under a single deadline.
// ABOUTME: Waits for rollout completion, then compares ready and desired replicas.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::exec::{ExecError, Executor};
use crate::kubectl::Kubectl;

/// Overall health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Healthy,
    Unhealthy,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Healthy => write!(f, "healthy"),
            Verdict::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// The check that produced an unhealthy verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthPhase {
    /// Waiting for the control plane to report the rollout finished.
    RolloutWait,
    /// Comparing ready replicas against desired replicas.
    ReplicaCount,
}

/// Replica field read during the replica-count phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicaField {
    Ready,
    Desired,
}

impl fmt::Display for ReplicaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplicaField::Ready => write!(f, "ready"),
            ReplicaField::Desired => write!(f, "desired"),
        }
    }
}

/// Why a rollout was judged unhealthy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum HealthFailure {
    #[error("rollout did not complete within {timeout_secs}s")]
    RolloutTimedOut { timeout_secs: u64 },

    #[error("rollout failed: {message}")]
    RolloutFailed { message: String },

    #[error("rollout completed but the {timeout_secs}s budget was spent before replicas could be checked")]
    DeadlineExceeded { timeout_secs: u64 },

    #[error("replica query failed: {message}")]
    ReplicaQueryFailed { message: String },

    #[error("{field} replica count is missing")]
    MissingReplicaCount { field: ReplicaField },

    #[error("{field} replica count is not an integer: {value:?}")]
    InvalidReplicaCount { field: ReplicaField, value: String },

    #[error("only {ready} of {desired} replicas ready")]
    InsufficientReplicas { ready: u32, desired: u32 },
}

impl HealthFailure {
    pub fn phase(&self) -> HealthPhase {
        match self {
            HealthFailure::RolloutTimedOut { .. } | HealthFailure::RolloutFailed { .. } => {
                HealthPhase::RolloutWait
            }
            HealthFailure::DeadlineExceeded { .. }
            | HealthFailure::ReplicaQueryFailed { .. }
            | HealthFailure::MissingReplicaCount { .. }
            | HealthFailure::InvalidReplicaCount { .. }
            | HealthFailure::InsufficientReplicas { .. } => HealthPhase::ReplicaCount,
        }
    }

    /// Whether the failure came from running out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            HealthFailure::RolloutTimedOut { .. } | HealthFailure::DeadlineExceeded { .. }
        )
    }
}

/// Result of one verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolloutOutcome {
    pub verdict: Verdict,
    pub ready: Option<u32>,
    pub desired: Option<u32>,
    pub failure: Option<HealthFailure>,
}

impl RolloutOutcome {
    pub fn healthy(ready: u32, desired: u32) -> Self {
        Self {
            verdict: Verdict::Healthy,
            ready: Some(ready),
            desired: Some(desired),
            failure: None,
        }
    }

    pub fn unhealthy(failure: HealthFailure) -> Self {
        Self {
            verdict: Verdict::Unhealthy,
            ready: None,
            desired: None,
            failure: Some(failure),
        }
    }

    fn with_counts(mut self, ready: Option<u32>, desired: Option<u32>) -> Self {
        self.ready = ready;
        self.desired = desired;
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.verdict == Verdict::Healthy
    }

    /// Phase that failed, if the verdict is unhealthy.
    pub fn failed_phase(&self) -> Option<HealthPhase> {
        self.failure.as_ref().map(HealthFailure::phase)
    }
}

/// Polls rollout completion and replica readiness for one deployment.
pub struct HealthVerifier<'a> {
    executor: Executor<'a>,
    kubectl: &'a Kubectl,
}

impl<'a> HealthVerifier<'a> {
    pub fn new(executor: Executor<'a>, kubectl: &'a Kubectl) -> Self {
        Self { executor, kubectl }
    }

    /// Verify the deployment's rollout within `timeout`.
    ///
    /// Never fails: every problem talking to the control plane becomes an
    /// unhealthy outcome.
    pub async fn verify(&self, environment: &str, timeout: Duration) -> RolloutOutcome {
        tracing::info!(
            environment,
            "[{}] Running health check (timeout: {}s)...",
            environment,
            timeout.as_secs()
        );
        let deadline = Instant::now() + timeout;

        let outcome = match self.wait_for_rollout(timeout, deadline).await {
            Err(failure) => RolloutOutcome::unhealthy(failure),
            Ok(()) if Instant::now() >= deadline => {
                RolloutOutcome::unhealthy(HealthFailure::DeadlineExceeded {
                    timeout_secs: timeout.as_secs(),
                })
            }
            Ok(()) => self.check_replicas(environment).await,
        };

        match &outcome.failure {
            None => tracing::info!(environment, "[{}] Health check PASSED", environment),
            Some(failure) => {
                match failure {
                    HealthFailure::RolloutTimedOut { timeout_secs } => tracing::error!(
                        environment,
                        "[{}] Rollout did not complete within {}s",
                        environment,
                        timeout_secs
                    ),
                    HealthFailure::DeadlineExceeded { .. } => tracing::error!(
                        environment,
                        "[{}] Rollout finished but the health check budget ran out",
                        environment
                    ),
                    other => tracing::error!(environment, "[{}] {}", environment, other),
                }
                tracing::error!(environment, "[{}] Health check FAILED", environment);
            }
        }

        outcome
    }

    async fn wait_for_rollout(
        &self,
        timeout: Duration,
        deadline: Instant,
    ) -> Result<(), HealthFailure> {
        let command = self.kubectl.rollout_status(timeout);
        match self.executor.run(&command).await {
            Ok(_) => Ok(()),
            Err(e) if is_timeout(&e) || Instant::now() >= deadline => {
                Err(HealthFailure::RolloutTimedOut {
                    timeout_secs: timeout.as_secs(),
                })
            }
            Err(e) => Err(HealthFailure::RolloutFailed {
                message: e.output(),
            }),
        }
    }

    async fn check_replicas(&self, environment: &str) -> RolloutOutcome {
        let ready = match self.executor.run(&self.kubectl.ready_replicas()).await {
            Ok(out) => out,
            Err(e) => return query_failed(e),
        };
        let desired = match self.executor.run(&self.kubectl.desired_replicas()).await {
            Ok(out) => out,
            Err(e) => return query_failed(e),
        };

        tracing::info!(
            environment,
            "[{}] Ready replicas: {}/{}",
            environment,
            ready,
            desired
        );

        evaluate_replicas(&ready, &desired)
    }
}

fn query_failed(err: ExecError) -> RolloutOutcome {
    RolloutOutcome::unhealthy(HealthFailure::ReplicaQueryFailed {
        message: err.to_string(),
    })
}

/// The control plane reports an expired `--timeout` as "timed out waiting".
fn is_timeout(err: &ExecError) -> bool {
    err.output().to_lowercase().contains("timed out")
}

/// Judge raw replica query output. Healthy only when ready >= desired.
pub fn evaluate_replicas(ready: &str, desired: &str) -> RolloutOutcome {
    let ready_count = match parse_count(ReplicaField::Ready, ready) {
        Ok(n) => n,
        Err(failure) => return RolloutOutcome::unhealthy(failure),
    };
    let desired_count = match parse_count(ReplicaField::Desired, desired) {
        Ok(n) => n,
        Err(failure) => {
            return RolloutOutcome::unhealthy(failure).with_counts(Some(ready_count), None);
        }
    };

    if ready_count >= desired_count {
        RolloutOutcome::healthy(ready_count, desired_count)
    } else {
        RolloutOutcome::unhealthy(HealthFailure::InsufficientReplicas {
            ready: ready_count,
            desired: desired_count,
        })
        .with_counts(Some(ready_count), Some(desired_count))
    }
}

fn parse_count(field: ReplicaField, raw: &str) -> Result<u32, HealthFailure> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(HealthFailure::MissingReplicaCount { field });
    }
    raw.parse().map_err(|_| HealthFailure::InvalidReplicaCount {
        field,
        value: raw.to_string(),
    })
}
