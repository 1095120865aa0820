// ABOUTME: Revision undo followed by health re-verification.
// ABOUTME: Shared by the rollback command and deploy compensation.

use std::time::Duration;

use crate::exec::Executor;
use crate::health::{HealthVerifier, RolloutOutcome};
use crate::kubectl::Kubectl;
use crate::types::RevisionRef;

use super::DeployError;

/// Undo the rollout to `revision`, then verify health within `timeout`.
///
/// The outcome is returned as-is; deciding what an unhealthy rollback means
/// is left to the caller. This never rolls back further.
///
/// # Errors
///
/// Returns `DeployError::Execution` if the undo command fails.
pub async fn undo_and_verify(
    executor: &Executor<'_>,
    kubectl: &Kubectl,
    verifier: &HealthVerifier<'_>,
    environment: &str,
    revision: RevisionRef,
    timeout: Duration,
) -> Result<RolloutOutcome, DeployError> {
    executor.run(&kubectl.rollout_undo(revision)).await?;
    Ok(verifier.verify(environment, timeout).await)
}
