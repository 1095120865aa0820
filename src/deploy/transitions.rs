// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::time::Duration;

use crate::exec::Executor;
use crate::health::{HealthFailure, HealthVerifier};
use crate::kubectl::{AuditNote, Kubectl};

use super::Deployment;
use super::deployment::DeployReport;
use super::error::DeployError;
use super::state::{Annotated, Bound, ImageUpdated, Verified};

/// Result type for transitions that hand the deployment back on failure,
/// so the caller can compensate.
pub type TransitionResult<T, S> = Result<Deployment<T>, (Deployment<S>, HealthFailure)>;

impl<S> Deployment<S> {
    fn transition<T>(self, state: T) -> Deployment<T> {
        Deployment {
            context: self.context,
            image: self.image,
            state,
        }
    }
}

// =============================================================================
// Bound -> ImageUpdated
// =============================================================================

impl Deployment<Bound> {
    /// Point the deployment's container at the new image.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Execution` if the mutation command fails.
    #[must_use = "deployment state must be used"]
    pub async fn set_image(
        self,
        executor: &Executor<'_>,
        kubectl: &Kubectl,
    ) -> Result<Deployment<ImageUpdated>, DeployError> {
        executor.run(&kubectl.set_image(&self.image)).await?;
        Ok(self.transition(ImageUpdated))
    }
}

// =============================================================================
// ImageUpdated -> Annotated
// =============================================================================

impl Deployment<ImageUpdated> {
    /// Record who deployed which tag.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Execution` if the annotation command fails.
    #[must_use = "deployment state must be used"]
    pub async fn annotate(
        self,
        executor: &Executor<'_>,
        kubectl: &Kubectl,
        note: &AuditNote,
    ) -> Result<Deployment<Annotated>, DeployError> {
        executor.run(&kubectl.annotate(note)).await?;
        Ok(self.transition(Annotated))
    }
}

// =============================================================================
// Annotated -> Verified
// =============================================================================

impl Deployment<Annotated> {
    /// Wait for the rollout and check replica health.
    ///
    /// # Errors
    ///
    /// Returns `(self, failure)` when the rollout is unhealthy, to allow
    /// a compensating rollback.
    #[must_use = "deployment state must be used"]
    pub async fn verify(
        self,
        verifier: &HealthVerifier<'_>,
        timeout: Duration,
    ) -> TransitionResult<Verified, Annotated> {
        let outcome = verifier.verify(&self.context.environment, timeout).await;
        match outcome.failure.clone() {
            None => Ok(self.transition(Verified { outcome })),
            Some(failure) => Err((self, failure)),
        }
    }

    /// End a dry-run: nothing was mutated, so there is nothing to verify.
    pub fn finish_dry_run(self) -> DeployReport {
        DeployReport {
            environment: self.context.environment,
            cluster: self.context.cluster,
            image: self.image.to_string(),
            dry_run: true,
            outcome: None,
        }
    }
}

// =============================================================================
// Verified - Terminal State
// =============================================================================

impl Deployment<Verified> {
    /// Consume the deployment and summarize it.
    pub fn finish(self) -> DeployReport {
        DeployReport {
            environment: self.context.environment,
            cluster: self.context.cluster,
            image: self.image.to_string(),
            dry_run: false,
            outcome: Some(self.state.outcome),
        }
    }
}
