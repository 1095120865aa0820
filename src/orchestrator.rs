// ABOUTME: Top-level deploy, rollback, and status flows for one environment.
// ABOUTME: A failed deploy triggers exactly one automatic rollback to the previous revision.

use std::time::Duration;

use crate::cluster;
use crate::config::Config;
use crate::deploy::{
    self, CompensationStatus, DeployError, DeployReport, Deployment, RollbackReport,
};
use crate::error::{Error, Result};
use crate::exec::{CommandRunner, ExecMode, Executor};
use crate::health::HealthVerifier;
use crate::kubectl::{AuditNote, Kubectl};
use crate::status::{self, StatusReport};
use crate::types::RevisionRef;

/// Knobs for a single deploy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployOptions {
    pub mode: ExecMode,
    /// Overrides `health.deploy_timeout`.
    pub health_timeout: Option<Duration>,
}

/// Knobs for a single rollback.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollbackOptions {
    pub revision: RevisionRef,
    /// Overrides `health.rollback_timeout`.
    pub health_timeout: Option<Duration>,
}

pub struct Orchestrator<'a> {
    config: &'a Config,
    executor: Executor<'a>,
    kubectl: Kubectl,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self {
            config,
            executor: Executor::new(runner),
            kubectl: Kubectl::from_config(config),
        }
    }

    fn verifier(&self) -> HealthVerifier<'_> {
        HealthVerifier::new(self.executor, &self.kubectl)
    }

    /// Roll `image_tag` out to `environment` and verify it.
    ///
    /// In dry-run mode the mutating commands are only logged and health
    /// verification is skipped. When verification fails, one rollback to
    /// the previous revision is attempted before the failure is returned.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownEnvironment` or `Error::InvalidImage` before any command runs
    /// - `Error::Execution` when binding the cluster fails
    /// - `Error::Deploy` when a mutation fails or the rollout is unhealthy
    pub async fn deploy(
        &self,
        environment: &str,
        image_tag: &str,
        options: DeployOptions,
    ) -> Result<DeployReport> {
        tracing::info!(
            environment,
            "[{}] Starting deploy (image-tag: {}, dry-run: {})",
            environment,
            image_tag,
            options.mode.is_dry_run()
        );

        cluster::resolve(self.config, environment)?;
        let image = self.config.image(image_tag)?;
        let context = cluster::bind(self.config, &self.executor, environment).await?;

        let note = AuditNote::now(image.tag());
        let mutator = self.executor.with_mode(options.mode);
        let deployment = Deployment::new(context, image)
            .set_image(&mutator, &self.kubectl)
            .await?
            .annotate(&mutator, &self.kubectl, &note)
            .await?;

        if options.mode.is_dry_run() {
            tracing::info!(
                environment,
                "[{}] Dry-run complete, no changes applied",
                environment
            );
            return Ok(deployment.finish_dry_run());
        }

        let timeout = options
            .health_timeout
            .unwrap_or(self.config.health.deploy_timeout);

        match deployment.verify(&self.verifier(), timeout).await {
            Ok(verified) => {
                tracing::info!(environment, "[{}] Deploy SUCCESSFUL", environment);
                Ok(verified.finish())
            }
            Err((failed, failure)) => {
                tracing::error!(
                    environment,
                    "[{}] Deploy FAILED health check, triggering rollback",
                    environment
                );
                let rollback = self.compensate(failed.environment()).await;
                Err(DeployError::HealthCheckFailed {
                    environment: failed.environment().to_string(),
                    failure,
                    rollback,
                }
                .into())
            }
        }
    }

    /// Single compensating rollback after a failed deploy. Never recurses.
    async fn compensate(&self, environment: &str) -> CompensationStatus {
        match self.rollback(environment, RollbackOptions::default()).await {
            Ok(_) => CompensationStatus::Recovered,
            Err(Error::Deploy(DeployError::RollbackUnhealthy { failure, .. })) => {
                CompensationStatus::Unhealthy { failure }
            }
            Err(e) => {
                tracing::error!(environment, "[{}] Rollback failed: {}", environment, e);
                CompensationStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Undo the deployment to a prior revision and verify it.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownEnvironment` before any command runs
    /// - `Error::Execution` or `Error::Deploy` when a command fails
    /// - `DeployError::RollbackUnhealthy` when the restored revision is unhealthy
    pub async fn rollback(
        &self,
        environment: &str,
        options: RollbackOptions,
    ) -> Result<RollbackReport> {
        tracing::info!(
            environment,
            "[{}] Starting rollback (revision: {})...",
            environment,
            options.revision
        );

        let context = cluster::bind(self.config, &self.executor, environment).await?;
        let timeout = options
            .health_timeout
            .unwrap_or(self.config.health.rollback_timeout);

        let outcome = deploy::undo_and_verify(
            &self.executor,
            &self.kubectl,
            &self.verifier(),
            &context.environment,
            options.revision,
            timeout,
        )
        .await?;

        match outcome.failure.clone() {
            None => {
                tracing::info!(environment, "[{}] Rollback SUCCESSFUL", environment);
                Ok(RollbackReport {
                    environment: context.environment,
                    cluster: context.cluster,
                    revision: options.revision,
                    outcome,
                })
            }
            Some(failure) => {
                tracing::error!(
                    environment,
                    "[{}] Rollback health check FAILED, manual intervention required",
                    environment
                );
                Err(DeployError::RollbackUnhealthy {
                    environment: context.environment,
                    failure,
                }
                .into())
            }
        }
    }

    /// Report the running image, revision history, and pods.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownEnvironment` or `Error::Execution`.
    pub async fn status(&self, environment: &str) -> Result<StatusReport> {
        tracing::info!(environment, "[{}] Fetching deployment status...", environment);
        let context = cluster::bind(self.config, &self.executor, environment).await?;
        Ok(status::collect(&self.executor, &self.kubectl, context).await?)
    }
}
