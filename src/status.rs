// ABOUTME: Read-only snapshot of a deployment: running image, revisions, and pods.
// ABOUTME: Issues only queries, never mutations.

use serde::Serialize;

use crate::cluster::ClusterContext;
use crate::exec::{ExecError, Executor};
use crate::kubectl::Kubectl;

/// What `status` reports for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub environment: String,
    pub cluster: String,
    /// Image currently set on the deployment's first container.
    pub image: String,
    /// Raw rollout history table.
    pub history: String,
    /// Raw pod listing.
    pub pods: String,
}

/// Query the bound cluster for the deployment's current state.
pub async fn collect(
    executor: &Executor<'_>,
    kubectl: &Kubectl,
    context: ClusterContext,
) -> Result<StatusReport, ExecError> {
    let image = executor.run(&kubectl.current_image()).await?;
    let history = executor.run(&kubectl.rollout_history()).await?;
    let pods = executor.run(&kubectl.pods()).await?;

    Ok(StatusReport {
        environment: context.environment,
        cluster: context.cluster,
        image,
        history,
        pods,
    })
}
