// ABOUTME: Rollback command implementation.
// ABOUTME: Reverts a deployment to a prior revision and reports its health.

use rollguard::error::Result;
use rollguard::orchestrator::{Orchestrator, RollbackOptions};
use rollguard::output::Output;

/// Roll one environment back.
pub async fn rollback(
    orchestrator: &Orchestrator<'_>,
    environment: &str,
    options: RollbackOptions,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    output.progress(&format!(
        "Rolling back {} (revision: {})",
        environment, options.revision
    ));

    let report = orchestrator.rollback(environment, options).await?;
    output.report("rollback", &report);

    if let (Some(ready), Some(desired)) = (report.outcome.ready, report.outcome.desired) {
        output.progress(&format!("  Ready replicas: {}/{}", ready, desired));
    }
    output.success(&format!(
        "Rolled back {} ({})",
        report.environment, report.cluster
    ));
    Ok(())
}
