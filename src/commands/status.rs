// ABOUTME: Status command implementation.
// ABOUTME: Prints the running image, rollout history, and pods.

use rollguard::error::Result;
use rollguard::orchestrator::Orchestrator;
use rollguard::output::Output;

pub async fn status(
    orchestrator: &Orchestrator<'_>,
    environment: &str,
    output: Output,
) -> Result<()> {
    let report = orchestrator.status(environment).await?;
    output.report("status", &report);

    output.progress(&format!(
        "Environment: {} ({})",
        report.environment, report.cluster
    ));
    output.success(&format!("Image: {}", report.image));
    output.section("Rollout history", &report.history);
    output.section("Pods", &report.pods);
    Ok(())
}
