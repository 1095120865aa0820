// ABOUTME: Deploy command implementation.
// ABOUTME: Drives the orchestrator and reports the outcome to the user.

use rollguard::error::Result;
use rollguard::orchestrator::{DeployOptions, Orchestrator};
use rollguard::output::Output;

/// Deploy `image_tag` to one environment.
pub async fn deploy(
    orchestrator: &Orchestrator<'_>,
    environment: &str,
    image_tag: &str,
    options: DeployOptions,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    output.progress(&format!("Deploying {} to {}", image_tag, environment));

    let report = orchestrator.deploy(environment, image_tag, options).await?;
    output.report("deploy", &report);

    if report.dry_run {
        output.success(&format!(
            "Dry-run complete for {} on {}, no changes applied",
            report.image, report.environment
        ));
        return Ok(());
    }

    if let Some(outcome) = &report.outcome
        && let (Some(ready), Some(desired)) = (outcome.ready, outcome.desired)
    {
        output.progress(&format!("  Ready replicas: {}/{}", ready, desired));
    }
    output.success(&format!(
        "Deployed {} to {} ({})",
        report.image, report.environment, report.cluster
    ));
    Ok(())
}
