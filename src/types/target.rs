// ABOUTME: The single deployment every operation acts on.
// ABOUTME: Namespace, deployment, container, and pod selector, constant across environments.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub namespace: String,
    pub deployment: String,
    pub container: String,
    pub selector: String,
}

impl DeploymentTarget {
    /// Target whose container and selector follow the deployment name.
    pub fn new(namespace: impl Into<String>, deployment: impl Into<String>) -> Self {
        let deployment = deployment.into();
        Self {
            namespace: namespace.into(),
            container: deployment.clone(),
            selector: format!("app={}", deployment),
            deployment,
        }
    }

    /// `deployment/<name>` resource form used by rollout subcommands.
    pub fn resource(&self) -> String {
        format!("deployment/{}", self.deployment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_deployment_name() {
        let target = DeploymentTarget::new("video-analytics", "video-processor");
        assert_eq!(target.container, "video-processor");
        assert_eq!(target.selector, "app=video-processor");
        assert_eq!(target.resource(), "deployment/video-processor");
    }
}
