// ABOUTME: Builders for every control-plane command the orchestrator issues.
// ABOUTME: Pure argument construction; execution happens in the exec module.

use std::time::Duration;

use crate::config::{Config, EnvironmentConfig};
use crate::exec::Command;
use crate::types::{DeploymentTarget, ImageRef, RevisionRef};

/// Annotation recording which tag a revision rolled out.
pub const REVISION_NOTE_ANNOTATION: &str = "deployment.kubernetes.io/revision-note";

/// Annotation shown in the CHANGE-CAUSE column of `rollout history`.
pub const CHANGE_CAUSE_ANNOTATION: &str = "kubernetes.io/change-cause";

/// Audit metadata attached to the deployment after an image update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditNote {
    pub tag: String,
    pub deployed_by: String,
    pub deployed_at: String,
}

impl AuditNote {
    /// Note for the current user, host, and time.
    pub fn now(tag: &str) -> Self {
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
        let host = gethostname::gethostname().to_string_lossy().into_owned();
        Self {
            tag: tag.to_string(),
            deployed_by: format!("{}@{}", user, host),
            deployed_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        }
    }

    fn change_cause(&self) -> String {
        format!(
            "rollguard deploy image={} by {} at {}",
            self.tag, self.deployed_by, self.deployed_at
        )
    }
}

/// Builds `kubectl` invocations scoped to one deployment.
#[derive(Debug, Clone)]
pub struct Kubectl {
    program: String,
    target: DeploymentTarget,
}

impl Kubectl {
    pub fn new(program: impl Into<String>, target: DeploymentTarget) -> Self {
        Self {
            program: program.into(),
            target,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.tools.kubectl, config.target())
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
    }

    fn namespaced(&self, cmd: Command) -> Command {
        cmd.args(["-n", self.target.namespace.as_str()])
    }

    pub fn set_image(&self, image: &ImageRef) -> Command {
        let cmd = self.command().args([
            "set".to_string(),
            "image".to_string(),
            self.target.resource(),
            format!("{}={}", self.target.container, image),
        ]);
        self.namespaced(cmd)
    }

    pub fn annotate(&self, note: &AuditNote) -> Command {
        let cmd = self.command().args([
            "annotate".to_string(),
            "deployment".to_string(),
            self.target.deployment.clone(),
            format!("{}=image={}", REVISION_NOTE_ANNOTATION, note.tag),
            format!("{}={}", CHANGE_CAUSE_ANNOTATION, note.change_cause()),
            "--overwrite".to_string(),
        ]);
        self.namespaced(cmd)
    }

    /// Blocks until the rollout finishes or `timeout` elapses.
    pub fn rollout_status(&self, timeout: Duration) -> Command {
        let cmd = self.command().args([
            "rollout".to_string(),
            "status".to_string(),
            self.target.resource(),
        ]);
        self.namespaced(cmd)
            .arg(format!("--timeout={}s", whole_seconds(timeout)))
    }

    pub fn rollout_undo(&self, revision: RevisionRef) -> Command {
        let cmd = self.command().args([
            "rollout".to_string(),
            "undo".to_string(),
            self.target.resource(),
        ]);
        let cmd = self.namespaced(cmd);
        match revision.number() {
            Some(n) => cmd.args(["--to-revision".to_string(), n.to_string()]),
            None => cmd,
        }
    }

    pub fn rollout_history(&self) -> Command {
        let cmd = self.command().args([
            "rollout".to_string(),
            "history".to_string(),
            self.target.resource(),
        ]);
        self.namespaced(cmd)
    }

    /// Reads one field of the deployment with a jsonpath expression.
    pub fn get_field(&self, jsonpath: &str) -> Command {
        let cmd = self.command().args([
            "get".to_string(),
            "deployment".to_string(),
            self.target.deployment.clone(),
        ]);
        self.namespaced(cmd)
            .args(["-o".to_string(), format!("jsonpath={}", jsonpath)])
    }

    pub fn ready_replicas(&self) -> Command {
        self.get_field(READY_REPLICAS_PATH)
    }

    pub fn desired_replicas(&self) -> Command {
        self.get_field(DESIRED_REPLICAS_PATH)
    }

    pub fn current_image(&self) -> Command {
        self.get_field(CURRENT_IMAGE_PATH)
    }

    pub fn pods(&self) -> Command {
        let cmd = self.namespaced(self.command().args(["get", "pods"]));
        cmd.args(["-l", self.target.selector.as_str(), "-o", "wide"])
    }
}

/// Seconds for `--timeout`, rounded up and never zero.
fn whole_seconds(timeout: Duration) -> u64 {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    secs.max(1)
}

pub const READY_REPLICAS_PATH: &str = "{.status.readyReplicas}";
pub const DESIRED_REPLICAS_PATH: &str = "{.spec.replicas}";
pub const CURRENT_IMAGE_PATH: &str = "{.spec.template.spec.containers[0].image}";

/// Points the local kubeconfig at an environment's EKS cluster.
pub fn update_kubeconfig(aws: &str, environment: &EnvironmentConfig) -> Command {
    Command::new(aws).args([
        "eks",
        "update-kubeconfig",
        "--name",
        environment.cluster.as_str(),
        "--region",
        environment.region.as_str(),
    ])
}
