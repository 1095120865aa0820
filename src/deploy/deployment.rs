// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: Carries the bound cluster context and target image through every state.

use serde::Serialize;

use crate::cluster::ClusterContext;
use crate::health::RolloutOutcome;
use crate::types::{ImageRef, RevisionRef};

use super::state::Bound;

/// A deployment in progress, parameterized by its current state.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) context: ClusterContext,
    pub(crate) image: ImageRef,
    pub(crate) state: S,
}

impl Deployment<Bound> {
    /// Start a deployment of `image` on an already bound cluster.
    pub fn new(context: ClusterContext, image: ImageRef) -> Self {
        Deployment {
            context,
            image,
            state: Bound,
        }
    }
}

impl<S> Deployment<S> {
    pub fn environment(&self) -> &str {
        &self.context.environment
    }
}

/// Summary of a finished deploy.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub environment: String,
    pub cluster: String,
    pub image: String,
    pub dry_run: bool,
    /// Health outcome; absent for dry-runs, which never verify.
    pub outcome: Option<RolloutOutcome>,
}

/// Summary of a finished rollback.
#[derive(Debug, Clone, Serialize)]
pub struct RollbackReport {
    pub environment: String,
    pub cluster: String,
    pub revision: RevisionRef,
    pub outcome: RolloutOutcome,
}
