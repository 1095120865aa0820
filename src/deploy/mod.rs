// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Deployment struct, reports, and rollback.

mod deployment;
mod error;
mod rollback;
mod state;
mod transitions;

pub use deployment::{DeployReport, Deployment, RollbackReport};
pub use error::{CompensationStatus, DeployError};
pub use rollback::undo_and_verify;
pub use state::{Annotated, Bound, ImageUpdated, Verified};
pub use transitions::TransitionResult;
