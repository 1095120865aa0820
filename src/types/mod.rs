// ABOUTME: Validated domain types shared by the orchestration layers.
// ABOUTME: Image references, rollback revisions, and the deployment target.

mod image_ref;
mod revision;
mod target;

pub use image_ref::{ImageRef, ParseImageRefError};
pub use revision::RevisionRef;
pub use target::DeploymentTarget;
