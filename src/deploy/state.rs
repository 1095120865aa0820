// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Enforce mutate -> annotate -> verify ordering at compile time.

use crate::health::RolloutOutcome;

/// Cluster context bound, nothing mutated yet.
/// Available actions: `set_image()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Bound;

/// Image mutation issued.
/// Available actions: `annotate()`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageUpdated;

/// Audit annotation issued.
/// Available actions: `verify()`, `finish_dry_run()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Annotated;

/// Health verification passed.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Verified {
    pub(crate) outcome: RolloutOutcome,
}
