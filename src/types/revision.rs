// ABOUTME: Rollout revision selector used by rollback.
// ABOUTME: Either the immediately previous revision or an explicit revision number.

use serde::Serialize;
use std::fmt;

/// Which revision a rollback returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionRef {
    /// Let the control plane pick the revision before the current one.
    #[default]
    Previous,
    /// A specific revision from the rollout history.
    Number(u32),
}

impl RevisionRef {
    /// Explicit revision number, if any.
    pub fn number(&self) -> Option<u32> {
        match self {
            RevisionRef::Previous => None,
            RevisionRef::Number(n) => Some(*n),
        }
    }
}

/// Revision 0 is the control plane's own spelling of "previous".
impl From<Option<u32>> for RevisionRef {
    fn from(value: Option<u32>) -> Self {
        match value {
            None | Some(0) => RevisionRef::Previous,
            Some(n) => RevisionRef::Number(n),
        }
    }
}

impl fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevisionRef::Previous => write!(f, "previous"),
            RevisionRef::Number(n) => write!(f, "{}", n),
        }
    }
}
