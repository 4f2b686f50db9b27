use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Why a pass stopped short of mutating the stream.
///
/// Not a failure: the resource is in a valid state that simply cannot be
/// modified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequeueReason {
    #[error("delivery stream in CREATING state, cannot be modified")]
    StreamCreating,

    #[error("delivery stream cannot be modified while server-side encryption ENABLING")]
    EncryptionEnabling,

    #[error("delivery stream cannot be modified while server-side encryption DISABLING")]
    EncryptionDisabling,

    #[error("requeue after updating delivery stream encryption")]
    EncryptionUpdated,
}

/// Deferral signal handed back to the scheduler: try again after `retry_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requeue {
    pub reason: RequeueReason,
    pub retry_after: Duration,
}

impl Requeue {
    pub fn after(reason: RequeueReason, retry_after: Duration) -> Self {
        Self {
            reason,
            retry_after,
        }
    }
}

impl fmt::Display for Requeue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (retry after {}s)", self.reason, self.retry_after.as_secs())
    }
}
