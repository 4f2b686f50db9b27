//! Transition guard.
//!
//! The remote side rejects or silently drops mutations while the stream is
//! still being created or while its encryption is switching on or off. Two
//! independent axes are checked:
//!
//! | Axis | Blocks mutation in |
//! |------|--------------------|
//! | stream (`CREATING -> ACTIVE -> DELETING`) | `CREATING` |
//! | encryption (`DISABLED <-> ENABLING -> ENABLED <-> DISABLING -> DISABLED`) | `ENABLING`, `DISABLING` |

use kinesync_core::{EncryptionStatus, ResourceStatus, StreamStatus};

use crate::requeue::RequeueReason;

/// Why mutation must wait, or `None` if the stream can be modified now.
/// The stream axis is checked before the encryption axis.
pub fn guard(status: &ResourceStatus) -> Option<RequeueReason> {
    if is_stream_creating(status) {
        return Some(RequeueReason::StreamCreating);
    }

    match status.encryption_status {
        Some(EncryptionStatus::Enabling) => Some(RequeueReason::EncryptionEnabling),
        Some(EncryptionStatus::Disabling) => Some(RequeueReason::EncryptionDisabling),
        _ => None,
    }
}

pub fn is_stream_creating(status: &ResourceStatus) -> bool {
    status.delivery_stream_status == Some(StreamStatus::Creating)
}
