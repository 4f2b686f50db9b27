//! Tag set reconciliation.
//!
//! Tags are treated as an unordered set keyed by tag key. Keys are assumed
//! unique on both sides (see `ResourceSpec::validate`).

use kinesync_core::Tag;

use crate::client::DeliveryStreamClient;
use crate::error::ProvisionerError;
use crate::metrics::{MetricsRecorder, OperationType};

/// What has to change to turn the observed tags into the desired ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    /// Full tags to write. A changed value is an update, not remove + add.
    pub added_or_updated: Vec<Tag>,
    /// Keys to drop.
    pub removed: Vec<String>,
}

impl TagDelta {
    pub fn is_empty(&self) -> bool {
        self.added_or_updated.is_empty() && self.removed.is_empty()
    }
}

/// Split the difference between `desired` and `observed` into writes and
/// removals. O(n·m), which is fine for tag sets of a few dozen entries.
pub fn compute_tags_delta(desired: &[Tag], observed: &[Tag]) -> TagDelta {
    let added_or_updated = desired
        .iter()
        .filter(|d| {
            !observed
                .iter()
                .any(|o| o.key == d.key && o.value == d.value)
        })
        .cloned()
        .collect();

    let removed = observed
        .iter()
        .filter(|o| !desired.iter().any(|d| d.key == o.key))
        .map(|o| o.key.clone())
        .collect();

    TagDelta {
        added_or_updated,
        removed,
    }
}

/// Order-independent tag set equality.
pub fn equal_tags(a: &[Tag], b: &[Tag]) -> bool {
    compute_tags_delta(a, b).is_empty()
}

/// Fetch the stream's current tags.
pub async fn get_tags(
    client: &dyn DeliveryStreamClient,
    metrics: &dyn MetricsRecorder,
    stream: &str,
) -> Result<Vec<Tag>, ProvisionerError> {
    let result = client.list_tags(stream).await;
    metrics.record_api_call(
        OperationType::Get,
        "ListTagsForDeliveryStream",
        result.as_ref().err(),
    );
    result
}

/// Remove stale keys, then write new and changed tags. Stops at the first
/// failed call.
pub async fn sync_tags(
    client: &dyn DeliveryStreamClient,
    metrics: &dyn MetricsRecorder,
    stream: &str,
    desired: &[Tag],
    observed: &[Tag],
) -> Result<TagDelta, ProvisionerError> {
    let delta = compute_tags_delta(desired, observed);

    if !delta.removed.is_empty() {
        tracing::info!(stream = %stream, keys = ?delta.removed, "removing tags");
        let result = client.untag(stream, &delta.removed).await;
        metrics.record_api_call(
            OperationType::Update,
            "UntagDeliveryStream",
            result.as_ref().err(),
        );
        result?;
    }

    if !delta.added_or_updated.is_empty() {
        tracing::info!(
            stream = %stream,
            count = delta.added_or_updated.len(),
            "writing tags"
        );
        let result = client.tag(stream, &delta.added_or_updated).await;
        metrics.record_api_call(
            OperationType::Update,
            "TagDeliveryStream",
            result.as_ref().err(),
        );
        result?;
    }

    Ok(delta)
}
