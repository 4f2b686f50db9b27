use std::sync::Arc;
use std::time::Duration;

use kinesync_core::models::description::DeliveryStreamDescription;
use kinesync_core::{DestinationConfiguration, KeyType, Resource, ResourceSpec};

use crate::client::DeliveryStreamClient;
use crate::config::SyncConfig;
use crate::delta::{self, DESTINATION_PATH, Delta, ENCRYPTION_PATH, NAME_PATH, TAGS_PATH, TYPE_PATH};
use crate::error::ProvisionerError;
use crate::guard;
use crate::metrics::{MetricsRecorder, OperationType};
use crate::observe;
use crate::requeue::{Requeue, RequeueReason};
use crate::tags;

/// Fields the remote API cannot change after creation.
const IMMUTABLE_PATHS: [&str; 2] = [NAME_PATH, TYPE_PATH];

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing differed; no calls were made.
    InSync,
    /// Every required mutation was issued.
    Updated,
    /// The pass stopped early; the scheduler should try again later.
    Requeue(Requeue),
}

/// Drives one delivery stream toward its desired spec.
///
/// Holds no per-stream state, so one syncer can serve any number of
/// streams as long as passes for the same stream are not run concurrently.
pub struct DeliveryStreamSyncer {
    client: Arc<dyn DeliveryStreamClient>,
    metrics: Arc<dyn MetricsRecorder>,
    transition_backoff: Duration,
    update_backoff: Duration,
}

impl DeliveryStreamSyncer {
    pub fn new(
        client: Arc<dyn DeliveryStreamClient>,
        metrics: Arc<dyn MetricsRecorder>,
        config: &SyncConfig,
    ) -> Self {
        Self {
            client,
            metrics,
            transition_backoff: config.transition_backoff(),
            update_backoff: config.update_backoff(),
        }
    }

    /// Full pass: read the stream's live description, build the observed
    /// snapshot from it, then update.
    pub async fn reconcile(&self, desired: &Resource) -> Result<SyncOutcome, ProvisionerError> {
        let description = self.describe(desired.name()).await?;
        let observed = self.observe(desired, &description).await?;
        self.update(desired, &observed).await
    }

    pub async fn describe(&self, stream: &str) -> Result<DeliveryStreamDescription, ProvisionerError> {
        tracing::debug!(stream = %stream, "describing delivery stream");
        let result = self.client.describe(stream).await;
        self.metrics.record_api_call(
            OperationType::Get,
            "DescribeDeliveryStream",
            result.as_ref().err(),
        );
        result
    }

    /// Build the observed snapshot: a copy of `desired` overwritten with
    /// what the remote side reports, plus its current tags.
    pub async fn observe(
        &self,
        desired: &Resource,
        description: &DeliveryStreamDescription,
    ) -> Result<Resource, ProvisionerError> {
        let mut observed = desired.clone();
        observe::read_description(&mut observed, description);

        tracing::debug!(stream = %observed.name(), "reading tags");
        observed.spec.tags =
            tags::get_tags(self.client.as_ref(), self.metrics.as_ref(), observed.name()).await?;

        Ok(observed)
    }

    /// Issue the mutations needed to move `observed` toward `desired`.
    ///
    /// Order: tags, then encryption, then destination. An encryption change
    /// ends the pass with a requeue because it starts a remote transition
    /// during which nothing else may be modified.
    pub async fn update(
        &self,
        desired: &Resource,
        observed: &Resource,
    ) -> Result<SyncOutcome, ProvisionerError> {
        let stream = desired.name();
        let delta = delta::compare(desired, observed);

        if delta.is_empty() {
            tracing::debug!(stream = %stream, "delivery stream in sync");
            return Ok(SyncOutcome::InSync);
        }

        tracing::info!(
            stream = %stream,
            paths = ?delta.paths().collect::<Vec<_>>(),
            "delivery stream drift detected"
        );

        if let Some(path) = IMMUTABLE_PATHS.iter().find(|p| delta.different_at(p)) {
            return Err(ProvisionerError::ImmutableFieldChanged {
                path: path.to_string(),
            });
        }

        // Checked before any call so a rejected pass has no side effects.
        let destination = if delta.different_at(DESTINATION_PATH) {
            match &desired.spec.destination_configuration {
                Some(destination) => Some(destination),
                None => {
                    return Err(ProvisionerError::UpdateFailed(
                        "a delivery stream destination cannot be removed".into(),
                    ));
                }
            }
        } else {
            None
        };

        if let Some(reason) = guard::guard(&observed.status) {
            let requeue = Requeue::after(reason, self.transition_backoff);
            tracing::warn!(stream = %stream, requeue = %requeue, "deferring update");
            return Ok(SyncOutcome::Requeue(requeue));
        }

        if delta.different_at(TAGS_PATH) {
            tags::sync_tags(
                self.client.as_ref(),
                self.metrics.as_ref(),
                stream,
                &desired.spec.tags,
                &observed.spec.tags,
            )
            .await?;
        }

        if delta.different_at(ENCRYPTION_PATH) {
            self.update_encryption(&desired.spec, &observed.spec).await?;
            let requeue = Requeue::after(RequeueReason::EncryptionUpdated, self.update_backoff);
            tracing::info!(stream = %stream, requeue = %requeue, "encryption change started");
            return Ok(SyncOutcome::Requeue(requeue));
        }

        if let Some(destination) = destination {
            self.update_destination(desired, observed, destination, &delta)
                .await?;
        }

        Ok(SyncOutcome::Updated)
    }

    /// Exactly one call: enable when a key type is desired and encryption is
    /// currently off, disable otherwise.
    ///
    /// There is no atomic key rotation, so a key change is a disable on this
    /// pass followed by an enable once the stream reports `DISABLED`.
    async fn update_encryption(
        &self,
        desired: &ResourceSpec,
        observed: &ResourceSpec,
    ) -> Result<(), ProvisionerError> {
        let stream = desired.delivery_stream_name.as_str();

        match desired_key_type(desired) {
            Some(key_type) if desired_key_type(observed).is_none() => {
                let key_arn = desired
                    .encryption_configuration
                    .as_ref()
                    .and_then(|e| e.key_arn.as_deref());
                tracing::info!(stream = %stream, key_type = %key_type, "starting delivery stream encryption");
                let result = self.client.start_encryption(stream, key_type, key_arn).await;
                self.metrics.record_api_call(
                    OperationType::Update,
                    "StartDeliveryStreamEncryption",
                    result.as_ref().err(),
                );
                result
            }
            wanted => {
                if wanted.is_some() {
                    tracing::info!(stream = %stream, "encryption key changed, disabling before re-enabling");
                } else {
                    tracing::info!(stream = %stream, "stopping delivery stream encryption");
                }
                let result = self.client.stop_encryption(stream).await;
                self.metrics.record_api_call(
                    OperationType::Update,
                    "StopDeliveryStreamEncryption",
                    result.as_ref().err(),
                );
                result
            }
        }
    }

    async fn update_destination(
        &self,
        desired: &Resource,
        observed: &Resource,
        destination: &DestinationConfiguration,
        delta: &Delta,
    ) -> Result<(), ProvisionerError> {
        let stream = desired.name();
        let version_id = observed
            .status
            .version_id
            .as_deref()
            .ok_or(ProvisionerError::MissingStatus("VersionId"))?;
        let destination_id = observed
            .status
            .destination_id
            .as_deref()
            .ok_or(ProvisionerError::MissingStatus("DestinationId"))?;

        tracing::info!(
            stream = %stream,
            kind = destination.kind(),
            changed = delta.paths().filter(|p| p.starts_with(DESTINATION_PATH)).count(),
            "updating delivery stream destination"
        );
        let result = self
            .client
            .update_destination(stream, version_id, destination_id, destination)
            .await;
        self.metrics.record_api_call(
            OperationType::Update,
            "UpdateDestination",
            result.as_ref().err(),
        );
        result
    }
}

/// The key type to enable with, or `None` when encryption should be off.
pub fn desired_key_type(spec: &ResourceSpec) -> Option<KeyType> {
    spec.encryption_configuration
        .as_ref()
        .and_then(|e| e.key_type)
}
