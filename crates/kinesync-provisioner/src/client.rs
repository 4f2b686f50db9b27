use std::future::Future;
use std::pin::Pin;

use kinesync_core::{DeliveryStreamDescription, DestinationConfiguration, KeyType, Tag};

use crate::error::ProvisionerError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remote control plane, narrowed to the calls a reconciliation pass
/// makes. Every call is request/response; a failure is returned as-is and
/// never retried here.
///
/// Methods return boxed futures for dyn compatibility.
pub trait DeliveryStreamClient: Send + Sync {
    /// Current configuration and status of the stream.
    fn describe<'a>(
        &'a self,
        stream: &'a str,
    ) -> BoxFuture<'a, Result<DeliveryStreamDescription, ProvisionerError>>;

    /// Begin enabling server-side encryption. Completes asynchronously on
    /// the remote side.
    fn start_encryption<'a>(
        &'a self,
        stream: &'a str,
        key_type: KeyType,
        key_arn: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), ProvisionerError>>;

    /// Begin disabling server-side encryption.
    fn stop_encryption<'a>(&'a self, stream: &'a str) -> BoxFuture<'a, Result<(), ProvisionerError>>;

    /// Add or overwrite tags.
    fn tag<'a>(
        &'a self,
        stream: &'a str,
        tags: &'a [Tag],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>>;

    /// Remove tags by key.
    fn untag<'a>(
        &'a self,
        stream: &'a str,
        keys: &'a [String],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>>;

    fn list_tags<'a>(&'a self, stream: &'a str) -> BoxFuture<'a, Result<Vec<Tag>, ProvisionerError>>;

    /// Replace the destination. `version_id` and `destination_id` come from
    /// the last read and guard against concurrent updates.
    fn update_destination<'a>(
        &'a self,
        stream: &'a str,
        version_id: &'a str,
        destination_id: &'a str,
        destination: &'a DestinationConfiguration,
    ) -> BoxFuture<'a, Result<(), ProvisionerError>>;
}
