//! Client that records mutations instead of sending them.
//!
//! Backs `kinesync plan`: reads are served from captured CLI output, a full
//! pass runs against it, and the recorded calls are what `apply` would have
//! issued.

use std::sync::Mutex;

use kinesync_core::{DeliveryStreamDescription, DestinationConfiguration, KeyType, Tag};
use serde::Serialize;

use crate::client::{BoxFuture, DeliveryStreamClient};
use crate::error::ProvisionerError;

/// One mutation the pass would have made.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum PlannedCall {
    StartEncryption {
        stream: String,
        key_type: KeyType,
        key_arn: Option<String>,
    },
    StopEncryption {
        stream: String,
    },
    Tag {
        stream: String,
        tags: Vec<Tag>,
    },
    Untag {
        stream: String,
        keys: Vec<String>,
    },
    UpdateDestination {
        stream: String,
        version_id: String,
        destination_id: String,
        destination: DestinationConfiguration,
    },
}

#[derive(Default)]
pub struct DryRunClient {
    description: DeliveryStreamDescription,
    tags: Vec<Tag>,
    calls: Mutex<Vec<PlannedCall>>,
}

impl DryRunClient {
    /// `description` and `tags` are what `describe` and `list_tags` report.
    pub fn new(description: DeliveryStreamDescription, tags: Vec<Tag>) -> Self {
        Self {
            description,
            tags,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls recorded so far, in issue order.
    pub fn planned(&self) -> Vec<PlannedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn record(&self, call: PlannedCall) {
        tracing::debug!(call = ?call, "planned call");
        let mut calls = self
            .calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        calls.push(call);
    }
}

impl DeliveryStreamClient for DryRunClient {
    fn describe<'a>(
        &'a self,
        _stream: &'a str,
    ) -> BoxFuture<'a, Result<DeliveryStreamDescription, ProvisionerError>> {
        Box::pin(async move { Ok(self.description.clone()) })
    }

    fn start_encryption<'a>(
        &'a self,
        stream: &'a str,
        key_type: KeyType,
        key_arn: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.record(PlannedCall::StartEncryption {
                stream: stream.to_string(),
                key_type,
                key_arn: key_arn.map(str::to_string),
            });
            Ok(())
        })
    }

    fn stop_encryption<'a>(&'a self, stream: &'a str) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.record(PlannedCall::StopEncryption {
                stream: stream.to_string(),
            });
            Ok(())
        })
    }

    fn tag<'a>(
        &'a self,
        stream: &'a str,
        tags: &'a [Tag],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.record(PlannedCall::Tag {
                stream: stream.to_string(),
                tags: tags.to_vec(),
            });
            Ok(())
        })
    }

    fn untag<'a>(
        &'a self,
        stream: &'a str,
        keys: &'a [String],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.record(PlannedCall::Untag {
                stream: stream.to_string(),
                keys: keys.to_vec(),
            });
            Ok(())
        })
    }

    fn list_tags<'a>(&'a self, _stream: &'a str) -> BoxFuture<'a, Result<Vec<Tag>, ProvisionerError>> {
        Box::pin(async move { Ok(self.tags.clone()) })
    }

    fn update_destination<'a>(
        &'a self,
        stream: &'a str,
        version_id: &'a str,
        destination_id: &'a str,
        destination: &'a DestinationConfiguration,
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.record(PlannedCall::UpdateDestination {
                stream: stream.to_string(),
                version_id: version_id.to_string(),
                destination_id: destination_id.to_string(),
                destination: destination.clone(),
            });
            Ok(())
        })
    }
}
