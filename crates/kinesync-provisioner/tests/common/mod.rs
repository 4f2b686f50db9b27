#![allow(dead_code)]

use std::sync::Mutex;

use kinesync_core::models::destination::{
    BufferingHints, HttpEndpointConfiguration, HttpEndpointDestinationConfiguration,
};
use kinesync_core::{
    DeliveryStreamDescription, DestinationConfiguration, EncryptionConfiguration, KeyType,
    Resource, ResourceSpec, Tag,
};
use kinesync_provisioner::client::{BoxFuture, DeliveryStreamClient};
use kinesync_provisioner::dry_run::PlannedCall;
use kinesync_provisioner::metrics::{MetricsRecorder, OperationType};
use kinesync_provisioner::ProvisionerError;

/// In-memory control plane. Records every call by operation name, keeps the
/// arguments of each mutation, and can be told to fail one operation.
#[derive(Default)]
pub struct FakeClient {
    pub description: DeliveryStreamDescription,
    pub tags: Vec<Tag>,
    pub fail_on: Option<&'static str>,
    calls: Mutex<Vec<String>>,
    mutations: Mutex<Vec<PlannedCall>>,
}

impl FakeClient {
    pub fn with_tags(tags: Vec<Tag>) -> Self {
        Self {
            tags,
            ..Default::default()
        }
    }

    pub fn describing(description: DeliveryStreamDescription, tags: Vec<Tag>) -> Self {
        Self {
            description,
            tags,
            ..Default::default()
        }
    }

    pub fn failing(op: &'static str) -> Self {
        Self {
            fail_on: Some(op),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Mutations that went through, with their arguments.
    pub fn mutations(&self) -> Vec<PlannedCall> {
        self.mutations.lock().unwrap().clone()
    }

    fn call(&self, op: &str) -> Result<(), ProvisionerError> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.fail_on == Some(op) {
            return Err(ProvisionerError::Aws(format!("{op} rejected")));
        }
        Ok(())
    }

    fn mutate(&self, op: &str, call: PlannedCall) -> Result<(), ProvisionerError> {
        self.call(op)?;
        self.mutations.lock().unwrap().push(call);
        Ok(())
    }
}

impl DeliveryStreamClient for FakeClient {
    fn describe<'a>(
        &'a self,
        _stream: &'a str,
    ) -> BoxFuture<'a, Result<DeliveryStreamDescription, ProvisionerError>> {
        Box::pin(async move {
            self.call("DescribeDeliveryStream")?;
            Ok(self.description.clone())
        })
    }

    fn start_encryption<'a>(
        &'a self,
        stream: &'a str,
        key_type: KeyType,
        key_arn: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.mutate(
                "StartDeliveryStreamEncryption",
                PlannedCall::StartEncryption {
                    stream: stream.to_string(),
                    key_type,
                    key_arn: key_arn.map(str::to_string),
                },
            )
        })
    }

    fn stop_encryption<'a>(&'a self, stream: &'a str) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.mutate(
                "StopDeliveryStreamEncryption",
                PlannedCall::StopEncryption {
                    stream: stream.to_string(),
                },
            )
        })
    }

    fn tag<'a>(
        &'a self,
        stream: &'a str,
        tags: &'a [Tag],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.mutate(
                "TagDeliveryStream",
                PlannedCall::Tag {
                    stream: stream.to_string(),
                    tags: tags.to_vec(),
                },
            )
        })
    }

    fn untag<'a>(
        &'a self,
        stream: &'a str,
        keys: &'a [String],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.mutate(
                "UntagDeliveryStream",
                PlannedCall::Untag {
                    stream: stream.to_string(),
                    keys: keys.to_vec(),
                },
            )
        })
    }

    fn list_tags<'a>(&'a self, _stream: &'a str) -> BoxFuture<'a, Result<Vec<Tag>, ProvisionerError>> {
        Box::pin(async move {
            self.call("ListTagsForDeliveryStream")?;
            Ok(self.tags.clone())
        })
    }

    fn update_destination<'a>(
        &'a self,
        stream: &'a str,
        version_id: &'a str,
        destination_id: &'a str,
        destination: &'a DestinationConfiguration,
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.mutate(
                "UpdateDestination",
                PlannedCall::UpdateDestination {
                    stream: stream.to_string(),
                    version_id: version_id.to_string(),
                    destination_id: destination_id.to_string(),
                    destination: destination.clone(),
                },
            )
        })
    }
}

/// Captures `(op_type, op_id, failed)` per recorded call.
#[derive(Default)]
pub struct RecordingMetrics {
    records: Mutex<Vec<(OperationType, String, bool)>>,
}

impl RecordingMetrics {
    pub fn records(&self) -> Vec<(OperationType, String, bool)> {
        self.records.lock().unwrap().clone()
    }
}

impl MetricsRecorder for RecordingMetrics {
    fn record_api_call(&self, op_type: OperationType, op_id: &str, error: Option<&ProvisionerError>) {
        self.records
            .lock()
            .unwrap()
            .push((op_type, op_id.to_string(), error.is_some()));
    }
}

pub fn spec(name: &str) -> ResourceSpec {
    ResourceSpec {
        delivery_stream_name: name.to_string(),
        ..Default::default()
    }
}

pub fn resource(spec: ResourceSpec) -> Resource {
    Resource::new(spec)
}

pub fn encryption(key_type: KeyType, key_arn: Option<&str>) -> Option<EncryptionConfiguration> {
    Some(EncryptionConfiguration {
        key_type: Some(key_type),
        key_arn: key_arn.map(str::to_string),
    })
}

pub fn http_destination(url: &str, size_in_mbs: Option<i64>) -> DestinationConfiguration {
    DestinationConfiguration::HttpEndpoint(HttpEndpointDestinationConfiguration {
        endpoint_configuration: Some(HttpEndpointConfiguration {
            url: Some(url.to_string()),
            ..Default::default()
        }),
        buffering_hints: size_in_mbs.map(|size| BufferingHints {
            size_in_mbs: Some(size),
            ..Default::default()
        }),
        ..Default::default()
    })
}
