//! Remote read model, shaped like the `DescribeDeliveryStream` response.
//!
//! Any level may be missing. Destinations come back as a list even though a
//! stream has exactly one; see `kinesync_provisioner::destination` for how
//! this is folded back into a [`ResourceSpec`](crate::ResourceSpec).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::destination::{
    BufferingHints, CloudWatchLoggingOptions, HttpEndpointCommonAttribute,
    HttpEndpointRetryOptions, Processor, S3EncryptionConfiguration, SecretsManagerConfiguration,
};
use crate::models::resource::{EncryptionStatus, KeyType, StreamStatus, Tag};
use crate::models::timestamp;

/// Top-level envelope, as printed by `aws firehose describe-delivery-stream`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDeliveryStreamOutput {
    pub delivery_stream_description: DeliveryStreamDescription,
}

impl DescribeDeliveryStreamOutput {
    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeliveryStreamDescription {
    pub delivery_stream_name: Option<String>,
    #[serde(rename = "DeliveryStreamARN")]
    pub delivery_stream_arn: Option<String>,
    pub delivery_stream_status: Option<StreamStatus>,
    pub delivery_stream_encryption_configuration: Option<EncryptionConfigurationDescription>,
    pub delivery_stream_type: Option<String>,
    pub version_id: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_opt")]
    pub create_timestamp: Option<jiff::Timestamp>,
    #[serde(deserialize_with = "timestamp::deserialize_opt")]
    pub last_update_timestamp: Option<jiff::Timestamp>,
    pub destinations: Vec<DestinationDescription>,
    pub has_more_destinations: bool,
}

/// Encryption as reported by the remote side, including its phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EncryptionConfigurationDescription {
    #[serde(rename = "KeyARN")]
    pub key_arn: Option<String>,
    pub key_type: Option<KeyType>,
    pub status: Option<EncryptionStatus>,
    pub failure_description: Option<FailureDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FailureDescription {
    #[serde(rename = "Type")]
    pub failure_type: Option<String>,
    pub details: Option<String>,
}

/// One entry of the destination list. At most one `*Description` slot is
/// populated per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DestinationDescription {
    pub destination_id: Option<String>,
    pub http_endpoint_destination_description: Option<HttpEndpointDestinationDescription>,
    pub s3_destination_description: Option<S3DestinationDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointDestinationDescription {
    pub endpoint_configuration: Option<HttpEndpointDescription>,
    pub buffering_hints: Option<BufferingHints>,
    pub cloud_watch_logging_options: Option<CloudWatchLoggingOptions>,
    pub processing_configuration: Option<ProcessingConfigurationDescription>,
    pub request_configuration: Option<HttpEndpointRequestConfigurationDescription>,
    pub retry_options: Option<HttpEndpointRetryOptions>,
    #[serde(rename = "RoleARN")]
    pub role_arn: Option<String>,
    pub s3_backup_mode: Option<String>,
    pub s3_destination_description: Option<S3DestinationDescription>,
    pub secrets_manager_configuration: Option<SecretsManagerConfiguration>,
}

/// Read side of a processing pipeline. `Processors` is `None` only when the
/// remote side omitted it; a reported empty list is kept as `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProcessingConfigurationDescription {
    pub enabled: Option<bool>,
    pub processors: Option<Vec<Processor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointRequestConfigurationDescription {
    pub content_encoding: Option<String>,
    pub common_attributes: Option<Vec<HttpEndpointCommonAttribute>>,
}

/// The read side of an endpoint: no access key, and `Url` rather than `URL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointDescription {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct S3DestinationDescription {
    #[serde(rename = "BucketARN")]
    pub bucket_arn: Option<String>,
    pub buffering_hints: Option<BufferingHints>,
    pub cloud_watch_logging_options: Option<CloudWatchLoggingOptions>,
    pub compression_format: Option<String>,
    pub encryption_configuration: Option<S3EncryptionConfiguration>,
    pub error_output_prefix: Option<String>,
    pub prefix: Option<String>,
    #[serde(rename = "RoleARN")]
    pub role_arn: Option<String>,
}

/// As printed by `aws firehose list-tags-for-delivery-stream`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListTagsOutput {
    pub tags: Vec<Tag>,
}

impl ListTagsOutput {
    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
