//! Canonical (desired-state) destination shapes.
//!
//! Every nested level is optional so that a spec only needs to name the
//! fields it cares about. An absent substructure and a present one with every
//! field absent mean the same thing.

use serde::{Deserialize, Serialize};

/// The sink a delivery stream forwards records to. Exactly one kind is
/// configured per stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DestinationConfiguration {
    #[serde(rename = "HttpEndpointDestinationConfiguration")]
    HttpEndpoint(HttpEndpointDestinationConfiguration),
    #[serde(rename = "S3DestinationConfiguration")]
    S3(S3DestinationConfiguration),
}

impl DestinationConfiguration {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HttpEndpoint(_) => "http_endpoint",
            Self::S3(_) => "s3",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointDestinationConfiguration {
    pub endpoint_configuration: Option<HttpEndpointConfiguration>,
    pub buffering_hints: Option<BufferingHints>,
    pub cloud_watch_logging_options: Option<CloudWatchLoggingOptions>,
    pub processing_configuration: Option<ProcessingConfiguration>,
    pub request_configuration: Option<HttpEndpointRequestConfiguration>,
    pub retry_options: Option<HttpEndpointRetryOptions>,
    #[serde(rename = "RoleARN")]
    pub role_arn: Option<String>,
    /// "FailedDataOnly" or "AllData".
    pub s3_backup_mode: Option<String>,
    pub s3_configuration: Option<S3DestinationConfiguration>,
    pub secrets_manager_configuration: Option<SecretsManagerConfiguration>,
}

/// Identity of the HTTP endpoint records are delivered to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointConfiguration {
    pub name: Option<String>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
    /// Write-only: never echoed back by the remote read.
    pub access_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BufferingHints {
    pub interval_in_seconds: Option<i64>,
    #[serde(rename = "SizeInMBs")]
    pub size_in_mbs: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointRetryOptions {
    pub duration_in_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CloudWatchLoggingOptions {
    pub enabled: Option<bool>,
    pub log_group_name: Option<String>,
    pub log_stream_name: Option<String>,
}

/// Record transformation pipeline. Processors run in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProcessingConfiguration {
    pub enabled: Option<bool>,
    pub processors: Vec<Processor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Processor {
    /// e.g. "Lambda", "AppendDelimiterToRecord".
    #[serde(rename = "Type")]
    pub processor_type: Option<String>,
    pub parameters: Vec<ProcessorParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProcessorParameter {
    pub parameter_name: Option<String>,
    pub parameter_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointRequestConfiguration {
    /// "NONE" or "GZIP".
    pub content_encoding: Option<String>,
    pub common_attributes: Vec<HttpEndpointCommonAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpEndpointCommonAttribute {
    pub attribute_name: Option<String>,
    pub attribute_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecretsManagerConfiguration {
    pub enabled: Option<bool>,
    #[serde(rename = "RoleARN")]
    pub role_arn: Option<String>,
    #[serde(rename = "SecretARN")]
    pub secret_arn: Option<String>,
}

/// An S3 destination, either standalone or embedded as the backup of
/// another destination kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct S3DestinationConfiguration {
    #[serde(rename = "BucketARN")]
    pub bucket_arn: Option<String>,
    pub buffering_hints: Option<BufferingHints>,
    pub cloud_watch_logging_options: Option<CloudWatchLoggingOptions>,
    /// "UNCOMPRESSED", "GZIP", "ZIP", "Snappy" or "HADOOP_SNAPPY".
    pub compression_format: Option<String>,
    pub encryption_configuration: Option<S3EncryptionConfiguration>,
    pub error_output_prefix: Option<String>,
    pub prefix: Option<String>,
    #[serde(rename = "RoleARN")]
    pub role_arn: Option<String>,
}

/// Either a KMS key reference or the literal "NoEncryption".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct S3EncryptionConfiguration {
    #[serde(rename = "KMSEncryptionConfig")]
    pub kms_encryption_config: Option<KmsEncryptionConfig>,
    pub no_encryption_config: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KmsEncryptionConfig {
    #[serde(rename = "AWSKMSKeyARN")]
    pub awskms_key_arn: Option<String>,
}
