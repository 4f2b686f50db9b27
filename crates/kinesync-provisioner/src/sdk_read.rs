//! `DescribeDeliveryStream` response → [`DeliveryStreamDescription`].
//!
//! Enum values are carried as their wire strings; values this build does
//! not know are logged and dropped rather than failing the read.

use std::str::FromStr;

use aws_sdk_firehose::operation::describe_delivery_stream::DescribeDeliveryStreamOutput;
use aws_sdk_firehose::primitives::DateTime;
use aws_sdk_firehose::types as sdk;
use kinesync_core::CoreError;
use kinesync_core::models::description::{
    DeliveryStreamDescription, DestinationDescription, EncryptionConfigurationDescription,
    FailureDescription, HttpEndpointDescription, HttpEndpointDestinationDescription,
    HttpEndpointRequestConfigurationDescription, ProcessingConfigurationDescription,
    S3DestinationDescription,
};
use kinesync_core::models::destination::{
    BufferingHints, CloudWatchLoggingOptions, HttpEndpointCommonAttribute,
    HttpEndpointRetryOptions, KmsEncryptionConfig, Processor, ProcessorParameter,
    S3EncryptionConfiguration, SecretsManagerConfiguration,
};

/// SDK accessors return the bare value for required members and an
/// `Option` for optional ones. Folds both into `Option`.
trait Reported<T> {
    fn reported(self) -> Option<T>;
}

impl<T> Reported<T> for Option<T> {
    fn reported(self) -> Option<T> {
        self
    }
}

impl<'a, T: ?Sized> Reported<&'a T> for &'a T {
    fn reported(self) -> Option<&'a T> {
        Some(self)
    }
}

impl Reported<bool> for bool {
    fn reported(self) -> Option<bool> {
        Some(self)
    }
}

pub(crate) fn output(resp: &DescribeDeliveryStreamOutput) -> Option<DeliveryStreamDescription> {
    resp.delivery_stream_description().reported().map(description)
}

fn description(remote: &sdk::DeliveryStreamDescription) -> DeliveryStreamDescription {
    DeliveryStreamDescription {
        delivery_stream_name: remote.delivery_stream_name().reported().map(str::to_string),
        delivery_stream_arn: remote.delivery_stream_arn().reported().map(str::to_string),
        delivery_stream_status: remote
            .delivery_stream_status()
            .reported()
            .and_then(|s| parse(s.as_str())),
        delivery_stream_encryption_configuration: remote
            .delivery_stream_encryption_configuration()
            .reported()
            .map(encryption),
        delivery_stream_type: remote
            .delivery_stream_type()
            .reported()
            .map(|t| t.as_str().to_string()),
        version_id: remote.version_id().reported().map(str::to_string),
        create_timestamp: remote.create_timestamp().reported().and_then(timestamp),
        last_update_timestamp: remote.last_update_timestamp().reported().and_then(timestamp),
        destinations: remote.destinations().iter().map(destination).collect(),
        has_more_destinations: remote.has_more_destinations().reported().unwrap_or(false),
    }
}

fn encryption(remote: &sdk::DeliveryStreamEncryptionConfiguration) -> EncryptionConfigurationDescription {
    EncryptionConfigurationDescription {
        key_arn: remote.key_arn().reported().map(str::to_string),
        key_type: remote.key_type().reported().and_then(|k| parse(k.as_str())),
        status: remote.status().reported().and_then(|s| parse(s.as_str())),
        failure_description: remote.failure_description().reported().map(|f| FailureDescription {
            failure_type: f.r#type().reported().map(|t| t.as_str().to_string()),
            details: f.details().reported().map(str::to_string),
        }),
    }
}

fn destination(remote: &sdk::DestinationDescription) -> DestinationDescription {
    DestinationDescription {
        destination_id: remote.destination_id().reported().map(str::to_string),
        http_endpoint_destination_description: remote
            .http_endpoint_destination_description()
            .reported()
            .map(http_endpoint),
        s3_destination_description: remote.s3_destination_description().reported().map(s3),
    }
}

fn http_endpoint(remote: &sdk::HttpEndpointDestinationDescription) -> HttpEndpointDestinationDescription {
    HttpEndpointDestinationDescription {
        endpoint_configuration: remote
            .endpoint_configuration()
            .reported()
            .map(|e| HttpEndpointDescription {
                name: e.name().reported().map(str::to_string),
                url: e.url().reported().map(str::to_string),
            }),
        buffering_hints: remote.buffering_hints().reported().map(|h| BufferingHints {
            interval_in_seconds: h.interval_in_seconds().map(i64::from),
            size_in_mbs: h.size_in_mbs().map(i64::from),
        }),
        cloud_watch_logging_options: remote
            .cloud_watch_logging_options()
            .reported()
            .map(cloud_watch_logging_options),
        processing_configuration: remote
            .processing_configuration()
            .reported()
            .map(|p| ProcessingConfigurationDescription {
                enabled: p.enabled(),
                processors: Some(p.processors().iter().map(processor).collect()),
            }),
        request_configuration: remote
            .request_configuration()
            .reported()
            .map(|r| HttpEndpointRequestConfigurationDescription {
                content_encoding: r.content_encoding().reported().map(|c| c.as_str().to_string()),
                common_attributes: Some(
                    r.common_attributes()
                        .iter()
                        .map(|a| HttpEndpointCommonAttribute {
                            attribute_name: a.attribute_name().reported().map(str::to_string),
                            attribute_value: a.attribute_value().reported().map(str::to_string),
                        })
                        .collect(),
                ),
            }),
        retry_options: remote.retry_options().reported().map(|r| HttpEndpointRetryOptions {
            duration_in_seconds: r.duration_in_seconds().map(i64::from),
        }),
        role_arn: remote.role_arn().reported().map(str::to_string),
        s3_backup_mode: remote
            .s3_backup_mode()
            .reported()
            .map(|m| m.as_str().to_string()),
        s3_destination_description: remote.s3_destination_description().reported().map(s3),
        secrets_manager_configuration: remote
            .secrets_manager_configuration()
            .reported()
            .map(|s| SecretsManagerConfiguration {
                enabled: s.enabled().reported(),
                role_arn: s.role_arn().reported().map(str::to_string),
                secret_arn: s.secret_arn().reported().map(str::to_string),
            }),
    }
}

fn processor(remote: &sdk::Processor) -> Processor {
    Processor {
        processor_type: remote.r#type().reported().map(|t| t.as_str().to_string()),
        parameters: remote
            .parameters()
            .iter()
            .map(|p| ProcessorParameter {
                parameter_name: p.parameter_name().reported().map(|n| n.as_str().to_string()),
                parameter_value: p.parameter_value().reported().map(str::to_string),
            })
            .collect(),
    }
}

fn s3(remote: &sdk::S3DestinationDescription) -> S3DestinationDescription {
    S3DestinationDescription {
        bucket_arn: remote.bucket_arn().reported().map(str::to_string),
        buffering_hints: remote.buffering_hints().reported().map(|h| BufferingHints {
            interval_in_seconds: h.interval_in_seconds().map(i64::from),
            size_in_mbs: h.size_in_mbs().map(i64::from),
        }),
        cloud_watch_logging_options: remote
            .cloud_watch_logging_options()
            .reported()
            .map(cloud_watch_logging_options),
        compression_format: remote
            .compression_format()
            .reported()
            .map(|c| c.as_str().to_string()),
        encryption_configuration: remote
            .encryption_configuration()
            .reported()
            .map(|e| S3EncryptionConfiguration {
                kms_encryption_config: e.kms_encryption_config().reported().map(|k| {
                    KmsEncryptionConfig {
                        awskms_key_arn: k.awskms_key_arn().reported().map(str::to_string),
                    }
                }),
                no_encryption_config: e
                    .no_encryption_config()
                    .reported()
                    .map(|n| n.as_str().to_string()),
            }),
        error_output_prefix: remote.error_output_prefix().reported().map(str::to_string),
        prefix: remote.prefix().reported().map(str::to_string),
        role_arn: remote.role_arn().reported().map(str::to_string),
    }
}

fn cloud_watch_logging_options(remote: &sdk::CloudWatchLoggingOptions) -> CloudWatchLoggingOptions {
    CloudWatchLoggingOptions {
        enabled: remote.enabled(),
        log_group_name: remote.log_group_name().reported().map(str::to_string),
        log_stream_name: remote.log_stream_name().reported().map(str::to_string),
    }
}

fn timestamp(value: &DateTime) -> Option<jiff::Timestamp> {
    let nanos = i32::try_from(value.subsec_nanos()).ok()?;
    jiff::Timestamp::new(value.secs(), nanos).ok()
}

fn parse<T: FromStr<Err = CoreError>>(value: &str) -> Option<T> {
    value
        .parse()
        .map_err(|e: CoreError| tracing::warn!(error = %e, "ignoring unrecognized value"))
        .ok()
}
