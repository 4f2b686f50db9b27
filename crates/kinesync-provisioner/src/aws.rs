//! [`DeliveryStreamClient`] backed by `aws-sdk-firehose`.

use aws_sdk_firehose::Client;
use aws_sdk_firehose::types as sdk;
use kinesync_core::models::destination::{
    BufferingHints, CloudWatchLoggingOptions, DestinationConfiguration,
    HttpEndpointDestinationConfiguration, ProcessingConfiguration, S3DestinationConfiguration,
    S3EncryptionConfiguration,
};
use kinesync_core::{DeliveryStreamDescription, KeyType, Tag};

use crate::client::{BoxFuture, DeliveryStreamClient};
use crate::error::{ProvisionerError, format_err_chain};
use crate::sdk_read;

/// Firehose caps a stream at 50 tags, so one page always holds them all.
const MAX_TAGS: i32 = 50;

pub struct FirehoseClient {
    client: Client,
}

impl FirehoseClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

impl DeliveryStreamClient for FirehoseClient {
    fn describe<'a>(
        &'a self,
        stream: &'a str,
    ) -> BoxFuture<'a, Result<DeliveryStreamDescription, ProvisionerError>> {
        Box::pin(async move {
            let resp = self
                .client
                .describe_delivery_stream()
                .delivery_stream_name(stream)
                .send()
                .await
                .map_err(|e| ProvisionerError::Aws(format_err_chain(&e)))
                .map_err(|e| e.with_operation("DescribeDeliveryStream", stream))?;

            sdk_read::output(&resp).ok_or_else(|| {
                ProvisionerError::Aws("response carried no description".into())
                    .with_operation("DescribeDeliveryStream", stream)
            })
        })
    }

    fn start_encryption<'a>(
        &'a self,
        stream: &'a str,
        key_type: KeyType,
        key_arn: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            let input = sdk::DeliveryStreamEncryptionConfigurationInput::builder()
                .key_type(sdk::KeyType::from(key_type.as_str()))
                .set_key_arn(key_arn.map(str::to_string))
                .build()
                .map_err(|e| ProvisionerError::UpdateFailed(e.to_string()))?;

            self.client
                .start_delivery_stream_encryption()
                .delivery_stream_name(stream)
                .delivery_stream_encryption_configuration_input(input)
                .send()
                .await
                .map_err(|e| ProvisionerError::Aws(format_err_chain(&e)))
                .map_err(|e| e.with_operation("StartDeliveryStreamEncryption", stream))?;

            Ok(())
        })
    }

    fn stop_encryption<'a>(&'a self, stream: &'a str) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.client
                .stop_delivery_stream_encryption()
                .delivery_stream_name(stream)
                .send()
                .await
                .map_err(|e| ProvisionerError::Aws(format_err_chain(&e)))
                .map_err(|e| e.with_operation("StopDeliveryStreamEncryption", stream))?;

            Ok(())
        })
    }

    fn tag<'a>(
        &'a self,
        stream: &'a str,
        tags: &'a [Tag],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            let sdk_tags = tags
                .iter()
                .map(|tag| {
                    sdk::Tag::builder()
                        .key(&tag.key)
                        .value(&tag.value)
                        .build()
                        .map_err(|e| ProvisionerError::UpdateFailed(e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.client
                .tag_delivery_stream()
                .delivery_stream_name(stream)
                .set_tags(Some(sdk_tags))
                .send()
                .await
                .map_err(|e| ProvisionerError::Aws(format_err_chain(&e)))
                .map_err(|e| e.with_operation("TagDeliveryStream", stream))?;

            Ok(())
        })
    }

    fn untag<'a>(
        &'a self,
        stream: &'a str,
        keys: &'a [String],
    ) -> BoxFuture<'a, Result<(), ProvisionerError>> {
        Box::pin(async move {
            self.client
                .untag_delivery_stream()
                .delivery_stream_name(stream)
                .set_tag_keys(Some(keys.to_vec()))
                .send()
                .await
                .map_err(|e| ProvisionerError::Aws(format_err_chain(&e)))
                .map_err(|e| e.with_operation("UntagDeliveryStream", stream))?;

            Ok(())
        })
    }

    fn list_tags<'a>(&'a self, stream: &'a str) -> BoxFuture<'a, Result<Vec<Tag>, ProvisionerError>> {
        Box::pin(async move {
            let resp = self
                .client
                .list_tags_for_delivery_stream()
                .delivery_stream_name(stream)
                .limit(MAX_TAGS)
                .send()
                .await
                .map_err(|e| ProvisionerError::Aws(format_err_chain(&e)))
                .map_err(|e| e.with_operation("ListTagsForDeliveryStream", stream))?;

            Ok(resp
                .tags()
                .iter()
                .map(|tag| Tag::new(tag.key(), tag.value().unwrap_or_default()))
                .collect())
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
            let request = self
                .client
                .update_destination()
                .delivery_stream_name(stream)
                .current_delivery_stream_version_id(version_id)
                .destination_id(destination_id);

            let request = match destination {
                DestinationConfiguration::HttpEndpoint(config) => {
                    request.http_endpoint_destination_update(http_endpoint_update(config)?)
                }
                DestinationConfiguration::S3(config) => {
                    request.s3_destination_update(s3_update(config)?)
                }
            };

            request
                .send()
                .await
                .map_err(|e| ProvisionerError::Aws(format_err_chain(&e)))
                .map_err(|e| e.with_operation("UpdateDestination", stream))?;

            tracing::info!(stream = %stream, kind = destination.kind(), "destination updated");
            Ok(())
        })
    }
}

// ── request builders ────────────────────────────────────────────────────────

fn http_endpoint_update(
    config: &HttpEndpointDestinationConfiguration,
) -> Result<sdk::HttpEndpointDestinationUpdate, ProvisionerError> {
    let endpoint = config
        .endpoint_configuration
        .as_ref()
        .map(|endpoint| {
            sdk::HttpEndpointConfiguration::builder()
                .url(endpoint.url.clone().unwrap_or_default())
                .set_name(endpoint.name.clone())
                .set_access_key(endpoint.access_key.clone())
                .build()
                .map_err(build_failed)
        })
        .transpose()?;

    let buffering_hints = config
        .buffering_hints
        .as_ref()
        .map(|hints| -> Result<_, ProvisionerError> {
            Ok(sdk::HttpEndpointBufferingHints::builder()
                .set_interval_in_seconds(to_i32(hints.interval_in_seconds, "IntervalInSeconds")?)
                .set_size_in_mbs(to_i32(hints.size_in_mbs, "SizeInMBs")?)
                .build())
        })
        .transpose()?;

    let retry_options = config
        .retry_options
        .as_ref()
        .map(|retry| -> Result<_, ProvisionerError> {
            Ok(sdk::HttpEndpointRetryOptions::builder()
                .set_duration_in_seconds(to_i32(retry.duration_in_seconds, "DurationInSeconds")?)
                .build())
        })
        .transpose()?;

    let request_configuration = config
        .request_configuration
        .as_ref()
        .map(|request| -> Result<_, ProvisionerError> {
            let attributes = request
                .common_attributes
                .iter()
                .map(|attr| {
                    sdk::HttpEndpointCommonAttribute::builder()
                        .attribute_name(attr.attribute_name.clone().unwrap_or_default())
                        .attribute_value(attr.attribute_value.clone().unwrap_or_default())
                        .build()
                        .map_err(build_failed)
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(sdk::HttpEndpointRequestConfiguration::builder()
                .set_content_encoding(
                    request
                        .content_encoding
                        .as_deref()
                        .map(sdk::ContentEncoding::from),
                )
                .set_common_attributes(Some(attributes))
                .build())
        })
        .transpose()?;

    let secrets = config
        .secrets_manager_configuration
        .as_ref()
        .map(|secrets| {
            sdk::SecretsManagerConfiguration::builder()
                .enabled(secrets.enabled.unwrap_or(false))
                .set_role_arn(secrets.role_arn.clone())
                .set_secret_arn(secrets.secret_arn.clone())
                .build()
                .map_err(build_failed)
        })
        .transpose()?;

    Ok(sdk::HttpEndpointDestinationUpdate::builder()
        .set_endpoint_configuration(endpoint)
        .set_buffering_hints(buffering_hints)
        .set_cloud_watch_logging_options(
            config
                .cloud_watch_logging_options
                .as_ref()
                .map(cloud_watch_logging_options),
        )
        .set_processing_configuration(
            config
                .processing_configuration
                .as_ref()
                .map(processing_configuration)
                .transpose()?,
        )
        .set_request_configuration(request_configuration)
        .set_retry_options(retry_options)
        .set_role_arn(config.role_arn.clone())
        .set_s3_backup_mode(
            config
                .s3_backup_mode
                .as_deref()
                .map(sdk::HttpEndpointS3BackupMode::from),
        )
        .set_s3_update(config.s3_configuration.as_ref().map(s3_update).transpose()?)
        .set_secrets_manager_configuration(secrets)
        .build())
}

fn s3_update(config: &S3DestinationConfiguration) -> Result<sdk::S3DestinationUpdate, ProvisionerError> {
    Ok(sdk::S3DestinationUpdate::builder()
        .set_bucket_arn(config.bucket_arn.clone())
        .set_buffering_hints(config.buffering_hints.as_ref().map(buffering_hints).transpose()?)
        .set_cloud_watch_logging_options(
            config
                .cloud_watch_logging_options
                .as_ref()
                .map(cloud_watch_logging_options),
        )
        .set_compression_format(
            config
                .compression_format
                .as_deref()
                .map(sdk::CompressionFormat::from),
        )
        .set_encryption_configuration(
            config
                .encryption_configuration
                .as_ref()
                .map(s3_encryption_configuration)
                .transpose()?,
        )
        .set_error_output_prefix(config.error_output_prefix.clone())
        .set_prefix(config.prefix.clone())
        .set_role_arn(config.role_arn.clone())
        .build())
}

fn buffering_hints(hints: &BufferingHints) -> Result<sdk::BufferingHints, ProvisionerError> {
    Ok(sdk::BufferingHints::builder()
        .set_interval_in_seconds(to_i32(hints.interval_in_seconds, "IntervalInSeconds")?)
        .set_size_in_mbs(to_i32(hints.size_in_mbs, "SizeInMBs")?)
        .build())
}

fn cloud_watch_logging_options(options: &CloudWatchLoggingOptions) -> sdk::CloudWatchLoggingOptions {
    sdk::CloudWatchLoggingOptions::builder()
        .set_enabled(options.enabled)
        .set_log_group_name(options.log_group_name.clone())
        .set_log_stream_name(options.log_stream_name.clone())
        .build()
}

fn processing_configuration(
    config: &ProcessingConfiguration,
) -> Result<sdk::ProcessingConfiguration, ProvisionerError> {
    let processors = config
        .processors
        .iter()
        .map(|processor| {
            let parameters = processor
                .parameters
                .iter()
                .map(|param| {
                    sdk::ProcessorParameter::builder()
                        .parameter_name(sdk::ProcessorParameterName::from(
                            param.parameter_name.as_deref().unwrap_or_default(),
                        ))
                        .parameter_value(param.parameter_value.clone().unwrap_or_default())
                        .build()
                        .map_err(build_failed)
                })
                .collect::<Result<Vec<_>, _>>()?;

            sdk::Processor::builder()
                .r#type(sdk::ProcessorType::from(
                    processor.processor_type.as_deref().unwrap_or_default(),
                ))
                .set_parameters(Some(parameters))
                .build()
                .map_err(build_failed)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sdk::ProcessingConfiguration::builder()
        .set_enabled(config.enabled)
        .set_processors(Some(processors))
        .build())
}

fn s3_encryption_configuration(
    config: &S3EncryptionConfiguration,
) -> Result<sdk::EncryptionConfiguration, ProvisionerError> {
    let kms = config
        .kms_encryption_config
        .as_ref()
        .map(|kms| {
            sdk::KmsEncryptionConfig::builder()
                .awskms_key_arn(kms.awskms_key_arn.clone().unwrap_or_default())
                .build()
                .map_err(build_failed)
        })
        .transpose()?;

    Ok(sdk::EncryptionConfiguration::builder()
        .set_kms_encryption_config(kms)
        .set_no_encryption_config(
            config
                .no_encryption_config
                .as_deref()
                .map(sdk::NoEncryptionConfig::from),
        )
        .build())
}

fn to_i32(value: Option<i64>, field: &str) -> Result<Option<i32>, ProvisionerError> {
    value
        .map(i32::try_from)
        .transpose()
        .map_err(|_| ProvisionerError::UpdateFailed(format!("{field} is out of range")))
}

fn build_failed(err: aws_sdk_firehose::error::BuildError) -> ProvisionerError {
    ProvisionerError::UpdateFailed(format!("invalid request: {err}"))
}
