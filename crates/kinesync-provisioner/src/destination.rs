//! Destination normalizer.
//!
//! `DescribeDeliveryStream` reports destinations as a list whose single
//! entry has one populated `*Description` slot. This module folds that entry
//! back into the spec's `DestinationConfiguration`.
//!
//! The projection is a merge: only remote leaves that are present overwrite
//! the spec, so fields the remote side never echoes back (e.g. the endpoint
//! access key) survive the read.

use kinesync_core::ResourceSpec;
use kinesync_core::models::description::{
    DeliveryStreamDescription, DestinationDescription, HttpEndpointDescription,
    HttpEndpointDestinationDescription, HttpEndpointRequestConfigurationDescription,
    ProcessingConfigurationDescription, S3DestinationDescription,
};
use kinesync_core::models::destination::{
    BufferingHints, CloudWatchLoggingOptions, DestinationConfiguration, HttpEndpointConfiguration,
    HttpEndpointDestinationConfiguration, HttpEndpointRequestConfiguration,
    HttpEndpointRetryOptions, ProcessingConfiguration, S3DestinationConfiguration,
    S3EncryptionConfiguration, SecretsManagerConfiguration,
};

/// The destination a stream delivers to.
///
/// The remote side returns a list but a stream has exactly one destination,
/// so the first entry wins. `None` means the stream has not settled on a
/// destination yet.
pub fn first_destination(description: &DeliveryStreamDescription) -> Option<&DestinationDescription> {
    description.destinations.first()
}

/// Merge the remote destination into `spec`. No destinations is a no-op.
pub fn set_destinations(spec: &mut ResourceSpec, description: &DeliveryStreamDescription) {
    let Some(destination) = first_destination(description) else {
        return;
    };

    if description.destinations.len() > 1 || description.has_more_destinations {
        tracing::warn!(
            stream = %spec.delivery_stream_name,
            count = description.destinations.len(),
            "more than one destination reported, using the first"
        );
    }

    if let Some(http) = &destination.http_endpoint_destination_description {
        read_http_endpoint_destination(&mut spec.destination_configuration, http);
    } else if let Some(s3) = &destination.s3_destination_description {
        read_s3_destination(&mut spec.destination_configuration, s3);
    }
}

fn read_http_endpoint_destination(
    target: &mut Option<DestinationConfiguration>,
    remote: &HttpEndpointDestinationDescription,
) {
    // A different destination kind is replaced, not merged.
    let mut config = match target.take() {
        Some(DestinationConfiguration::HttpEndpoint(config)) => config,
        _ => HttpEndpointDestinationConfiguration::default(),
    };

    overwrite(&mut config.s3_backup_mode, remote.s3_backup_mode.as_ref());
    overwrite(&mut config.role_arn, remote.role_arn.as_ref());

    read_buffering_hints(&mut config.buffering_hints, remote.buffering_hints.as_ref());
    read_endpoint_configuration(
        &mut config.endpoint_configuration,
        remote.endpoint_configuration.as_ref(),
    );
    read_retry_options(&mut config.retry_options, remote.retry_options.as_ref());
    read_cloud_watch_logging_options(
        &mut config.cloud_watch_logging_options,
        remote.cloud_watch_logging_options.as_ref(),
    );
    read_processing_configuration(
        &mut config.processing_configuration,
        remote.processing_configuration.as_ref(),
    );
    read_request_configuration(
        &mut config.request_configuration,
        remote.request_configuration.as_ref(),
    );
    read_s3_destination_description(
        &mut config.s3_configuration,
        remote.s3_destination_description.as_ref(),
    );
    read_secrets_manager_configuration(
        &mut config.secrets_manager_configuration,
        remote.secrets_manager_configuration.as_ref(),
    );

    *target = Some(DestinationConfiguration::HttpEndpoint(config));
}

fn read_s3_destination(target: &mut Option<DestinationConfiguration>, remote: &S3DestinationDescription) {
    let mut config = match target.take() {
        Some(DestinationConfiguration::S3(config)) => Some(config),
        _ => None,
    };
    read_s3_destination_description(&mut config, Some(remote));
    *target = config.map(DestinationConfiguration::S3);
}

fn read_buffering_hints(target: &mut Option<BufferingHints>, remote: Option<&BufferingHints>) {
    let Some(remote) = remote else {
        return;
    };

    let hints = target.get_or_insert_with(Default::default);
    overwrite(&mut hints.interval_in_seconds, remote.interval_in_seconds.as_ref());
    overwrite(&mut hints.size_in_mbs, remote.size_in_mbs.as_ref());
}

fn read_endpoint_configuration(
    target: &mut Option<HttpEndpointConfiguration>,
    remote: Option<&HttpEndpointDescription>,
) {
    let Some(remote) = remote else {
        return;
    };

    let endpoint = target.get_or_insert_with(Default::default);
    overwrite(&mut endpoint.name, remote.name.as_ref());
    overwrite(&mut endpoint.url, remote.url.as_ref());
}

fn read_retry_options(
    target: &mut Option<HttpEndpointRetryOptions>,
    remote: Option<&HttpEndpointRetryOptions>,
) {
    let Some(remote) = remote else {
        return;
    };

    let retry = target.get_or_insert_with(Default::default);
    overwrite(&mut retry.duration_in_seconds, remote.duration_in_seconds.as_ref());
}

fn read_cloud_watch_logging_options(
    target: &mut Option<CloudWatchLoggingOptions>,
    remote: Option<&CloudWatchLoggingOptions>,
) {
    let Some(remote) = remote else {
        return;
    };

    let logging = target.get_or_insert_with(Default::default);
    overwrite(&mut logging.enabled, remote.enabled.as_ref());
    overwrite(&mut logging.log_group_name, remote.log_group_name.as_ref());
    overwrite(&mut logging.log_stream_name, remote.log_stream_name.as_ref());
}

/// Processor order is execution order, so a reported list replaces ours
/// as a whole, even when it is empty.
fn read_processing_configuration(
    target: &mut Option<ProcessingConfiguration>,
    remote: Option<&ProcessingConfigurationDescription>,
) {
    let Some(remote) = remote else {
        return;
    };

    let processing = target.get_or_insert_with(Default::default);
    overwrite(&mut processing.enabled, remote.enabled.as_ref());
    if let Some(processors) = &remote.processors {
        processing.processors = processors.clone();
    }
}

fn read_request_configuration(
    target: &mut Option<HttpEndpointRequestConfiguration>,
    remote: Option<&HttpEndpointRequestConfigurationDescription>,
) {
    let Some(remote) = remote else {
        return;
    };

    let request = target.get_or_insert_with(Default::default);
    overwrite(&mut request.content_encoding, remote.content_encoding.as_ref());
    if let Some(attributes) = &remote.common_attributes {
        request.common_attributes = attributes.clone();
    }
}

fn read_s3_destination_description(
    target: &mut Option<S3DestinationConfiguration>,
    remote: Option<&S3DestinationDescription>,
) {
    let Some(remote) = remote else {
        return;
    };

    let s3 = target.get_or_insert_with(Default::default);
    overwrite(&mut s3.bucket_arn, remote.bucket_arn.as_ref());
    read_buffering_hints(&mut s3.buffering_hints, remote.buffering_hints.as_ref());
    overwrite(&mut s3.compression_format, remote.compression_format.as_ref());
    read_s3_encryption_configuration(
        &mut s3.encryption_configuration,
        remote.encryption_configuration.as_ref(),
    );
    overwrite(&mut s3.role_arn, remote.role_arn.as_ref());
    read_cloud_watch_logging_options(
        &mut s3.cloud_watch_logging_options,
        remote.cloud_watch_logging_options.as_ref(),
    );
    overwrite(&mut s3.error_output_prefix, remote.error_output_prefix.as_ref());
    overwrite(&mut s3.prefix, remote.prefix.as_ref());
}

fn read_s3_encryption_configuration(
    target: &mut Option<S3EncryptionConfiguration>,
    remote: Option<&S3EncryptionConfiguration>,
) {
    let Some(remote) = remote else {
        return;
    };

    let encryption = target.get_or_insert_with(Default::default);
    if let Some(kms) = &remote.kms_encryption_config {
        let target_kms = encryption
            .kms_encryption_config
            .get_or_insert_with(Default::default);
        overwrite(&mut target_kms.awskms_key_arn, kms.awskms_key_arn.as_ref());
    }
    overwrite(
        &mut encryption.no_encryption_config,
        remote.no_encryption_config.as_ref(),
    );
}

fn read_secrets_manager_configuration(
    target: &mut Option<SecretsManagerConfiguration>,
    remote: Option<&SecretsManagerConfiguration>,
) {
    let Some(remote) = remote else {
        return;
    };

    let secrets = target.get_or_insert_with(Default::default);
    overwrite(&mut secrets.enabled, remote.enabled.as_ref());
    overwrite(&mut secrets.role_arn, remote.role_arn.as_ref());
    overwrite(&mut secrets.secret_arn, remote.secret_arn.as_ref());
}

/// Replace `target` only when the remote side reported a value.
pub(crate) fn overwrite<T: Clone>(target: &mut Option<T>, remote: Option<&T>) {
    if let Some(value) = remote {
        *target = Some(value.clone());
    }
}
