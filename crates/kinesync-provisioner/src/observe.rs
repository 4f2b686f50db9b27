//! Read path: fold a `DescribeDeliveryStream` response into an observed
//! [`Resource`].

use kinesync_core::models::description::{
    DeliveryStreamDescription, EncryptionConfigurationDescription,
};
use kinesync_core::{EncryptionConfiguration, EncryptionStatus, Resource, ResourceStatus};

use crate::destination::{self, overwrite};

/// Overwrite `resource` with everything the description reports.
///
/// Status is replaced wholesale. Encryption is replaced, since the remote
/// side is authoritative for it. Destinations are merged. Tags are not part
/// of the description and are left untouched.
pub fn read_description(resource: &mut Resource, description: &DeliveryStreamDescription) {
    let spec = &mut resource.spec;

    if let Some(name) = &description.delivery_stream_name {
        spec.delivery_stream_name = name.clone();
    }
    overwrite(
        &mut spec.delivery_stream_type,
        description.delivery_stream_type.as_ref(),
    );

    spec.encryption_configuration = description
        .delivery_stream_encryption_configuration
        .as_ref()
        .and_then(read_encryption_configuration);

    destination::set_destinations(spec, description);

    resource.status = read_status(description);
}

/// The status fields of a description. Never merged with a previous status.
pub fn read_status(description: &DeliveryStreamDescription) -> ResourceStatus {
    ResourceStatus {
        delivery_stream_status: description.delivery_stream_status,
        encryption_status: description
            .delivery_stream_encryption_configuration
            .as_ref()
            .and_then(|e| e.status),
        delivery_stream_arn: description.delivery_stream_arn.clone(),
        version_id: description.version_id.clone(),
        destination_id: destination::first_destination(description)
            .and_then(|d| d.destination_id.clone()),
        create_timestamp: description.create_timestamp,
        last_update_timestamp: description.last_update_timestamp,
    }
}

/// A disabled stream may still report its last key; that key is not in
/// effect and must not read as desired encryption.
fn read_encryption_configuration(
    remote: &EncryptionConfigurationDescription,
) -> Option<EncryptionConfiguration> {
    if let Some(status) = remote.status.filter(EncryptionStatus::is_failed) {
        let failure = remote.failure_description.as_ref();
        tracing::warn!(
            status = %status,
            failure_type = failure.and_then(|f| f.failure_type.as_deref()).unwrap_or("unknown"),
            details = failure.and_then(|f| f.details.as_deref()).unwrap_or(""),
            "server-side encryption transition failed"
        );
    }
    if remote.status == Some(EncryptionStatus::Disabled) {
        return None;
    }

    Some(EncryptionConfiguration {
        key_type: remote.key_type,
        key_arn: remote.key_arn.clone(),
    })
}
