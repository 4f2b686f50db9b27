use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::destination::DestinationConfiguration;

/// One reconciliation subject: the user-declared spec plus the
/// remote-reported status.
///
/// Desired and observed snapshots are both `Resource`s. The desired side
/// usually carries a default status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    pub spec: ResourceSpec,
    #[serde(default)]
    pub status: ResourceStatus,
}

impl Resource {
    pub fn new(spec: ResourceSpec) -> Self {
        Self {
            spec,
            status: ResourceStatus::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.delivery_stream_name
    }
}

/// Desired configuration of a delivery stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceSpec {
    /// Immutable once the stream exists.
    pub delivery_stream_name: String,
    /// Immutable, e.g. "DirectPut".
    pub delivery_stream_type: Option<String>,
    pub encryption_configuration: Option<EncryptionConfiguration>,
    pub destination_configuration: Option<DestinationConfiguration>,
    pub tags: Vec<Tag>,
}

impl ResourceSpec {
    /// Reject specs the reconciler cannot act on.
    ///
    /// A stream always has exactly one destination, so one must be declared.
    /// Tag keys must be unique: a duplicate makes the add/remove split
    /// ambiguous, so it is reported instead of picking a winner.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.delivery_stream_name.is_empty() {
            return Err(CoreError::MissingField("DeliveryStreamName".into()));
        }
        if self.destination_configuration.is_none() {
            return Err(CoreError::MissingField("DestinationConfiguration".into()));
        }

        let mut seen = HashSet::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !seen.insert(tag.key.as_str()) {
                return Err(CoreError::DuplicateTagKey(tag.key.clone()));
            }
        }

        Ok(())
    }

    /// Parse a desired spec from JSON and validate it.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        let spec: Self = serde_json::from_slice(bytes)?;
        spec.validate()?;
        Ok(spec)
    }
}

/// Server-side encryption for the stream itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EncryptionConfiguration {
    pub key_type: Option<KeyType>,
    #[serde(rename = "KeyARN")]
    pub key_arn: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyType {
    AwsOwnedCmk,
    CustomerManagedCmk,
}

impl KeyType {
    pub const ALL: [Self; 2] = [Self::AwsOwnedCmk, Self::CustomerManagedCmk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwsOwnedCmk => "AWS_OWNED_CMK",
            Self::CustomerManagedCmk => "CUSTOMER_MANAGED_CMK",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "KeyType",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Observed, remote-reported fields. Overwritten wholesale on every read;
/// never set from the desired spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceStatus {
    pub delivery_stream_status: Option<StreamStatus>,
    pub encryption_status: Option<EncryptionStatus>,
    #[serde(rename = "DeliveryStreamARN")]
    pub delivery_stream_arn: Option<String>,
    /// Required by `UpdateDestination` for optimistic concurrency.
    pub version_id: Option<String>,
    pub destination_id: Option<String>,
    pub create_timestamp: Option<jiff::Timestamp>,
    pub last_update_timestamp: Option<jiff::Timestamp>,
}

/// Lifecycle phase of the stream: `CREATING -> ACTIVE -> DELETING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamStatus {
    Creating,
    CreatingFailed,
    Active,
    Deleting,
    DeletingFailed,
}

impl StreamStatus {
    pub const ALL: [Self; 5] = [
        Self::Creating,
        Self::CreatingFailed,
        Self::Active,
        Self::Deleting,
        Self::DeletingFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creating => "CREATING",
            Self::CreatingFailed => "CREATING_FAILED",
            Self::Active => "ACTIVE",
            Self::Deleting => "DELETING",
            Self::DeletingFailed => "DELETING_FAILED",
        }
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "StreamStatus",
                value: s.to_string(),
            })
    }
}

/// Phase of the stream's server-side encryption.
///
/// `DISABLED <-> ENABLING -> ENABLED` and `ENABLED <-> DISABLING -> DISABLED`;
/// every arrow is an asynchronous remote transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncryptionStatus {
    Enabled,
    Enabling,
    EnablingFailed,
    Disabled,
    Disabling,
    DisablingFailed,
}

impl EncryptionStatus {
    pub const ALL: [Self; 6] = [
        Self::Enabled,
        Self::Enabling,
        Self::EnablingFailed,
        Self::Disabled,
        Self::Disabling,
        Self::DisablingFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "ENABLED",
            Self::Enabling => "ENABLING",
            Self::EnablingFailed => "ENABLING_FAILED",
            Self::Disabled => "DISABLED",
            Self::Disabling => "DISABLING",
            Self::DisablingFailed => "DISABLING_FAILED",
        }
    }

    /// True while the remote side is still moving between enabled/disabled.
    pub fn is_transitional(&self) -> bool {
        matches!(self, Self::Enabling | Self::Disabling)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::EnablingFailed | Self::DisablingFailed)
    }
}

impl fmt::Display for EncryptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncryptionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "EncryptionStatus",
                value: s.to_string(),
            })
    }
}
