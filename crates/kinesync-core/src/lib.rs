//! kinesync-core
//!
//! Pure domain types for a delivery stream: the desired spec, the observed
//! status, and the remote `DescribeDeliveryStream` read model.
//! No AWS SDK dependency; this is the shared vocabulary of the kinesync crates.

pub mod error;
pub mod models;

pub use crate::error::CoreError;
pub use crate::models::description::DeliveryStreamDescription;
pub use crate::models::destination::DestinationConfiguration;
pub use crate::models::resource::{
    EncryptionConfiguration, EncryptionStatus, KeyType, Resource, ResourceSpec, ResourceStatus,
    StreamStatus, Tag,
};
