//! kinesync-provisioner
//!
//! Reconciliation engine for a single delivery stream. A pass compares the
//! desired spec against the stream's observed state and issues only the
//! remote calls needed to close the gap, deferring while the stream is in a
//! transitional state.
//!
//! Public API:
//! - [`DeliveryStreamSyncer::reconcile`]: describe, observe, then update
//! - [`DeliveryStreamSyncer::observe`]: fold a description and tags into an observed snapshot
//! - [`DeliveryStreamSyncer::update`]: delta, guard, then tags, encryption and destination
//! - [`delta::compare`]: path-addressable structural diff of two snapshots

pub mod aws;
pub mod client;
pub mod config;
pub mod delta;
pub mod destination;
pub mod dry_run;
pub mod error;
pub mod guard;
pub mod metrics;
pub mod observe;
pub mod orchestrate;
pub mod requeue;
mod sdk_read;
pub mod tags;

pub use crate::aws::FirehoseClient;
pub use crate::client::DeliveryStreamClient;
pub use crate::config::{SyncConfig, build_aws_config};
pub use crate::delta::{Delta, Difference, compare};
pub use crate::dry_run::{DryRunClient, PlannedCall};
pub use crate::error::ProvisionerError;
pub use crate::metrics::{MetricsRecorder, OperationType, TracingMetrics};
pub use crate::orchestrate::{DeliveryStreamSyncer, SyncOutcome};
pub use crate::requeue::{Requeue, RequeueReason};
pub use crate::tags::TagDelta;
