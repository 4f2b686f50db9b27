use std::fmt;

use crate::error::ProvisionerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Get,
    Update,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Update => "UPDATE",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for per-call API metrics. Called once per remote call attempt;
/// never influences control flow.
pub trait MetricsRecorder: Send + Sync {
    fn record_api_call(&self, op_type: OperationType, op_id: &str, error: Option<&ProvisionerError>);
}

/// Emits every call as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetrics;

impl MetricsRecorder for TracingMetrics {
    fn record_api_call(&self, op_type: OperationType, op_id: &str, error: Option<&ProvisionerError>) {
        match error {
            Some(e) => tracing::warn!(op_type = %op_type, op_id = %op_id, error = %e, "API call failed"),
            None => tracing::debug!(op_type = %op_type, op_id = %op_id, "API call succeeded"),
        }
    }
}
