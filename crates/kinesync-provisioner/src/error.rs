use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionerError {
    #[error("AWS error: {0}")]
    Aws(String),

    #[error("delivery stream update failed: {0}")]
    UpdateFailed(String),

    #[error("immutable field changed: {path}")]
    ImmutableFieldChanged { path: String },

    #[error("observed status is missing {0}")]
    MissingStatus(&'static str),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProvisionerError {
    /// Prepend the remote operation and stream name to the error message.
    pub fn with_operation(self, operation: &str, stream: &str) -> Self {
        match self {
            Self::Aws(msg) => Self::Aws(format!("{operation} ({stream}): {msg}")),
            Self::UpdateFailed(msg) => Self::UpdateFailed(format!("{operation} ({stream}): {msg}")),
            other => other,
        }
    }
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
