//! Error types for the `logs` pipeline

/// Metadata and a log record disagree on the value of the same key.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("conflicting values while merging metadata at `{path}`")]
pub struct MergeConflict {
    /// Dotted path of the conflicting key, e.g. `aws.function_version`
    pub path: String,
}

/// Failures turning the `awslogs.data` field back into a payload
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid gzip stream: {0}")]
    Gzip(#[from] std::io::Error),
    #[error("invalid log delivery payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of a single forwarder invocation
#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    /// The event does not carry the expected `awslogs.data` envelope
    #[error("not an awslogs event: {0}")]
    Input(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    MergeConflict(#[from] MergeConflict),
    /// The log group or timestamp can't produce an object key
    #[error("unable to derive object key: {0}")]
    KeyDerivation(String),
    #[error("failed to upload logs: {0}")]
    Upload(String),
}
