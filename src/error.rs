use thiserror::Error;

/// Failures surfaced synchronously to whoever triggered the propagation.
///
/// Nothing in this crate retries; a failing event handler reports back up
/// the chain to the mutating call on the source.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A structural event arrived that a well-formed source never emits
    /// (empty payload, index outside the store, duplicate identity).
    #[error("contract violation: {reason}")]
    ContractViolation { reason: String },

    /// A sorted view could not locate the key of an item leaving it.
    #[error("item {item} not found in sorted view")]
    NotFound { item: String },

    /// Structural mutation attempted on a read-only projection.
    #[error("operation `{operation}` is not supported on a read-only view")]
    UnsupportedOperation { operation: &'static str },

    #[error("index {index} out of range (len={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;

impl ViewError {
    pub(crate) fn contract(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(%reason, "structural event rejected");
        ViewError::ContractViolation { reason }
    }

    pub(crate) fn not_found(item: impl std::fmt::Debug) -> Self {
        let item = format!("{:?}", item);
        tracing::warn!(%item, "sorted view lookup failed");
        ViewError::NotFound { item }
    }

    pub(crate) fn unsupported(operation: &'static str) -> Self {
        ViewError::UnsupportedOperation { operation }
    }
}
