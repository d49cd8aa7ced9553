/// Convenience result type used across clipweave.
pub type ClipweaveResult<T> = Result<T, ClipweaveError>;

/// Top-level error taxonomy used by operator constructors and frame production.
#[derive(thiserror::Error, Debug)]
pub enum ClipweaveError {
    /// Mutually exclusive parameters were both supplied, or a parameter set is malformed.
    #[error("parameter conflict: {0}")]
    Conflict(String),

    /// A negative index, or an index beyond the end of a clip.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A merged frame or sample count does not fit the representable range.
    #[error("overflow: {0}")]
    Overflow(String),

    /// Upstream clip descriptors are incompatible.
    #[error("mismatch: {0}")]
    Mismatch(String),

    /// The operation would produce no output frames.
    #[error("degenerate result: {0}")]
    Degenerate(String),

    /// The host or a source broke the production contract.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A source clip failed to produce a frame.
    #[error("source error: {0}")]
    Source(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClipweaveError {
    /// Build a [`ClipweaveError::Conflict`] value.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Build a [`ClipweaveError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build a [`ClipweaveError::Overflow`] value.
    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    /// Build a [`ClipweaveError::Mismatch`] value.
    pub fn mismatch(msg: impl Into<String>) -> Self {
        Self::Mismatch(msg.into())
    }

    /// Build a [`ClipweaveError::Degenerate`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::Degenerate(msg.into())
    }

    /// Build a [`ClipweaveError::Protocol`] value.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Build a [`ClipweaveError::Source`] value.
    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
