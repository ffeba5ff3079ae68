use thiserror::Error;

/// Errors that can occur while ranking an edge list.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// An edge record could not be turned into a (source, target) pair.
    ///
    /// `record` is 1-based (a line number when the record came from text).
    #[error("Malformed input at record {record}: {reason}")]
    MalformedInput { record: usize, reason: String },
    /// A vector's length does not match the transition operator's dimension.
    #[error("Dimension mismatch: operator has dimension {expected}, vector has length {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// A configuration value is outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn malformed(record: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            record,
            reason: reason.into(),
        }
    }
}

/// Result type alias for edge-rank.
pub type Result<T> = std::result::Result<T, Error>;

/// Fail with [`Error::DimensionMismatch`] unless `actual == expected`.
#[inline]
pub(crate) fn ensure_dim(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, actual })
    }
}
