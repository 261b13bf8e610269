//! Error types for the orderseries library.

use thiserror::Error;

/// Result type alias for preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Errors that can occur while preparing order timeseries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Rolling window is too small or does not fit the sequence.
    #[error("invalid window: width {window} for a sequence of length {len}")]
    InvalidWindow { window: usize, len: usize },

    /// A scalar or text value was passed where a sequence is required.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A date field could not be parsed.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Frequency inference failed.
    #[error("could not infer frequency: {0}")]
    FrequencyInference(String),

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Correction of a single article column failed.
    #[error("article {article:?} failed: {source}")]
    ColumnFailed {
        article: String,
        #[source]
        source: Box<PrepError>,
    },
}

impl PrepError {
    /// Wrap an error with the article column it came from.
    pub fn in_column(self, article: impl Into<String>) -> Self {
        PrepError::ColumnFailed {
            article: article.into(),
            source: Box::new(self),
        }
    }
}
