//! Error types for catalog operations.

use std::time::Duration;

use thiserror::Error;

/// Main error type for all catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Upstream answered with a non-2xx, non-429 status.
    #[error("Upstream request failed: {status} {message}")]
    UpstreamRequestFailed { status: u16, message: String },

    /// Upstream answered 429. Resolved internally by sleep-and-retry and
    /// never returned to callers of the public operations.
    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    /// A rate-limited operation ran out of attempts.
    #[error("Retries exhausted for {operation}")]
    RetriesExhausted { operation: String },

    /// More ids were passed to a single batch lookup than upstream accepts.
    #[error("Batch size {requested} exceeds the limit of {limit}")]
    BatchSizeExceeded { requested: usize, limit: usize },

    /// Input could not be understood as a catalog link or id.
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
