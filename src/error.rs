//! Error types for pullstream
//!
//! Pulling fails when the handle has already handed its source to someone
//! else, or when a shared tee upstream is pulled from inside its own pull.

use thiserror::Error;

/// Main error type for stream operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The stream's source was taken by an earlier chaining, iteration or
    /// terminal call. Returned on every pull, not just the first one.
    #[error("Cannot use consumed stream")]
    Consumed,

    /// A shared source was pulled again from inside its own pull, and the
    /// element asked for is not buffered yet.
    #[error("Stream source pulled while already being pulled")]
    Reentrant,
}

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors raised while loading a [`StreamConfig`](crate::stream_configuration::StreamConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
