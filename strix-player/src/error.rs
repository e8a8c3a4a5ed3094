//! Error types for strix-player
//!
//! Defines controller-specific error types using thiserror for clear error
//! propagation. Credential and stream-info errors surface to the host as a
//! full-screen error view; manifest errors never do (quality selection falls
//! back to the original URI silently).

use thiserror::Error;

/// Main error type for the playback controller
#[derive(Error, Debug)]
pub enum Error {
    /// Stored server credentials are absent or unreadable
    #[error("Missing credentials")]
    MissingCredentials,

    /// No stream id or direct URL was supplied for the session
    #[error("Missing stream info")]
    MissingStreamInfo,

    /// The media engine reported a failure loading or playing the source
    #[error("Source load error: {0}")]
    SourceLoad(String),

    /// Content is PIN-locked and not yet authorized this session
    #[error("Content {0} is locked")]
    LockedUnauthorized(i64),

    /// Operation is not valid for the session's current state or kind
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience Result type using the controller Error
pub type Result<T> = std::result::Result<T, Error>;
