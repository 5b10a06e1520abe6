//! Upload error types.

use std::path::PathBuf;
use std::time::Duration;

/// Failure while uploading a single asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("invalid upload url")]
    InvalidUrl(#[from] url::ParseError),
    /// Path has no final component to use as the asset name (e.g. `..`).
    /// Such paths are rejected instead of uploading an asset literally named `..`.
    #[error("cannot derive asset name from path")]
    NoFileName,
    #[error("open")]
    Open(#[source] std::io::Error),
    #[error("read")]
    Read(#[source] std::io::Error),
    /// Curl reported an error (connection, DNS, TLS, etc.).
    #[error("request failed")]
    Curl(#[from] curl::Error),
    /// The transfer did not complete within the per-upload limit.
    #[error("timed out after {}s", .limit.as_secs())]
    Timeout {
        limit: Duration,
        #[source]
        source: curl::Error,
    },
    /// Anything other than 201 Created.
    #[error("unexpected response status: {0:?}")]
    Status(String),
}

impl AssetError {
    /// Maps a failed `perform()` into a timeout or a generic transport error.
    pub(crate) fn from_transfer(e: curl::Error, limit: Duration) -> Self {
        if e.is_operation_timedout() {
            AssetError::Timeout { limit, source: e }
        } else {
            AssetError::Curl(e)
        }
    }
}

/// An asset upload failed; carries the path as given on input.
#[derive(Debug, thiserror::Error)]
#[error("{path:?} upload")]
pub struct UploadError {
    pub path: PathBuf,
    #[source]
    pub source: AssetError,
}
