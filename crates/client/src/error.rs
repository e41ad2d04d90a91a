use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by [`RepositoryClient`](crate::RepositoryClient) operations.
///
/// Precondition failures (`SourceMissing`, `DestinationMissing`,
/// `AlreadyExists`) are raised before any network traffic; the remaining
/// variants describe what went wrong on the wire or with the payload.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client construction failed (malformed credential, unbuildable sender).
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("local source file not found: {0}")]
    SourceMissing(PathBuf),

    #[error("destination directory does not exist: {0}")]
    DestinationMissing(PathBuf),

    #[error("file already exists at {repo_key}/{remote_path} (pass force to overwrite)")]
    AlreadyExists {
        repo_key: String,
        remote_path: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("server reported no md5 checksum for {repo_key}/{remote_path}")]
    ChecksumUnavailable {
        repo_key: String,
        remote_path: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
