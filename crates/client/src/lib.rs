//! Asynchronous client for a binary-artifact repository server.
//!
//! The client speaks the repository's HTTP surface: metadata lookup,
//! existence probes, deletion, and streaming upload/download with optional
//! MD5 verification. Servers come in two generations with incompatible URL
//! roots; [`RepositoryClient::detect_api_version`] probes both and pins the
//! right one for the rest of the client's lifetime.
//!
//! Note that TLS certificate verification is DISABLED by default, matching
//! the long-standing behavior of the deployments this client talks to. Use
//! [`ClientConfig::with_tls_verification`] to turn it back on.

mod client;
mod config;
mod download;
mod error;
mod root;
mod upload;

pub use client::RepositoryClient;
pub use config::{basic_credential, ClientConfig, DEFAULT_API_VERSION};
pub use download::DownloadOutcome;
pub use error::{ClientError, Result};
pub use root::ApiRoot;
pub use upload::UploadSource;

pub use common::{Checksums, FileInfo, VersionInfo};
