//! Artifact download with optional MD5 verification.

use crate::client::RepositoryClient;
use crate::error::{ClientError, Result};
use common::path::normalize_remote_path;
use log::{debug, info};
use md5::{Digest, Md5};
use reqwest::StatusCode;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Result of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Bytes written to the destination file.
    pub bytes_written: u64,
    /// MD5 confirmed against the server record, when verification ran.
    pub verified_md5: Option<String>,
}

impl RepositoryClient {
    /// Download an artifact to `destination`.
    ///
    /// The destination's parent directory must already exist; nothing is
    /// sent over the network otherwise. With `verify_checksum` the bytes
    /// are hashed as they stream to disk and compared against the MD5 the
    /// server reports for the artifact.
    ///
    /// A download that fails mid-stream can leave a partial file at
    /// `destination`; the caller owns cleanup.
    pub async fn download_file(
        &self,
        repo_key: &str,
        remote_path: &str,
        destination: &Path,
        verify_checksum: bool,
    ) -> Result<DownloadOutcome> {
        if let Some(parent) = destination.parent() {
            // parent() yields an empty path for a bare filename, which
            // means the current directory.
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ClientError::DestinationMissing(parent.to_path_buf()));
            }
        }

        let url = self.item_url(repo_key, remote_path);
        debug!("GET {}", url);
        let mut response = self.http().get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        // File handle and connection both live inside this scope; every
        // exit path drops and closes them.
        let mut file = File::create(destination).await?;
        let mut hasher = verify_checksum.then(Md5::new);
        let mut bytes_written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            if let Some(hasher) = hasher.as_mut() {
                hasher.update(&chunk);
            }
            bytes_written += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);

        let verified_md5 = match hasher {
            Some(hasher) => Some(self.verify_md5(repo_key, remote_path, hasher).await?),
            None => None,
        };

        info!(
            "downloaded {}/{} ({} bytes)",
            repo_key,
            normalize_remote_path(remote_path),
            bytes_written
        );
        Ok(DownloadOutcome {
            bytes_written,
            verified_md5,
        })
    }

    /// Compare the streamed digest against the server-reported MD5.
    async fn verify_md5(&self, repo_key: &str, remote_path: &str, hasher: Md5) -> Result<String> {
        let actual = hex::encode(hasher.finalize());
        let info = self.file_info(repo_key, remote_path).await?;
        let expected =
            info.checksums
                .md5
                .ok_or_else(|| ClientError::ChecksumUnavailable {
                    repo_key: repo_key.to_string(),
                    remote_path: normalize_remote_path(remote_path).to_string(),
                })?;
        if actual != expected {
            return Err(ClientError::ChecksumMismatch { expected, actual });
        }
        Ok(actual)
    }
}
