//! Artifact upload from local files or re-streamed remote URLs.

use crate::client::RepositoryClient;
use crate::error::{ClientError, Result};
use common::path::normalize_remote_path;
use common::FileInfo;
use log::{debug, info};
use reqwest::{Body, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Source of the bytes for an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// An `http(s)://` URL fetched and re-streamed through the client.
    Remote(String),
}

impl UploadSource {
    /// Classify a source string: an `http(s)://` prefix means remote,
    /// anything else is a local path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            UploadSource::Remote(source.to_string())
        } else {
            UploadSource::Local(PathBuf::from(source))
        }
    }
}

impl From<&Path> for UploadSource {
    fn from(path: &Path) -> Self {
        UploadSource::Local(path.to_path_buf())
    }
}

impl From<PathBuf> for UploadSource {
    fn from(path: PathBuf) -> Self {
        UploadSource::Local(path)
    }
}

impl RepositoryClient {
    /// Upload an artifact to `repo_key`/`remote_path`.
    ///
    /// A local source must exist on disk before anything is sent. The
    /// destination is then probed; uploading over an existing artifact
    /// requires `force`. On success the server answers 201 with the
    /// creation record.
    ///
    /// The probe and the PUT are two separate requests, so a concurrent
    /// writer can still create the destination in between; the server's
    /// response decides the outcome in that window.
    pub async fn upload_file(
        &self,
        repo_key: &str,
        remote_path: &str,
        source: UploadSource,
        force: bool,
    ) -> Result<FileInfo> {
        if let UploadSource::Local(path) = &source {
            if !path.exists() {
                return Err(ClientError::SourceMissing(path.clone()));
            }
        }

        if self.file_exists(repo_key, remote_path).await? && !force {
            return Err(ClientError::AlreadyExists {
                repo_key: repo_key.to_string(),
                remote_path: normalize_remote_path(remote_path).to_string(),
            });
        }

        let body = self.source_body(&source).await?;
        let url = self.storage_url(repo_key, remote_path);
        debug!("PUT {}", url);
        let response = self
            .send_expecting(self.http().put(&url).body(body), StatusCode::CREATED)
            .await?;
        let created: FileInfo = Self::json_body(response).await?;

        info!(
            "uploaded {}/{}",
            repo_key,
            normalize_remote_path(remote_path)
        );
        Ok(created)
    }

    /// Open the source as a streaming request body.
    async fn source_body(&self, source: &UploadSource) -> Result<Body> {
        match source {
            UploadSource::Local(path) => {
                let file = File::open(path).await?;
                Ok(Body::from(file))
            }
            UploadSource::Remote(url) => {
                debug!("GET {} (upload source)", url);
                // Fetched with the credential-free sender; the upstream
                // server is not the repository.
                let upstream = self.external().get(url).send().await?;
                let status = upstream.status();
                if status != StatusCode::OK {
                    return Err(ClientError::UnexpectedStatus(status.as_u16()));
                }
                Ok(Body::wrap_stream(upstream.bytes_stream()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_sources() {
        assert_eq!(
            UploadSource::parse("http://mirror.example.com/pkg.tar.gz"),
            UploadSource::Remote("http://mirror.example.com/pkg.tar.gz".to_string())
        );
        assert_eq!(
            UploadSource::parse("https://mirror.example.com/pkg.tar.gz"),
            UploadSource::Remote("https://mirror.example.com/pkg.tar.gz".to_string())
        );
    }

    #[test]
    fn test_parse_local_sources() {
        assert_eq!(
            UploadSource::parse("/tmp/pkg.tar.gz"),
            UploadSource::Local(PathBuf::from("/tmp/pkg.tar.gz"))
        );
        // Other schemes are not recognized and fall through to local.
        assert_eq!(
            UploadSource::parse("ftp://mirror.example.com/pkg.tar.gz"),
            UploadSource::Local(PathBuf::from("ftp://mirror.example.com/pkg.tar.gz"))
        );
    }
}
