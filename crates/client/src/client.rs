//! The repository client and its shared request plumbing.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::root::ApiRoot;
use common::path::normalize_remote_path;
use common::{FileInfo, VersionInfo};
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Asynchronous client for one artifact-repository server.
///
/// Construction wires up a preconfigured sender carrying the basic-auth
/// header; after that the client holds no per-call mutable state, so a
/// single instance can serve many concurrent operations. The API root is
/// the one exception: [`detect_api_version`](Self::detect_api_version)
/// rewrites it once, through `&mut self`, and every later request uses the
/// resolved root.
pub struct RepositoryClient {
    /// Sender with the credential attached; used for every repository request.
    http: Client,
    /// Bare sender for fetching third-party upload sources, so the
    /// repository credential never leaves the repository.
    external: Client,
    base_url: String,
    api_root: ApiRoot,
}

impl RepositoryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Basic {}", config.credential))
            .map_err(|e| ClientError::Config(format!("invalid credential: {}", e)))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Self::build_sender(&config, Some(headers))?;
        let external = Self::build_sender(&config, None)?;

        Ok(Self {
            http,
            external,
            base_url: config.base_url,
            api_root: config.api_root,
        })
    }

    fn build_sender(config: &ClientConfig, headers: Option<HeaderMap>) -> Result<Client> {
        let mut builder =
            Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(headers) = headers {
            builder = builder.default_headers(headers);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(ClientError::Transport)
    }

    /// Currently resolved API root.
    pub fn api_root(&self) -> ApiRoot {
        self.api_root
    }

    /// Probe the server generation and pin the API root.
    ///
    /// The version endpoint is tried under each candidate root in order;
    /// the first one answering 200 with a parseable body wins and fixes the
    /// root for all subsequent requests. Each attempt targets a different
    /// URL, so this is a fallback chain, not a retry. If every candidate
    /// fails, the last attempt's error propagates.
    pub async fn detect_api_version(&mut self) -> Result<String> {
        let candidates = ApiRoot::candidates();
        let last = candidates.len() - 1;
        for (i, root) in candidates.into_iter().enumerate() {
            match self.probe_version(root).await {
                Ok(version) => {
                    info!("server version {} under {:?} root", version.version, root);
                    self.api_root = root;
                    return Ok(version.version);
                }
                Err(e) if i == last => return Err(e),
                Err(e) => debug!("version probe failed under {:?} root: {}", root, e),
            }
        }
        unreachable!("candidate root list is never empty")
    }

    async fn probe_version(&self, root: ApiRoot) -> Result<VersionInfo> {
        let url = format!("{}{}/api/system/version", self.base_url, root.prefix());
        debug!("GET {}", url);
        let response = self.send_expecting(self.http.get(&url), StatusCode::OK).await?;
        Self::json_body(response).await
    }

    /// Fetch the stored metadata for an artifact.
    pub async fn file_info(&self, repo_key: &str, remote_path: &str) -> Result<FileInfo> {
        let url = self.storage_url(repo_key, remote_path);
        debug!("GET {}", url);
        let response = self.send_expecting(self.http.get(&url), StatusCode::OK).await?;
        Self::json_body(response).await
    }

    /// Probe whether an artifact exists. 200 means yes, 404 means no; any
    /// other status is an error. No body is read.
    pub async fn file_exists(&self, repo_key: &str, remote_path: &str) -> Result<bool> {
        let url = self.item_url(repo_key, remote_path);
        debug!("HEAD {}", url);
        let response = self.http.head(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(ClientError::UnexpectedStatus(other.as_u16())),
        }
    }

    /// Delete an artifact. The server answers 204 on success.
    pub async fn delete_item(&self, repo_key: &str, remote_path: &str) -> Result<()> {
        let url = self.item_url(repo_key, remote_path);
        debug!("DELETE {}", url);
        self.send_expecting(self.http.delete(&url), StatusCode::NO_CONTENT)
            .await?;
        info!("deleted {}/{}", repo_key, normalize_remote_path(remote_path));
        Ok(())
    }

    /// Low-level request primitive shared by every operation: send and
    /// enforce the one status code the operation accepts.
    pub(crate) async fn send_expecting(
        &self,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status != expected {
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }
        Ok(response)
    }

    /// Read the body as text and parse it as JSON, so a malformed body maps
    /// to [`ClientError::Parse`] rather than a transport error.
    pub(crate) async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Authenticated sender, shared with the transfer operations.
    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Credential-free sender for third-party upload sources.
    pub(crate) fn external(&self) -> &Client {
        &self.external
    }

    /// Metadata and deployment endpoint: `<root>/api/storage/<repo>/<path>`.
    pub(crate) fn storage_url(&self, repo_key: &str, remote_path: &str) -> String {
        format!(
            "{}{}/api/storage/{}/{}",
            self.base_url,
            self.api_root.prefix(),
            repo_key,
            normalize_remote_path(remote_path)
        )
    }

    /// The artifact itself: `<root>/<repo>/<path>`.
    pub(crate) fn item_url(&self, repo_key: &str, remote_path: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.base_url,
            self.api_root.prefix(),
            repo_key,
            normalize_remote_path(remote_path)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_root(root: ApiRoot) -> RepositoryClient {
        let config = ClientConfig::new("https://repo.example.com/", "token")
            .with_api_version(match root {
                ApiRoot::Modern => 4,
                ApiRoot::Legacy => 3,
            });
        RepositoryClient::new(config).unwrap()
    }

    #[test]
    fn test_modern_urls() {
        let client = client_with_root(ApiRoot::Modern);
        assert_eq!(
            client.storage_url("libs-release", "/org/acme/app.jar"),
            "https://repo.example.com/api/storage/libs-release/org/acme/app.jar"
        );
        assert_eq!(
            client.item_url("libs-release", "org/acme/app.jar"),
            "https://repo.example.com/libs-release/org/acme/app.jar"
        );
    }

    #[test]
    fn test_legacy_urls() {
        let client = client_with_root(ApiRoot::Legacy);
        assert_eq!(
            client.storage_url("libs-release", "org/acme/app.jar"),
            "https://repo.example.com/artifactory/api/storage/libs-release/org/acme/app.jar"
        );
        assert_eq!(
            client.item_url("libs-release", "///org/acme/app.jar"),
            "https://repo.example.com/artifactory/libs-release/org/acme/app.jar"
        );
    }
}
