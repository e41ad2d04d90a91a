//! Client connection configuration.

use crate::root::ApiRoot;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::path::strip_trailing_slashes;
use std::time::Duration;

/// Default API version hint when none is given.
pub const DEFAULT_API_VERSION: u32 = 4;

/// Connection configuration for a [`RepositoryClient`](crate::RepositoryClient).
///
/// Immutable once the client is constructed, except for the API root, which
/// version detection may rewrite once.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) credential: String,
    pub(crate) api_root: ApiRoot,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration from a base server URL and a pre-encoded
    /// basic-auth credential (see [`basic_credential`]).
    ///
    /// Trailing slashes are stripped from the URL here; endpoint builders
    /// insert their own separators. The initial API root assumes a modern
    /// server; use [`with_api_version`](Self::with_api_version) for a legacy
    /// hint or let detection resolve it.
    pub fn new(base_url: &str, credential: &str) -> Self {
        Self {
            base_url: strip_trailing_slashes(base_url).to_string(),
            credential: credential.to_string(),
            api_root: ApiRoot::for_version(DEFAULT_API_VERSION),
            accept_invalid_certs: true,
            timeout: None,
        }
    }

    /// Select the initial API root from a server version hint (< 4 legacy,
    /// >= 4 modern).
    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_root = ApiRoot::for_version(version);
        self
    }

    /// Control TLS certificate verification.
    ///
    /// Verification is DISABLED by default, preserving the behavior the
    /// servers this client historically talks to rely on (self-signed
    /// certificates on internal hosts). Callers reaching properly
    /// certificated servers should pass `true`.
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.accept_invalid_certs = !verify;
        self
    }

    /// Apply a per-request timeout. No timeout is set unless configured.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Pre-encode a username/password pair into the credential string expected
/// by [`ClientConfig::new`].
pub fn basic_credential(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{}:{}", username, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = ClientConfig::new("https://repo.example.com///", "token");
        assert_eq!(config.base_url, "https://repo.example.com");
    }

    #[test]
    fn test_version_hint_selects_root() {
        let config = ClientConfig::new("https://repo.example.com", "token");
        assert_eq!(config.api_root, ApiRoot::Modern);

        let config = config.with_api_version(3);
        assert_eq!(config.api_root, ApiRoot::Legacy);
    }

    #[test]
    fn test_tls_verification_flag() {
        let config = ClientConfig::new("https://repo.example.com", "token");
        assert!(config.accept_invalid_certs);
        let config = config.with_tls_verification(true);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_basic_credential_encoding() {
        assert_eq!(basic_credential("user", "pass"), "dXNlcjpwYXNz");
    }
}
