pub mod path;

use serde::{Deserialize, Serialize};

/// Response from the system-version probe endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VersionInfo {
    pub version: String, // e.g. "7.19.4"
    #[serde(default)]
    pub revision: Option<String>,
}

/// Checksum map attached to a file-info record
///
/// Older servers report MD5/SHA-1 only; SHA-256 appears on newer ones.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Checksums {
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Metadata record the server keeps for a stored artifact
///
/// The same shape comes back from the storage-info endpoint and from a
/// successful deployment (201 body). Fields other than the checksum map
/// vary between server generations, so they are all optional.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub download_uri: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub checksums: Checksums,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_info_from_server_json() {
        let body = r#"{
            "repo": "libs-release-local",
            "path": "/org/acme/app/1.0/app-1.0.jar",
            "created": "2023-04-11T11:04:10.000Z",
            "createdBy": "deployer",
            "downloadUri": "https://repo.example.com/libs-release-local/org/acme/app/1.0/app-1.0.jar",
            "mimeType": "application/java-archive",
            "size": "1024",
            "checksums": {
                "md5": "5d41402abc4b2a76b9719d911017c592",
                "sha1": "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
            },
            "uri": "https://repo.example.com/api/storage/libs-release-local/org/acme/app/1.0/app-1.0.jar"
        }"#;

        let info: FileInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.repo.as_deref(), Some("libs-release-local"));
        assert_eq!(info.created_by.as_deref(), Some("deployer"));
        assert_eq!(
            info.checksums.md5.as_deref(),
            Some("5d41402abc4b2a76b9719d911017c592")
        );
        assert_eq!(info.checksums.sha256, None);
    }

    #[test]
    fn file_info_minimal_body() {
        // A bare creation response still parses; every field is optional.
        let info: FileInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.checksums, Checksums::default());
    }

    #[test]
    fn version_info_ignores_extras() {
        let body = r#"{"version": "3.9.2", "revision": "30062", "addons": ["ldap"]}"#;
        let info: VersionInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.version, "3.9.2");
        assert_eq!(info.revision.as_deref(), Some("30062"));
    }
}
