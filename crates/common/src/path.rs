/// Strip leading slashes from a remote path before it is joined into a URL
///
/// Endpoint URLs are built by concatenation, so a leading slash in the
/// remote path would produce a double slash (or escape the repository
/// prefix entirely). The returned path has exactly zero leading slashes.
pub fn normalize_remote_path(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Strip trailing slashes from a base server URL
///
/// Applied once at configuration time so endpoint concatenation can always
/// insert its own separator.
pub fn strip_trailing_slashes(url: &str) -> &str {
    url.trim_end_matches('/')
}
