//! API-root selection across server generations.

/// URL path prefix distinguishing server API generations.
///
/// Modern servers (API version 4 and later) serve everything from the URL
/// root; legacy servers mount the same endpoints under a context path.
/// Version detection walks [`ApiRoot::candidates`] in order and pins the
/// first root that answers the version probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoot {
    Modern,
    Legacy,
}

impl ApiRoot {
    /// Prefix inserted between the base URL and an endpoint path.
    pub fn prefix(self) -> &'static str {
        match self {
            ApiRoot::Modern => "",
            ApiRoot::Legacy => "/artifactory",
        }
    }

    /// Initial root for an API version hint.
    pub fn for_version(version: u32) -> Self {
        if version >= 4 {
            ApiRoot::Modern
        } else {
            ApiRoot::Legacy
        }
    }

    /// Probe order for version detection: modern first, then legacy.
    pub fn candidates() -> [ApiRoot; 2] {
        [ApiRoot::Modern, ApiRoot::Legacy]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_for_version() {
        assert_eq!(ApiRoot::for_version(3), ApiRoot::Legacy);
        assert_eq!(ApiRoot::for_version(4), ApiRoot::Modern);
        assert_eq!(ApiRoot::for_version(7), ApiRoot::Modern);
    }

    #[test]
    fn test_candidate_order() {
        assert_eq!(ApiRoot::candidates(), [ApiRoot::Modern, ApiRoot::Legacy]);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(ApiRoot::Modern.prefix(), "");
        assert_eq!(ApiRoot::Legacy.prefix(), "/artifactory");
    }
}
