//! Package index URL layout.

use pundler_core::requirement::normalize_name;

/// A package index speaking the PyPI JSON API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIndex {
    pub url: String,
}

impl PackageIndex {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Project-level metadata listing every release.
    pub fn project_url(&self, name: &str) -> String {
        format!("{}/{}/json", self.url, normalize_name(name))
    }

    /// Metadata for one release, including its `requires_dist`.
    pub fn release_url(&self, name: &str, version: &str) -> String {
        format!("{}/{}/{}/json", self.url, normalize_name(name), version)
    }
}
