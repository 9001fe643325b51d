//! Blocking HTTP client for the package index.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use pundler_util::errors::{PundlerError, PundlerResult};

use crate::metadata::ProjectMetadata;
use crate::repository::PackageIndex;

/// Fetches JSON metadata documents from a [`PackageIndex`].
#[derive(Debug, Clone)]
pub struct IndexClient {
    index: PackageIndex,
    http: Client,
}

impl IndexClient {
    pub fn new(index: PackageIndex, timeout: Duration) -> PundlerResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("pundler/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| PundlerError::Index {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { index, http })
    }

    pub fn index(&self) -> &PackageIndex {
        &self.index
    }

    /// All releases of a project, or `None` if the index doesn't know it.
    pub fn project(&self, name: &str) -> PundlerResult<Option<ProjectMetadata>> {
        self.fetch(&self.index.project_url(name))
    }

    /// Metadata for one release, or `None` if it doesn't exist.
    pub fn release(&self, name: &str, version: &str) -> PundlerResult<Option<ProjectMetadata>> {
        self.fetch(&self.index.release_url(name, version))
    }

    fn fetch(&self, url: &str) -> PundlerResult<Option<ProjectMetadata>> {
        tracing::debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| PundlerError::Index {
                message: format!("Failed to fetch {url}: {e}"),
            })?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(PundlerError::Index {
                message: format!("HTTP {} for {url}", resp.status()),
            });
        }

        let body = resp.text().map_err(|e| PundlerError::Index {
            message: format!("Failed to read {url}: {e}"),
        })?;
        ProjectMetadata::parse(&body).map(Some)
    }
}
