//! PyPI JSON API documents and the selection logic applied to them.

use std::collections::BTreeMap;

use serde::Deserialize;

use pundler_core::marker::{self, MarkerEnvironment};
use pundler_core::requirement::Requirement;
use pundler_util::errors::{PundlerError, PundlerResult};

/// `GET <index>/<name>/json` and `GET <index>/<name>/<version>/json`.
///
/// Only the fields pundler uses are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMetadata {
    pub info: ProjectInfo,
    #[serde(default)]
    pub releases: BTreeMap<String, Vec<ReleaseFile>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub requires_dist: Option<Vec<String>>,
}

/// One uploaded file of a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseFile {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub yanked: bool,
}

impl ProjectMetadata {
    pub fn parse(json: &str) -> PundlerResult<Self> {
        serde_json::from_str(json).map_err(|e| PundlerError::Index {
            message: format!("Malformed project metadata: {e}"),
        })
    }

    /// Versions that have at least one file that is not yanked.
    pub fn available_versions(&self) -> impl Iterator<Item = &str> {
        self.releases
            .iter()
            .filter(|(_, files)| files.iter().any(|f| !f.yanked))
            .map(|(version, _)| version.as_str())
    }

    pub fn requires_dist(&self) -> &[String] {
        self.info.requires_dist.as_deref().unwrap_or_default()
    }
}

/// Keep the requirements that apply to `env`, with markers stripped.
///
/// Extras are never requested, so anything gated on `extra == ...` is
/// dropped. Entries pundler cannot parse (such as direct URL references) are
/// skipped with a warning rather than failing the whole resolution.
pub fn runtime_requirements(requires_dist: &[String], env: &MarkerEnvironment) -> Vec<String> {
    let mut out = Vec::new();
    for raw in requires_dist {
        let req = match Requirement::parse(raw) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!("Ignoring requirement: {e}");
                continue;
            }
        };
        if let Some(ref expr) = req.marker {
            match marker::evaluate(expr, env) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::trace!("Marker excludes {raw}");
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Ignoring requirement with unsupported marker: {e}");
                    continue;
                }
            }
        }
        out.push(req.query());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "info": {"name": "Foo", "version": "2.0", "requires_dist": null},
        "releases": {
            "1.0": [{"filename": "foo-1.0.tar.gz", "yanked": false}],
            "1.5": [{"filename": "foo-1.5.tar.gz", "yanked": true}],
            "1.6": [
                {"filename": "foo-1.6.tar.gz", "yanked": true},
                {"filename": "foo-1.6-py3-none-any.whl", "yanked": false}
            ],
            "1.7": [],
            "2.0": [{"filename": "foo-2.0.tar.gz"}]
        }
    }"#;

    #[test]
    fn yanked_and_empty_releases_are_unavailable() {
        let meta = ProjectMetadata::parse(PROJECT).unwrap();
        let versions: Vec<_> = meta.available_versions().collect();
        assert_eq!(versions, vec!["1.0", "1.6", "2.0"]);
        assert!(meta.requires_dist().is_empty());
    }

    #[test]
    fn malformed_json_is_index_error() {
        let err = ProjectMetadata::parse("{\"info\": 3}").unwrap_err();
        assert!(matches!(err, PundlerError::Index { .. }));
    }
}
