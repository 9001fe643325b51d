//! Operation: list installed pundles.

use std::collections::BTreeMap;
use std::path::Path;

use pundler_core::config::ProjectConfig;

/// Installed pundles as name -> versions, both sorted.
pub fn list(
    project_root: &Path,
    config: &ProjectConfig,
) -> miette::Result<BTreeMap<String, Vec<String>>> {
    let store = crate::pundle_store(project_root, config);
    Ok(store.list_installed()?)
}
