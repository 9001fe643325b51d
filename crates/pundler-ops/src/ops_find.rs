//! Operation: resolve a module name through the pundle finder.

use std::path::Path;
use std::sync::Arc;

use pundler_core::config::ProjectConfig;
use pundler_core::finder::{MetaPath, ModuleSpec, PundleFinder};

/// Build an import chain whose front finder is backed by the records file.
pub fn meta_path(project_root: &Path, config: &ProjectConfig) -> miette::Result<MetaPath> {
    let finder = PundleFinder::from_records_file(project_root, &config.records_path(project_root))?;
    let mut meta_path = MetaPath::new();
    meta_path.insert_front(Arc::new(finder));
    Ok(meta_path)
}

/// The spec a root-level import of `module` would load, if it is pinned.
pub fn find(
    project_root: &Path,
    config: &ProjectConfig,
    module: &str,
) -> miette::Result<Option<ModuleSpec>> {
    let meta_path = meta_path(project_root, config)?;
    Ok(meta_path.find_spec(module, None))
}
