//! Module discovery for installed pundles.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pundler_core::distribution::Distribution;
use pundler_core::lockfile::{PundleRecord, RecordsFile};
use pundler_util::errors::PundlerResult;

use crate::store::PundleStore;

const METADATA_SUFFIXES: [&str; 3] = [".dist-info", ".egg-info", ".data"];

/// Importable top-level modules in one pundle directory, sorted by name.
///
/// A directory with an `__init__.py` is a package; a `*.py` file is a
/// single-file module. Hidden entries, `__pycache__` and packaging metadata
/// are not modules.
pub fn discover_modules(pundle_dir: &Path) -> PundlerResult<Vec<(String, PathBuf)>> {
    let mut modules = Vec::new();
    for entry in fs::read_dir(pundle_dir)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.')
            || file_name == "__pycache__"
            || METADATA_SUFFIXES.iter().any(|s| file_name.ends_with(s))
        {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if path.join("__init__.py").is_file() {
                modules.push((file_name, path));
            }
        } else if let Some(stem) = file_name.strip_suffix(".py") {
            if !stem.is_empty() {
                modules.push((stem.to_string(), path));
            }
        }
    }
    modules.sort();
    Ok(modules)
}

/// Build the records file for `dists`, with paths relative to `base` where possible.
///
/// When two pundles provide the same module, the later distribution wins.
pub fn build_records<'a>(
    store: &PundleStore,
    dists: impl IntoIterator<Item = &'a Distribution>,
    base: &Path,
) -> PundlerResult<RecordsFile> {
    let mut by_module: BTreeMap<String, PundleRecord> = BTreeMap::new();
    for dist in dists {
        let dir = store.pundle_dir(&dist.name, &dist.version);
        for (module, path) in discover_modules(&dir)? {
            let path = path.strip_prefix(base).map(Path::to_path_buf).unwrap_or(path);
            let record = PundleRecord {
                version: dist.version.clone(),
                name: module.clone(),
                path,
            };
            if let Some(previous) = by_module.insert(module, record) {
                tracing::warn!(
                    "Module {} from {} is shadowed by {dist}",
                    previous.name,
                    previous.path.display()
                );
            }
        }
    }
    Ok(RecordsFile {
        records: by_module.into_values().collect(),
    })
}
