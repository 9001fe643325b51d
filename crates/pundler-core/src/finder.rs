//! Import resolution for installed pundles.
//!
//! A [`PundleFinder`] answers root-level import requests from a records file.
//! Finders are chained through an explicit [`MetaPath`] that the consumer
//! owns; there is no process-global hook.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pundler_util::errors::PundlerResult;

use crate::lockfile::{PundleRecord, RecordsFile};

/// Loads a module's source from a single file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileLoader {
    pub name: String,
    pub path: PathBuf,
}

impl SourceFileLoader {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn get_filename(&self) -> &Path {
        &self.path
    }

    /// Read the module source. This is the first point the file must exist.
    pub fn get_source(&self) -> PundlerResult<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Everything needed to load one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: String,
    pub loader: SourceFileLoader,
    pub origin: PathBuf,
    pub is_package: bool,
    /// Set for packages: where submodules are searched.
    pub submodule_search_locations: Option<Vec<PathBuf>>,
}

/// One entry of a [`MetaPath`].
pub trait MetaPathFinder: Send + Sync {
    /// Return a spec for `fullname`, or `None` to defer to the next finder.
    ///
    /// `path` is the parent package's search path for submodule imports.
    fn find_spec(&self, fullname: &str, path: Option<&[PathBuf]>) -> Option<ModuleSpec>;
}

/// Maps root-level module names to their pinned install paths.
#[derive(Debug, Clone, Default)]
pub struct PundleFinder {
    base: PathBuf,
    pundles: HashMap<String, PundleRecord>,
}

impl PundleFinder {
    /// Build a finder from parsed records. Later records for the same name win.
    pub fn new(base: impl Into<PathBuf>, records: RecordsFile) -> Self {
        let pundles = records
            .records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        Self {
            base: base.into(),
            pundles,
        }
    }

    /// Load the mapping once from a records file.
    pub fn from_records_file(base: impl Into<PathBuf>, path: &Path) -> PundlerResult<Self> {
        let records = RecordsFile::from_path(path)?;
        let finder = Self::new(base, records);
        tracing::debug!(
            "Loaded {} module records from {}",
            finder.len(),
            path.display()
        );
        Ok(finder)
    }

    pub fn len(&self) -> usize {
        self.pundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pundles.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pundles.contains_key(name)
    }

    pub fn record(&self, name: &str) -> Option<&PundleRecord> {
        self.pundles.get(name)
    }
}

impl MetaPathFinder for PundleFinder {
    fn find_spec(&self, fullname: &str, path: Option<&[PathBuf]>) -> Option<ModuleSpec> {
        if path.is_some() {
            return None;
        }
        let record = self.pundles.get(fullname)?;
        let location = self.base.join(&record.path);

        let is_module = location.extension().is_some_and(|ext| ext == "py");
        let spec = if is_module {
            ModuleSpec {
                name: fullname.to_string(),
                loader: SourceFileLoader::new(fullname, &location),
                origin: location,
                is_package: false,
                submodule_search_locations: None,
            }
        } else {
            let init = location.join("__init__.py");
            ModuleSpec {
                name: fullname.to_string(),
                loader: SourceFileLoader::new(fullname, &init),
                origin: init,
                is_package: true,
                submodule_search_locations: Some(vec![location]),
            }
        };
        tracing::trace!("{fullname} -> {}", spec.origin.display());
        Some(spec)
    }
}

/// An ordered chain of finders; the first one with an answer wins.
#[derive(Clone, Default)]
pub struct MetaPath {
    finders: Vec<Arc<dyn MetaPathFinder>>,
}

impl MetaPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `finder` priority over every finder already in the chain.
    pub fn insert_front(&mut self, finder: Arc<dyn MetaPathFinder>) {
        self.finders.insert(0, finder);
    }

    pub fn push(&mut self, finder: Arc<dyn MetaPathFinder>) {
        self.finders.push(finder);
    }

    pub fn len(&self) -> usize {
        self.finders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }

    pub fn find_spec(&self, fullname: &str, path: Option<&[PathBuf]>) -> Option<ModuleSpec> {
        self.finders
            .iter()
            .find_map(|finder| finder.find_spec(fullname, path))
    }
}

impl std::fmt::Debug for MetaPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaPath")
            .field("finders", &self.finders.len())
            .finish()
    }
}
