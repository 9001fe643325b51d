pub mod ops_find;
pub mod ops_install;
pub mod ops_list;
pub mod ops_lock;
pub mod ops_verify;

use std::path::Path;
use std::time::Duration;

use pundler_core::config::ProjectConfig;
use pundler_index::client::IndexClient;
use pundler_index::locator::PypiLocator;
use pundler_index::repository::PackageIndex;
use pundler_store::installer::PipInstaller;
use pundler_store::store::PundleStore;

/// The package-index locator described by `[index]` and `[environment]`.
pub fn index_locator(config: &ProjectConfig) -> miette::Result<PypiLocator> {
    let client = IndexClient::new(
        PackageIndex::new(&config.index.url),
        Duration::from_secs(config.index.timeout_secs),
    )?;
    Ok(PypiLocator::new(client, config.environment.clone()))
}

/// The pip backend from `[installer]`.
pub fn pip_installer(project_root: &Path, config: &ProjectConfig) -> PipInstaller {
    PipInstaller::new(config.pip_path(project_root))
}

pub fn pundle_store(project_root: &Path, config: &ProjectConfig) -> PundleStore {
    PundleStore::new(config.pundle_root(project_root))
}
