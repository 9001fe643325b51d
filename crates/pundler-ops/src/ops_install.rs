//! Operation: resolve, freeze, install every pundle, and write module records.

use std::path::Path;

use pundler_core::config::ProjectConfig;
use pundler_resolver::locator::Locator;
use pundler_store::installer::Installer;
use pundler_store::records::build_records;
use pundler_util::progress::{status, status_info};

use crate::ops_lock;

/// Counts of what an install run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallSummary {
    pub installed: usize,
    pub fresh: usize,
}

/// Install every resolved distribution that isn't already in the pundle store.
///
/// The first installer failure aborts the run; pundles installed before it
/// are kept and the records file is left untouched.
pub fn install(
    project_root: &Path,
    config: &ProjectConfig,
    locator: &dyn Locator,
    installer: &dyn Installer,
) -> miette::Result<InstallSummary> {
    let resolved = ops_lock::lock(project_root, config, locator)?;
    let store = crate::pundle_store(project_root, config);

    let mut summary = InstallSummary::default();
    for dist in &resolved {
        if store.is_installed(&dist.name, &dist.version) {
            status_info("Fresh", &format!("{} {}", dist.key(), dist.version));
            summary.fresh += 1;
            continue;
        }
        status("Installing", &format!("{} {}", dist.key(), dist.version));
        store.install(dist, installer)?;
        summary.installed += 1;
    }

    let records = build_records(&store, &resolved, project_root)?;
    records.write_to(&config.records_path(project_root))?;

    status(
        "Finished",
        &format!(
            "{} installed, {} fresh, {} modules recorded",
            summary.installed,
            summary.fresh,
            records.records.len()
        ),
    );
    Ok(summary)
}
