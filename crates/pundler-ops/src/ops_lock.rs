//! Operation: resolve the requirements file and write the freeze file.

use std::path::Path;

use pundler_core::config::ProjectConfig;
use pundler_core::lockfile::FreezeFile;
use pundler_core::manifest::RequirementsFile;
use pundler_resolver::locator::Locator;
use pundler_resolver::resolver::{self, ResolvedSet};
use pundler_util::progress::{spinner, status};

/// Resolve every requirement and overwrite the freeze file.
///
/// Nothing is written unless resolution succeeds completely.
pub fn lock(
    project_root: &Path,
    config: &ProjectConfig,
    locator: &dyn Locator,
) -> miette::Result<ResolvedSet> {
    let requirements = RequirementsFile::from_path(&config.requirements_path(project_root))?;
    if requirements.is_empty() {
        tracing::warn!("{} has no requirements", requirements.path.display());
    }

    let sp = spinner("Resolving requirements...");
    let result = resolver::resolve(locator, &requirements.lines);
    sp.finish_and_clear();
    let resolved = result?;

    let freeze_path = config.freeze_path(project_root);
    FreezeFile::from_distributions(&resolved).write_to(&freeze_path)?;
    status(
        "Locked",
        &format!("{} packages in {}", resolved.len(), config.freeze_file),
    );
    Ok(resolved)
}
