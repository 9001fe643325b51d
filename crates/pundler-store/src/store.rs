//! Per-version install directories under the pundle root.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pundler_core::distribution::Distribution;
use pundler_core::version::Version;
use pundler_util::errors::{PundlerError, PundlerResult};

use crate::installer::Installer;

/// Marker written into a pundle once its contents are fully in place.
pub const FINGERPRINT_FILE: &str = ".pundle-fingerprint";

const TEMP_PREFIX: &str = ".pundle-tmp-";

/// What [`PundleStore::install`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The installer ran and the pundle was created.
    Installed,
    /// A complete pundle already existed; nothing ran.
    Fresh,
}

/// The directory holding every installed pundle.
#[derive(Debug, Clone)]
pub struct PundleStore {
    root: PathBuf,
}

impl PundleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<lowercased-name>-<version>`
    pub fn pundle_name(name: &str, version: &str) -> String {
        format!("{}-{}", name.to_lowercase(), version)
    }

    pub fn pundle_dir(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(Self::pundle_name(name, version))
    }

    /// A pundle counts as installed only once its fingerprint marker exists.
    pub fn is_installed(&self, name: &str, version: &str) -> bool {
        let dir = self.pundle_dir(name, version);
        dir.is_dir() && dir.join(FINGERPRINT_FILE).is_file()
    }

    /// Materialize `dist` unless it is already installed.
    ///
    /// The installer writes into a temporary directory inside the root, which
    /// is removed whether or not installation succeeds. A directory left
    /// without a fingerprint by an earlier interrupted run is replaced.
    pub fn install(
        &self,
        dist: &Distribution,
        installer: &dyn Installer,
    ) -> PundlerResult<InstallOutcome> {
        if self.is_installed(&dist.name, &dist.version) {
            tracing::debug!("{dist} is already installed");
            return Ok(InstallOutcome::Fresh);
        }

        let dest = self.pundle_dir(&dist.name, &dist.version);
        if dest.exists() {
            tracing::warn!(
                "Replacing partial install at {} (no fingerprint)",
                dest.display()
            );
            fs::remove_dir_all(&dest)?;
        }

        pundler_util::fs::ensure_dir(&self.root)?;
        let workspace = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir_in(&self.root)?;

        tracing::info!("Installing {dist} into {}", dest.display());
        installer.install(&dist.name, &dist.version, workspace.path())?;

        let moved = pundler_util::fs::move_dir_contents(workspace.path(), &dest)?;
        tracing::debug!("Moved {moved} entries into {}", dest.display());
        workspace.close()?;

        let fingerprint = pundler_util::hash::sha256_tree(&dest, &[FINGERPRINT_FILE])?;
        fs::write(dest.join(FINGERPRINT_FILE), format!("{fingerprint}\n"))?;
        Ok(InstallOutcome::Installed)
    }

    /// Every pundle directory under the root as name -> versions (ascending).
    ///
    /// Hidden entries (including in-flight temporary directories) are skipped.
    pub fn list_installed(&self) -> PundlerResult<BTreeMap<String, Vec<String>>> {
        let mut installed: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if !self.root.is_dir() {
            return Ok(installed);
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            if dir_name.starts_with('.') {
                continue;
            }
            match split_pundle_name(&dir_name) {
                Some((name, version)) => installed
                    .entry(name.to_string())
                    .or_default()
                    .push(version.to_string()),
                None => tracing::debug!("Ignoring {dir_name} in pundle root"),
            }
        }
        for versions in installed.values_mut() {
            versions.sort_by(|a, b| match (Version::parse(a), Version::parse(b)) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            });
        }
        Ok(installed)
    }

    /// Recompute a pundle's fingerprint and compare it to the recorded one.
    pub fn verify(&self, name: &str, version: &str) -> PundlerResult<()> {
        let dir = self.pundle_dir(name, version);
        let mismatch = || PundlerError::Fingerprint {
            name: name.to_lowercase(),
            version: version.to_string(),
        };
        let recorded = match fs::read_to_string(dir.join(FINGERPRINT_FILE)) {
            Ok(content) => content.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(mismatch()),
            Err(e) => return Err(e.into()),
        };
        let actual = pundler_util::hash::sha256_tree(&dir, &[FINGERPRINT_FILE])?;
        if actual != recorded {
            return Err(mismatch());
        }
        Ok(())
    }
}

/// Split `<name>-<version>` at the first `-` followed by a parsable version,
/// so hyphenated names like `charset-normalizer-3.1.0` split correctly.
pub fn split_pundle_name(dir_name: &str) -> Option<(&str, &str)> {
    let candidates: Vec<usize> = dir_name.match_indices('-').map(|(i, _)| i).collect();
    let valid = |&i: &usize| i > 0 && i + 1 < dir_name.len();
    candidates
        .iter()
        .copied()
        .filter(valid)
        .find(|&i| Version::parse(&dir_name[i + 1..]).is_ok())
        .or_else(|| candidates.iter().copied().find(valid))
        .map(|i| (&dir_name[..i], &dir_name[i + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pundle_names_are_lowercased() {
        assert_eq!(PundleStore::pundle_name("Jinja2", "3.1.2"), "jinja2-3.1.2");
    }

    #[test]
    fn split_hyphenated_names() {
        assert_eq!(split_pundle_name("foo-2.0"), Some(("foo", "2.0")));
        assert_eq!(
            split_pundle_name("charset-normalizer-3.1.0"),
            Some(("charset-normalizer", "3.1.0"))
        );
        assert_eq!(split_pundle_name("odd-name-x"), Some(("odd", "name-x")));
        assert_eq!(split_pundle_name("noversion"), None);
        assert_eq!(split_pundle_name("trailing-"), None);
    }
}
