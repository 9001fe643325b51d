//! Operation: check installed pundles against their fingerprints.

use std::path::Path;

use pundler_core::config::ProjectConfig;
use pundler_util::errors::PundlerError;
use pundler_util::progress::{status, status_warn};

/// Verify every installed pundle, reporting each mismatch.
///
/// Returns the number of pundles verified; fails if any is corrupted.
pub fn verify(project_root: &Path, config: &ProjectConfig) -> miette::Result<usize> {
    let store = crate::pundle_store(project_root, config);
    let mut verified = 0;
    let mut corrupted = Vec::new();

    for (name, versions) in store.list_installed()? {
        for version in versions {
            match store.verify(&name, &version) {
                Ok(()) => verified += 1,
                Err(e @ PundlerError::Fingerprint { .. }) => {
                    status_warn("Corrupted", &e.to_string());
                    corrupted.push(e);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    match corrupted.len() {
        0 => {
            status("Verified", &format!("{verified} pundles"));
            Ok(verified)
        }
        1 => Err(corrupted.remove(0).into()),
        n => Err(PundlerError::Generic {
            message: format!("{n} pundles failed verification"),
        }
        .into()),
    }
}
