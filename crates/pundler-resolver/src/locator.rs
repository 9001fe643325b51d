//! Distribution locators.

use std::collections::BTreeMap;

use pundler_core::distribution::Distribution;
use pundler_core::requirement::{normalize_name, Requirement};
use pundler_core::version::{satisfies_all, Constraint, Version};
use pundler_util::errors::PundlerResult;

/// Finds the best distribution for a requirement string.
///
/// `prereleases` widens the search to pre-release versions. Returning
/// `Ok(None)` means nothing matched; errors are reserved for failures to
/// talk to the underlying index.
pub trait Locator {
    fn locate(&self, requirement: &str, prereleases: bool) -> PundlerResult<Option<Distribution>>;
}

impl<L: Locator + ?Sized> Locator for &L {
    fn locate(&self, requirement: &str, prereleases: bool) -> PundlerResult<Option<Distribution>> {
        (**self).locate(requirement, prereleases)
    }
}

/// Pick the highest version satisfying every constraint.
///
/// Pre-releases are only eligible when `prereleases` is set or a constraint
/// names a pre-release itself. Unparsable versions are ignored.
pub fn select_best<'a>(
    versions: impl IntoIterator<Item = &'a str>,
    constraints: &[Constraint],
    prereleases: bool,
) -> Option<&'a str> {
    let allow_pre = prereleases || constraints.iter().any(Constraint::mentions_prerelease);
    versions
        .into_iter()
        .filter_map(|raw| match Version::parse(raw) {
            Ok(v) => Some((v, raw)),
            Err(e) => {
                tracing::debug!("Skipping {e}");
                None
            }
        })
        .filter(|(v, _)| allow_pre || !v.is_prerelease())
        .filter(|(v, _)| satisfies_all(v, constraints))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, raw)| raw)
}

/// An in-memory package index keyed by normalized project name.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocator {
    packages: BTreeMap<String, Vec<Distribution>>,
}

impl MemoryLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a distribution; later registrations of the same version replace earlier ones.
    pub fn add(&mut self, dist: Distribution) {
        let versions = self.packages.entry(normalize_name(&dist.name)).or_default();
        versions.retain(|d| d.version != dist.version);
        versions.push(dist);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, dist: Distribution) -> Self {
        self.add(dist);
        self
    }

    pub fn versions(&self, name: &str) -> Vec<&str> {
        self.packages
            .get(&normalize_name(name))
            .map(|dists| dists.iter().map(|d| d.version.as_str()).collect())
            .unwrap_or_default()
    }
}

impl Locator for MemoryLocator {
    fn locate(&self, requirement: &str, prereleases: bool) -> PundlerResult<Option<Distribution>> {
        let req = Requirement::parse(requirement)?;
        let Some(dists) = self.packages.get(&normalize_name(&req.name)) else {
            return Ok(None);
        };
        let best = select_best(
            dists.iter().map(|d| d.version.as_str()),
            &req.constraints,
            prereleases,
        );
        Ok(best.and_then(|version| dists.iter().find(|d| d.version == version).cloned()))
    }
}
