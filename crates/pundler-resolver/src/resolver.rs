//! Final resolution: expand, group, then pick exactly one distribution per name.

use std::collections::BTreeMap;

use pundler_core::distribution::Distribution;
use pundler_core::requirement::normalize_name;
use pundler_util::errors::{PundlerError, PundlerResult};

use crate::expand::Expander;
use crate::group::ConstraintGroup;
use crate::locator::Locator;

/// Exactly one chosen distribution per normalized package name, iterated alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSet {
    dists: BTreeMap<String, Distribution>,
}

impl ResolvedSet {
    pub fn len(&self) -> usize {
        self.dists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Distribution> {
        self.dists.get(&normalize_name(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dists.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Distribution> {
        self.dists.values()
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = &'a Distribution;
    type IntoIter = std::collections::btree_map::Values<'a, String, Distribution>;

    fn into_iter(self) -> Self::IntoIter {
        self.dists.values()
    }
}

/// Resolve root requirement strings to a [`ResolvedSet`].
///
/// Every requirement reachable from `requirements` contributes its
/// constraints; each name is then located once more with pre-releases
/// allowed against the union of its constraints.
pub fn resolve<L: Locator + ?Sized>(
    locator: &L,
    requirements: &[String],
) -> PundlerResult<ResolvedSet> {
    let mut group = ConstraintGroup::new();
    for pair in Expander::new(locator, requirements.to_vec()) {
        let (name, constraints) = pair?;
        group.add(&name, constraints);
    }
    tracing::debug!("Expanded requirements to {} packages", group.len());

    let mut dists = BTreeMap::new();
    for (name, constraints) in group.finish() {
        let query = format!("{name}{constraints}");
        let dist = locator
            .locate(&query, true)?
            .ok_or(PundlerError::Resolution { name: query })?;
        dists.insert(name, dist);
    }
    Ok(ResolvedSet { dists })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::MemoryLocator;

    #[test]
    fn combined_constraints_narrow_choice() {
        let locator = MemoryLocator::new()
            .with(Distribution::new("app", "1.0").with_requires(["lib<2"]))
            .with(Distribution::new("lib", "1.0"))
            .with(Distribution::new("lib", "1.9"))
            .with(Distribution::new("lib", "2.5"));
        let resolved = resolve(&locator, &["app".to_string(), "lib>=1.5".to_string()]).unwrap();
        assert_eq!(resolved.get("lib").unwrap().version, "1.9");
    }

    #[test]
    fn conflicting_constraints_fail() {
        let locator = MemoryLocator::new()
            .with(Distribution::new("app", "1.0").with_requires(["lib<1"]))
            .with(Distribution::new("lib", "0.5"))
            .with(Distribution::new("lib", "1.5"));
        let err = resolve(&locator, &["app".to_string(), "lib>=1".to_string()]).unwrap_err();
        match err {
            PundlerError::Resolution { name } => assert_eq!(name, "lib<1,>=1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn name_spellings_resolve_to_one_distribution() {
        let locator = MemoryLocator::new()
            .with(Distribution::new("Foo-Bar", "1.5"))
            .with(Distribution::new("Foo-Bar", "2.0"));
        let resolved =
            resolve(&locator, &["Foo_Bar>=1".to_string(), "foo.bar<2".to_string()]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get("FOO_BAR").unwrap().version, "1.5");
    }

    #[test]
    fn empty_requirements_resolve_to_nothing() {
        let resolved = resolve(&MemoryLocator::new(), &[]).unwrap();
        assert!(resolved.is_empty());
    }
}
