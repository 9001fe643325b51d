//! [`Locator`] backed by a package index.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pundler_core::distribution::Distribution;
use pundler_core::marker::MarkerEnvironment;
use pundler_core::requirement::{normalize_name, Requirement};
use pundler_resolver::locator::{select_best, Locator};
use pundler_util::errors::PundlerResult;

use crate::client::IndexClient;
use crate::metadata::{runtime_requirements, ProjectMetadata};

/// Locates distributions through the PyPI JSON API.
///
/// Project listings and per-release requirements are memoized for the
/// lifetime of the locator, since resolution queries each name at least twice.
pub struct PypiLocator {
    client: IndexClient,
    env: MarkerEnvironment,
    projects: RefCell<HashMap<String, Option<Rc<ProjectMetadata>>>>,
    requires: RefCell<HashMap<(String, String), Vec<String>>>,
}

impl PypiLocator {
    pub fn new(client: IndexClient, env: MarkerEnvironment) -> Self {
        Self {
            client,
            env,
            projects: RefCell::new(HashMap::new()),
            requires: RefCell::new(HashMap::new()),
        }
    }

    fn project(&self, name: &str) -> PundlerResult<Option<Rc<ProjectMetadata>>> {
        if let Some(cached) = self.projects.borrow().get(name) {
            return Ok(cached.clone());
        }
        let fetched = self.client.project(name)?.map(Rc::new);
        if fetched.is_none() {
            tracing::debug!("{name} is not on {}", self.client.index().url);
        }
        self.projects
            .borrow_mut()
            .insert(name.to_string(), fetched.clone());
        Ok(fetched)
    }

    fn release_requires(&self, name: &str, version: &str) -> PundlerResult<Vec<String>> {
        let key = (name.to_string(), version.to_string());
        if let Some(cached) = self.requires.borrow().get(&key) {
            return Ok(cached.clone());
        }
        let requires = match self.client.release(name, version)? {
            Some(release) => runtime_requirements(release.requires_dist(), &self.env),
            None => Vec::new(),
        };
        self.requires.borrow_mut().insert(key, requires.clone());
        Ok(requires)
    }
}

impl Locator for PypiLocator {
    fn locate(&self, requirement: &str, prereleases: bool) -> PundlerResult<Option<Distribution>> {
        let req = Requirement::parse(requirement)?;
        let name = normalize_name(&req.name);
        let Some(project) = self.project(&name)? else {
            return Ok(None);
        };
        let Some(version) = select_best(project.available_versions(), &req.constraints, prereleases)
        else {
            return Ok(None);
        };
        let requires = self.release_requires(&name, version)?;
        Ok(Some(
            Distribution::new(project.info.name.clone(), version).with_requires(requires),
        ))
    }
}
