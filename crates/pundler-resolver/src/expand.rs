//! Lazy depth-first expansion of a requirement graph.

use pundler_core::requirement::Requirement;
use pundler_core::version::Constraint;
use pundler_util::errors::{PundlerError, PundlerResult};

use crate::cache::VisitedSet;
use crate::locator::Locator;

/// A package name with the constraints one requirement placed on it.
pub type ConstraintPair = (String, Vec<Constraint>);

/// Walks `requires` edges outward from the root requirements, yielding one
/// [`ConstraintPair`] per distinct requirement reached.
///
/// Each requirement is located with stable releases first and retried with
/// pre-releases; if both fail the iterator yields a
/// [`PundlerError::Resolution`] and then stops. A requirement whose
/// signature was already expanded is skipped, so cycles terminate.
pub struct Expander<'a, L: Locator + ?Sized> {
    locator: &'a L,
    stack: Vec<std::vec::IntoIter<String>>,
    visited: VisitedSet,
    done: bool,
}

impl<'a, L: Locator + ?Sized> Expander<'a, L> {
    pub fn new(locator: &'a L, requirements: Vec<String>) -> Self {
        Self {
            locator,
            stack: vec![requirements.into_iter()],
            visited: VisitedSet::new(),
            done: false,
        }
    }

    /// Expand one requirement string. `Ok(None)` means it was already visited.
    fn expand(&mut self, input: &str) -> PundlerResult<Option<(ConstraintPair, Vec<String>)>> {
        let req = Requirement::parse(input)?;
        if !self.visited.visit(&req) {
            tracing::trace!("Already expanded {}", req.query());
            return Ok(None);
        }

        let dist = match self.locator.locate(input, false)? {
            Some(dist) => dist,
            None => self
                .locator
                .locate(input, true)?
                .ok_or_else(|| PundlerError::Resolution {
                    name: input.to_string(),
                })?,
        };
        tracing::debug!("{} -> {dist}", req.query());

        Ok(Some(((req.name, req.constraints), dist.requires)))
    }
}

impl<L: Locator + ?Sized> Iterator for Expander<'_, L> {
    type Item = PundlerResult<ConstraintPair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let input = match self.stack.last_mut()?.next() {
                Some(input) => input,
                None => {
                    self.stack.pop();
                    continue;
                }
            };
            match self.expand(&input) {
                Ok(Some((pair, children))) => {
                    if !children.is_empty() {
                        self.stack.push(children.into_iter());
                    }
                    return Some(Ok(pair));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    self.stack.clear();
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<L: Locator + ?Sized> std::iter::FusedIterator for Expander<'_, L> {}
