//! Bookkeeping for a single expansion session.

use std::collections::HashSet;

use pundler_core::requirement::Requirement;

/// Tracks which requirement signatures have already been expanded
/// to guarantee termination on cyclic requirement graphs.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a requirement as visited. Returns `false` if already visited.
    pub fn visit(&mut self, requirement: &Requirement) -> bool {
        self.visited.insert(requirement.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_tracking() {
        let mut set = VisitedSet::new();
        let foo = Requirement::parse("Foo>=1.0").unwrap();
        assert!(set.visit(&foo));
        assert!(!set.visit(&Requirement::parse("foo (>=1.0)").unwrap()));
        assert!(!set.visit(&foo));
        assert!(set.visit(&Requirement::parse("foo>=2.0").unwrap()));
        assert!(set.visit(&Requirement::parse("foo").unwrap()));
    }

    #[test]
    fn marker_does_not_change_signature() {
        let mut set = VisitedSet::new();
        assert!(set.visit(&Requirement::parse("bar; os_name == \"posix\"").unwrap()));
        assert!(!set.visit(&Requirement::parse("bar").unwrap()));
    }
}
