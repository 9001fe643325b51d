use std::collections::BTreeMap;

use pundler_core::requirement::{join_constraints, normalize_name};
use pundler_core::version::Constraint;

use crate::expand::ConstraintPair;

/// Accumulates every constraint seen per package name.
///
/// Names are grouped in normalized form, so `Foo_Bar` and `foo-bar` share
/// one entry. Exact duplicate constraints are kept once, in first-seen order.
#[derive(Debug, Default)]
pub struct ConstraintGroup {
    groups: BTreeMap<String, Vec<Constraint>>,
}

impl ConstraintGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, constraints: Vec<Constraint>) {
        let group = self.groups.entry(normalize_name(name)).or_default();
        for constraint in constraints {
            if !group.contains(&constraint) {
                group.push(constraint);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render each name's constraints as one comma-separated string, keyed alphabetically.
    pub fn finish(self) -> BTreeMap<String, String> {
        self.groups
            .into_iter()
            .map(|(name, constraints)| (name, join_constraints(&constraints)))
            .collect()
    }
}

/// Group a flat pair sequence in one step.
pub fn group_constraints(pairs: impl IntoIterator<Item = ConstraintPair>) -> BTreeMap<String, String> {
    let mut group = ConstraintGroup::new();
    for (name, constraints) in pairs {
        group.add(&name, constraints);
    }
    group.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pundler_core::version::Operator;

    fn c(op: Operator, v: &str) -> Constraint {
        Constraint::new(op, v)
    }

    #[test]
    fn merges_per_name_alphabetically() {
        let grouped = group_constraints(vec![
            ("foo".to_string(), vec![c(Operator::GreaterEqual, "1.0")]),
            ("bar".to_string(), vec![]),
            ("foo".to_string(), vec![c(Operator::Less, "2.0")]),
        ]);
        let entries: Vec<_> = grouped.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(entries, vec![("bar", ""), ("foo", ">=1.0,<2.0")]);
    }

    #[test]
    fn duplicates_are_kept_once() {
        let mut group = ConstraintGroup::new();
        group.add("foo", vec![c(Operator::GreaterEqual, "1.0")]);
        group.add(
            "foo",
            vec![c(Operator::NotEqual, "1.3"), c(Operator::GreaterEqual, "1.0")],
        );
        assert_eq!(group.len(), 1);
        assert_eq!(group.finish()["foo"], ">=1.0,!=1.3");
    }

    #[test]
    fn spellings_of_one_name_share_a_group() {
        let grouped = group_constraints(vec![
            ("foo_bar".to_string(), vec![c(Operator::GreaterEqual, "1.0")]),
            ("foo.bar".to_string(), vec![c(Operator::Less, "2.0")]),
            ("foo-bar".to_string(), vec![]),
        ]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["foo-bar"], ">=1.0,<2.0");
    }

    #[test]
    fn empty_input() {
        assert!(group_constraints(Vec::new()).is_empty());
    }
}
