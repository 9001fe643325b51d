//! Requirement specifier parsing.
//!
//! Accepts the common specifier forms found in requirements files and in
//! package metadata:
//!
//! - `foo`
//! - `Foo>=1.0,<2`
//! - `foo (>=1.0, <2)` and `foo (1.0)` (bare version means `==`)
//! - `foo[extra1,extra2]>=1.0`
//! - `foo>=1.0; python_version < "3.8"`

use std::fmt;

use pundler_util::errors::{PundlerError, PundlerResult};

use crate::version::{Constraint, Operator};

/// A parsed requirement: normalized name plus ordered version constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    /// Lower-cased package name.
    pub name: String,
    pub extras: Vec<String>,
    pub constraints: Vec<Constraint>,
    /// Environment marker expression following `;`, if any.
    pub marker: Option<String>,
}

impl Requirement {
    /// Parse a requirement specifier string.
    pub fn parse(input: &str) -> PundlerResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PundlerError::parse(input, "empty requirement"));
        }

        let (spec, marker) = match trimmed.split_once(';') {
            Some((spec, marker)) => {
                let marker = marker.trim();
                if marker.is_empty() {
                    return Err(PundlerError::parse(input, "empty environment marker"));
                }
                (spec.trim(), Some(marker.to_string()))
            }
            None => (trimmed, None),
        };

        let name_len = spec
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
            .map(|(i, _)| i)
            .unwrap_or(spec.len());
        let name = &spec[..name_len];
        if name.is_empty() {
            return Err(PundlerError::parse(input, "missing package name"));
        }
        let starts_ok = name.starts_with(|c: char| c.is_ascii_alphanumeric());
        let ends_ok = name.ends_with(|c: char| c.is_ascii_alphanumeric());
        if !starts_ok || !ends_ok {
            return Err(PundlerError::parse(
                input,
                format!("invalid package name '{name}'"),
            ));
        }

        let mut rest = spec[name_len..].trim_start();

        let mut extras = Vec::new();
        if let Some(after) = rest.strip_prefix('[') {
            let (inner, tail) = after
                .split_once(']')
                .ok_or_else(|| PundlerError::parse(input, "unterminated extras list"))?;
            for extra in inner.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                if !is_identifier(extra) {
                    return Err(PundlerError::parse(
                        input,
                        format!("invalid extra '{extra}'"),
                    ));
                }
                extras.push(extra.to_lowercase());
            }
            rest = tail.trim_start();
        }

        let constraints = if let Some(after) = rest.strip_prefix('(') {
            let inner = after
                .trim_end()
                .strip_suffix(')')
                .ok_or_else(|| PundlerError::parse(input, "unterminated version list"))?;
            parse_clauses(input, inner, true)?
        } else {
            parse_clauses(input, rest, false)?
        };

        Ok(Self {
            name: name.to_lowercase(),
            extras,
            constraints,
            marker,
        })
    }

    /// Constraints rendered as a comma-separated list (`>=1.0,<2`).
    pub fn constraint_string(&self) -> String {
        join_constraints(&self.constraints)
    }

    /// Canonical query form without the marker: `name[extras]>=1.0,<2`.
    pub fn query(&self) -> String {
        let mut out = self.name.clone();
        if !self.extras.is_empty() {
            out.push('[');
            out.push_str(&self.extras.join(","));
            out.push(']');
        }
        out.push_str(&self.constraint_string());
        out
    }
}

/// Normalize a project name the way indexes do: lower-cased, with every run
/// of `-`, `_` and `.` collapsed to a single `-`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    out
}

/// Render constraints as `op1v1,op2v2`.
pub fn join_constraints(constraints: &[Constraint]) -> String {
    constraints
        .iter()
        .map(Constraint::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_clauses(input: &str, list: &str, parenthesized: bool) -> PundlerResult<Vec<Constraint>> {
    let list = list.trim();
    if list.is_empty() {
        return Ok(Vec::new());
    }

    let mut constraints = Vec::new();
    for clause in list.split(',') {
        let clause = clause.trim();
        if clause.is_empty() {
            return Err(PundlerError::parse(input, "empty version constraint"));
        }

        let (op, version) = match Operator::ALL
            .iter()
            .find(|op| clause.starts_with(op.as_str()))
        {
            Some(op) => (*op, clause[op.as_str().len()..].trim()),
            None if parenthesized && clause.starts_with(|c: char| c.is_ascii_digit()) => {
                (Operator::Equal, clause)
            }
            None => {
                return Err(PundlerError::parse(
                    input,
                    format!("unexpected '{clause}', expected a version operator"),
                ));
            }
        };

        if version.is_empty() {
            return Err(PundlerError::parse(
                input,
                format!("missing version after '{op}'"),
            ));
        }
        if !version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '*' | '+' | '!' | '_' | '-'))
        {
            return Err(PundlerError::parse(
                input,
                format!("invalid version '{version}'"),
            ));
        }
        constraints.push(Constraint::new(op, version));
    }
    Ok(constraints)
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())?;
        if let Some(ref marker) = self.marker {
            write!(f, "; {marker}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Requirement {
    type Err = PundlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
