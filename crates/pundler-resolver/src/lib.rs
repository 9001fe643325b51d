//! Requirement resolution: distribution locators, lazy transitive expansion,
//! constraint grouping, and the final one-version-per-name selection.

pub mod cache;
pub mod expand;
pub mod group;
pub mod locator;
pub mod resolver;
