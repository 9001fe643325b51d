//! Package index access: the PyPI JSON API client, release metadata parsing,
//! and [`locator::PypiLocator`], the index-backed distribution locator.

pub mod client;
pub mod locator;
pub mod metadata;
pub mod repository;
