//! The pundle store: one `<name>-<version>` directory per installed
//! distribution, the installer backends that populate them, and the module
//! records consumed by the finder.

pub mod installer;
pub mod records;
pub mod store;
