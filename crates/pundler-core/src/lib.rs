//! Core data types for pundler.
//!
//! Requirement and version parsing, environment markers, the distribution
//! model, the requirements file, the freeze and records lock formats, project
//! configuration, and the pundle import finder.
//!
//! This crate does no network I/O and spawns no processes.

pub mod config;
pub mod distribution;
pub mod finder;
pub mod lockfile;
pub mod manifest;
pub mod marker;
pub mod requirement;
pub mod version;
