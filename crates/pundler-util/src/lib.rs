//! Shared utilities for Pundler.
//!
//! This crate provides cross-cutting concerns used by all other Pundler crates:
//! error types, filesystem helpers, content hashing, process spawning,
//! and terminal progress indicators.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
