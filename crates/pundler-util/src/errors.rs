use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Pundler operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PundlerError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A requirement specifier or lockfile line could not be parsed.
    #[error("Invalid requirement '{input}': {message}")]
    #[diagnostic(help("Requirements look like `name`, `name>=1.0` or `name (>=1.0, <2)`"))]
    Parse { input: String, message: String },

    /// No distribution satisfies a requirement, even with pre-releases allowed.
    #[error("Distribution for {name} was not found")]
    Resolution { name: String },

    /// The installer backend failed for a package.
    #[error("{name} was not installed due to an error: {message}")]
    Install { name: String, message: String },

    /// A required input file does not exist.
    #[error("File {} not found", path.display())]
    #[diagnostic(help("Create it with one requirement per line"))]
    MissingInput { path: PathBuf },

    /// Invalid or malformed project configuration (`pundler.toml`).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your pundler.toml for syntax errors"))]
    Config { message: String },

    /// Talking to the package index failed.
    #[error("Package index error: {message}")]
    Index { message: String },

    /// An installed pundle no longer matches the fingerprint recorded at install time.
    #[error("Pundle {name}-{version} is corrupted (fingerprint mismatch)")]
    #[diagnostic(help("Delete the pundle directory and run `pundler install` again"))]
    Fingerprint { name: String, version: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl PundlerError {
    /// Shorthand for a [`PundlerError::Parse`] error.
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }
}

/// Result alias used by the library crates.
pub type PundlerResult<T> = std::result::Result<T, PundlerError>;
