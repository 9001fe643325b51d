//! The project's requirements file.

use std::path::{Path, PathBuf};

use pundler_util::errors::{PundlerError, PundlerResult};

use crate::requirement::Requirement;

/// Declared requirement specifiers, in file order.
#[derive(Debug, Clone, Default)]
pub struct RequirementsFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl RequirementsFile {
    /// Load a requirements file. A missing file is a [`PundlerError::MissingInput`].
    pub fn from_path(path: &Path) -> PundlerResult<Self> {
        if !path.is_file() {
            return Err(PundlerError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: Self::parse(&content),
        })
    }

    /// Keep non-blank lines that are not `#` comments, trimmed.
    pub fn parse(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    /// Parse every line, failing on the first malformed specifier.
    pub fn requirements(&self) -> PundlerResult<Vec<Requirement>> {
        self.lines.iter().map(|l| Requirement::parse(l)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
