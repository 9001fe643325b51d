//! The two on-disk lock formats.
//!
//! - The freeze file (`freezed.txt`) pins every resolved package, one
//!   `name==version` line each, alphabetically.
//! - The records file (`pundles.txt`) maps every importable module to the
//!   pundle that provides it, one `name###version###path` line each.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use pundler_util::errors::{PundlerError, PundlerResult};

use crate::distribution::Distribution;

/// Separator between fields of a records-file line.
pub const RECORD_SEPARATOR: &str = "###";

/// Resolved package pins written after a successful resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreezeFile {
    pub packages: Vec<FrozenPackage>,
}

/// A single `name==version` pin.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrozenPackage {
    pub name: String,
    pub version: String,
}

impl FreezeFile {
    /// Build from resolved distributions; names are lower-cased and sorted.
    ///
    /// Only the lowest version of a name is kept; any other is logged and dropped.
    pub fn from_distributions<'a>(dists: impl IntoIterator<Item = &'a Distribution>) -> Self {
        let mut packages: Vec<FrozenPackage> = dists
            .into_iter()
            .map(|d| FrozenPackage {
                name: d.key(),
                version: d.version.clone(),
            })
            .collect();
        packages.sort();
        packages.dedup_by(|dropped, kept| {
            let duplicate = dropped.name == kept.name;
            if duplicate && dropped.version != kept.version {
                tracing::warn!(
                    "{} is pinned to {} and {}; keeping {}",
                    kept.name,
                    kept.version,
                    dropped.version,
                    kept.version
                );
            }
            duplicate
        });
        Self { packages }
    }

    /// Parse `name==version` lines, ignoring blanks and `#` comments.
    pub fn parse(content: &str) -> PundlerResult<Self> {
        let mut packages = Vec::new();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, version) = line
                .split_once("==")
                .ok_or_else(|| PundlerError::parse(line, "expected `name==version`"))?;
            let (name, version) = (name.trim(), version.trim());
            if name.is_empty()
                || version.is_empty()
                || version.starts_with('=')
                || version.contains("==")
            {
                return Err(PundlerError::parse(line, "expected `name==version`"));
            }
            packages.push(FrozenPackage {
                name: name.to_lowercase(),
                version: version.to_string(),
            });
        }
        Ok(Self { packages })
    }

    pub fn from_path(path: &Path) -> PundlerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// One `name==version` line per package, each newline-terminated.
    /// A file with no pins is a single newline.
    pub fn render(&self) -> String {
        if self.packages.is_empty() {
            return "\n".to_string();
        }
        let mut out = String::new();
        for pkg in &self.packages {
            let _ = writeln!(out, "{}=={}", pkg.name, pkg.version);
        }
        out
    }

    /// Overwrite `path` with the rendered pins.
    pub fn write_to(&self, path: &Path) -> PundlerResult<()> {
        std::fs::write(path, self.render())?;
        tracing::debug!("Wrote {} pins to {}", self.packages.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Where one importable module of an installed pundle lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PundleRecord {
    pub version: String,
    /// Importable module name.
    pub name: String,
    /// A `.py` file for single-file modules, or the package directory.
    pub path: PathBuf,
}

/// The full set of module records read by the finder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordsFile {
    pub records: Vec<PundleRecord>,
}

impl RecordsFile {
    /// Parse `name###version###path` lines; blank lines are ignored.
    pub fn parse(content: &str) -> PundlerResult<Self> {
        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(RECORD_SEPARATOR).map(str::trim).collect();
            match fields.as_slice() {
                [name, version, path]
                    if !name.is_empty() && !version.is_empty() && !path.is_empty() =>
                {
                    records.push(PundleRecord {
                        version: version.to_string(),
                        name: name.to_string(),
                        path: PathBuf::from(path),
                    });
                }
                _ => {
                    return Err(PundlerError::parse(
                        line,
                        "expected `name###version###path`",
                    ));
                }
            }
        }
        Ok(Self { records })
    }

    /// Load a records file. A missing file is a [`PundlerError::MissingInput`].
    pub fn from_path(path: &Path) -> PundlerResult<Self> {
        if !path.is_file() {
            return Err(PundlerError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            let _ = writeln!(
                out,
                "{}{sep}{}{sep}{}",
                record.name,
                record.version,
                record.path.display(),
                sep = RECORD_SEPARATOR
            );
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> PundlerResult<()> {
        std::fs::write(path, self.render())?;
        tracing::debug!(
            "Wrote {} module records to {}",
            self.records.len(),
            path.display()
        );
        Ok(())
    }
}
