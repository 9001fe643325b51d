use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use pundler_util::errors::PundlerError;

use crate::marker::MarkerEnvironment;

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE: &str = "pundler.toml";

/// Project configuration loaded from `pundler.toml`.
///
/// Every key is optional; relative paths are resolved against the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    #[serde(default = "default_requirements")]
    pub requirements: String,

    #[serde(default = "default_freeze_file")]
    pub freeze_file: String,

    #[serde(default = "default_records_file")]
    pub records_file: String,

    #[serde(default = "default_pundle_dir")]
    pub pundle_dir: String,

    #[serde(default)]
    pub installer: InstallerConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub environment: MarkerEnvironment,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            requirements: default_requirements(),
            freeze_file: default_freeze_file(),
            records_file: default_records_file(),
            pundle_dir: default_pundle_dir(),
            installer: InstallerConfig::default(),
            index: IndexConfig::default(),
            environment: MarkerEnvironment::default(),
        }
    }
}

fn default_requirements() -> String {
    "requirements.txt".to_string()
}

fn default_freeze_file() -> String {
    "freezed.txt".to_string()
}

fn default_records_file() -> String {
    "pundles.txt".to_string()
}

fn default_pundle_dir() -> String {
    "Pundledir".to_string()
}

/// Installer backend settings from `[installer]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    #[serde(default = "default_pip")]
    pub pip: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self { pip: default_pip() }
    }
}

fn default_pip() -> String {
    "ve/bin/pip".to_string()
}

/// Package index settings from `[index]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexConfig {
    #[serde(default = "default_index_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_index_url() -> String {
    "https://pypi.org/pypi".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ProjectConfig {
    /// Load `pundler.toml` from `project_root`, or return defaults if it doesn't exist.
    pub fn load(project_root: &Path) -> miette::Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                PundlerError::Config {
                    message: format!("Failed to read {}: {e}", path.display()),
                }
            })?;
            Self::parse_toml(&content).map_err(Into::into)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self, PundlerError> {
        toml::from_str(content).map_err(|e| PundlerError::Config {
            message: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })
    }

    pub fn requirements_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.requirements)
    }

    pub fn freeze_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.freeze_file)
    }

    pub fn records_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.records_file)
    }

    pub fn pundle_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.pundle_dir)
    }

    /// The pip executable; relative paths containing a separator are project-relative.
    pub fn pip_path(&self, project_root: &Path) -> String {
        let pip = Path::new(&self.installer.pip);
        if pip.is_relative() && pip.components().count() > 1 {
            project_root.join(pip).to_string_lossy().into_owned()
        } else {
            self.installer.pip.clone()
        }
    }
}
