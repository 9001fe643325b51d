//! Installer backends.

use std::path::Path;

use pundler_util::errors::{PundlerError, PundlerResult};
use pundler_util::process::CommandBuilder;

/// Installs exactly one distribution, without its dependencies, into a directory.
pub trait Installer {
    fn install(&self, name: &str, version: &str, target_dir: &Path) -> PundlerResult<()>;
}

/// Runs `pip install --no-deps -t <dir>` as a subprocess.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    pip: String,
}

impl PipInstaller {
    pub fn new(pip: impl Into<String>) -> Self {
        Self { pip: pip.into() }
    }

    pub fn pip(&self) -> &str {
        &self.pip
    }

    pub fn command(&self, name: &str, version: &str, target_dir: &Path) -> CommandBuilder {
        CommandBuilder::new(&self.pip).args(pip_args(name, version, target_dir))
    }
}

/// Arguments for a dependency-free install of `name==version` into `target_dir`,
/// with console scripts redirected to `target_dir/.scripts`.
pub fn pip_args(name: &str, version: &str, target_dir: &Path) -> Vec<String> {
    let scripts = target_dir.join(".scripts");
    vec![
        "install".to_string(),
        "--no-deps".to_string(),
        format!("--install-option=--install-scripts={}", scripts.display()),
        "-t".to_string(),
        target_dir.display().to_string(),
        format!("{name}=={version}"),
    ]
}

impl Installer for PipInstaller {
    fn install(&self, name: &str, version: &str, target_dir: &Path) -> PundlerResult<()> {
        let cmd = self.command(name, version, target_dir);
        let status = cmd.status().map_err(|e| PundlerError::Install {
            name: name.to_string(),
            message: format!("failed to run `{}`: {e}", self.pip),
        })?;
        if !status.success() {
            return Err(PundlerError::Install {
                name: name.to_string(),
                message: format!("`{}` exited with {status}", cmd.display()),
            });
        }
        Ok(())
    }
}
