//! Command dispatch and handler modules.

mod find;
mod install;
mod list;
mod lock;
mod verify;

use std::path::PathBuf;

use miette::Result;

use pundler_core::config::{ProjectConfig, CONFIG_FILE};
use pundler_util::errors::PundlerError;
use pundler_util::fs::find_ancestor_with;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Install => install::exec(),
        Command::Lock => lock::exec(),
        Command::List => list::exec(),
        Command::Verify => verify::exec(),
        Command::Find { module } => find::exec(&module),
    }
}

/// The nearest ancestor holding a `pundler.toml`, else the current directory,
/// together with its configuration.
fn project() -> Result<(PathBuf, ProjectConfig)> {
    let cwd = std::env::current_dir().map_err(PundlerError::Io)?;
    let root = find_ancestor_with(&cwd, CONFIG_FILE).unwrap_or(cwd);
    tracing::debug!("Project root: {}", root.display());
    let config = ProjectConfig::load(&root)?;
    Ok((root, config))
}
