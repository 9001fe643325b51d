//! CLI argument definitions for Pundler.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pundler",
    version,
    about = "Install Python requirements as isolated per-version pundles",
    long_about = "Pundler resolves a requirements file into one pinned version per package, \
                  installs each into its own <name>-<version> directory and records where \
                  every importable module lives."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve requirements, write the freeze file and install missing pundles
    Install,

    /// Resolve requirements and write the freeze file without installing
    Lock,

    /// List installed pundles
    List,

    /// Check installed pundles against their fingerprints
    Verify,

    /// Show where a module would be imported from
    Find {
        /// Top-level module name
        module: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
