use std::process::{Command, ExitStatus};

use crate::errors::PundlerError;

/// Builder for an external process run with inherited stdio.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program and arguments as a single display string.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command with inherited stdio and return its exit status.
    pub fn status(&self) -> Result<ExitStatus, PundlerError> {
        tracing::debug!("Running {}", self.display());
        Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(PundlerError::from)
    }
}
