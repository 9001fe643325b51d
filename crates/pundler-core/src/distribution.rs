use std::fmt;

/// A concrete package version chosen by a locator, with its run-time requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    pub version: String,
    /// Requirement specifier strings this version declares for run time.
    pub requires: Vec<String>,
}

impl Distribution {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            requires: Vec::new(),
        }
    }

    /// Builder-style helper to attach run-time requirements.
    pub fn with_requires(mut self, requires: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.requires = requires.into_iter().map(Into::into).collect();
        self
    }

    /// The lower-cased name used for lockfiles and pundle directories.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
