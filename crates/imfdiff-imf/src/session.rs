//! The currently open package.

use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::package::ImfPackage;

/// Holds at most one loaded package. A successful open replaces it whole; a
/// failed open leaves it untouched.
#[derive(Debug, Default)]
pub struct Session {
    package: Option<ImfPackage>,
}

impl Session {
    /// Create a session with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the package at `path` and make it current.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&ImfPackage> {
        let path = path.as_ref();
        match ImfPackage::from_path(path) {
            Ok(package) => Ok(self.replace(package)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open IMF package");
                Err(e)
            }
        }
    }

    /// Make `package` current, dropping the previous one.
    pub fn replace(&mut self, package: ImfPackage) -> &ImfPackage {
        if let Some(previous) = &self.package {
            info!(title = previous.title(), "Closing IMF package");
        }
        self.package.insert(package)
    }

    /// The current package, if any.
    pub fn package(&self) -> Option<&ImfPackage> {
        self.package.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.package.is_some()
    }

    /// Drop the current package.
    pub fn close(&mut self) -> Option<ImfPackage> {
        self.package.take()
    }
}
