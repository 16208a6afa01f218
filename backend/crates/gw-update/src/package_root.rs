use crate::{Result as UpdateErrorResult, UpdateError};

use std::panic::Location;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use error_location::ErrorLocation;

/// Hints for locating the installation root
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRootOptions {
    /// Path of the running executable, when known
    pub exe: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl PackageRootOptions {
    /// Options for the current process.
    pub fn current() -> UpdateErrorResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| UpdateError::WorkingDirectory {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            exe: std::env::current_exe().ok(),
            cwd,
        })
    }
}

/// Finds the root directory the update procedure operates on.
///
/// `Ok(None)` means no root could be identified and the caller should fall
/// back to the working directory.
#[async_trait]
pub trait PackageRootResolver: Send + Sync {
    async fn resolve(&self, options: &PackageRootOptions) -> UpdateErrorResult<Option<PathBuf>>;
}

/// Resolves the root from an explicit override or the nearest git checkout.
#[derive(Debug, Clone, Default)]
pub struct ExecutableRootResolver {
    override_root: Option<PathBuf>,
}

impl ExecutableRootResolver {
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }
}

#[async_trait]
impl PackageRootResolver for ExecutableRootResolver {
    async fn resolve(&self, options: &PackageRootOptions) -> UpdateErrorResult<Option<PathBuf>> {
        if let Some(root) = &self.override_root {
            if !root.is_dir() {
                return Err(UpdateError::RootResolution {
                    message: format!("configured update root {} does not exist", root.display()),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            return Ok(Some(root.clone()));
        }

        let from_exe = options
            .exe
            .as_deref()
            .and_then(Path::parent)
            .and_then(find_git_root);

        Ok(from_exe.or_else(|| find_git_root(&options.cwd)))
    }
}

/// Nearest ancestor of `start` (inclusive) containing a `.git` entry.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
