//! Locating the project's make.nu

use crate::error::{NumakeError, NumakeResult};
use std::path::{Path, PathBuf};

/// Name of the project script
pub const MAKEFILE_NAME: &str = "make.nu";

/// A project rooted at the directory holding make.nu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory containing make.nu
    pub root: PathBuf,
    /// Path to make.nu
    pub makefile: PathBuf,
}

impl Project {
    /// Search `start` and its ancestors for make.nu
    pub fn find(start: &Path) -> NumakeResult<Self> {
        let root = find_project_root(start)?;
        Ok(Self {
            makefile: root.join(MAKEFILE_NAME),
            root,
        })
    }

    /// Directory name shown in the interactive prompt
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }
}

/// Return the nearest directory at or above `start` that contains make.nu
pub fn find_project_root(start: &Path) -> NumakeResult<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(MAKEFILE_NAME).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| NumakeError::MakefileNotFound {
            start: start.to_path_buf(),
        })
}
