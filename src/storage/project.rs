//! Project discovery
//!
//! A project is any directory holding an `Assets/` data directory. The
//! preference store lives next to it.

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use super::PrefStore;

/// Name of the project's main data directory
pub const DATA_DIR_NAME: &str = "Assets";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not a project directory (no Assets/ folder): {}", .0.display())]
    NotInProject(PathBuf),

    #[error("No project found in the current directory or any parent")]
    NotFound,
}

/// A project on disk
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Opens the project rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(DATA_DIR_NAME).is_dir() {
            return Err(ProjectError::NotInProject(root).into());
        }

        Ok(Self { root })
    }

    /// Opens the project containing the current directory
    pub fn open_current() -> Result<Self> {
        let root = Self::find_root().ok_or(ProjectError::NotFound)?;
        Self::open(root)
    }

    /// Finds the project root by looking for the data directory upwards
    pub fn find_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_root_from(&current)
    }

    /// Finds the project root starting at `start`
    pub fn find_root_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(DATA_DIR_NAME).is_dir())
            .map(Path::to_path_buf)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR_NAME)
    }

    /// Resolves the preference store, creating its directory on first use
    pub fn prefs(&self) -> Result<PrefStore> {
        Ok(PrefStore::resolve(&self.root)?)
    }
}
