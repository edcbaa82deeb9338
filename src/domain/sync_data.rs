//! Saved synchronization settings
//!
//! The three paths the tool remembers between sessions, plus the checks
//! each action runs before touching the package service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::Record;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No package to import. Set one with 'pkgsync set --import-path <file>'.")]
    MissingImportPath,

    #[error("No folder to export. Set one with 'pkgsync set --export-source <id>'.")]
    MissingExportSource,

    #[error("No export target. Set one with 'pkgsync set --export-target <file>'.")]
    MissingExportTarget,

    #[error("Package file not found: {}", .0.display())]
    PackageNotFound(PathBuf),
}

/// Paths remembered between sessions
///
/// Field names match the JSON written by earlier versions of the tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncSaveData {
    /// Package to import from a teammate
    pub package_file_path: String,

    /// Identifier of the folder to export
    pub root_file_guid: String,

    /// Where the exported package is written
    pub target_file_path: String,
}

impl Record for SyncSaveData {
    const KEY: &'static str = "SyncSaveData";
}

/// A pending change to the saved settings
///
/// `None` leaves a field as it is. `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncEdit {
    pub package_file_path: Option<String>,
    pub root_file_guid: Option<String>,
    pub target_file_path: Option<String>,
}

impl SyncEdit {
    /// Returns true if the edit changes nothing
    pub fn is_empty(&self) -> bool {
        self.package_file_path.is_none()
            && self.root_file_guid.is_none()
            && self.target_file_path.is_none()
    }
}

/// A validated import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub package: PathBuf,
}

/// A validated export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub source: String,
    pub target: PathBuf,
}

impl SyncSaveData {
    /// Returns a copy with the edit applied
    pub fn apply(&self, edit: SyncEdit) -> Self {
        Self {
            package_file_path: edit
                .package_file_path
                .unwrap_or_else(|| self.package_file_path.clone()),
            root_file_guid: edit
                .root_file_guid
                .unwrap_or_else(|| self.root_file_guid.clone()),
            target_file_path: edit
                .target_file_path
                .unwrap_or_else(|| self.target_file_path.clone()),
        }
    }

    /// Checks that an import can run
    pub fn import_plan(&self) -> Result<ImportPlan, ValidationError> {
        if is_blank(&self.package_file_path) {
            return Err(ValidationError::MissingImportPath);
        }

        let package = PathBuf::from(&self.package_file_path);
        if !package.is_file() {
            return Err(ValidationError::PackageNotFound(package));
        }

        Ok(ImportPlan { package })
    }

    /// Checks that an export can run
    ///
    /// The target keeps its name but always gets the package extension.
    pub fn export_plan(&self, extension: &str) -> Result<ExportPlan, ValidationError> {
        if is_blank(&self.root_file_guid) {
            return Err(ValidationError::MissingExportSource);
        }
        if is_blank(&self.target_file_path) {
            return Err(ValidationError::MissingExportTarget);
        }

        Ok(ExportPlan {
            source: self.root_file_guid.clone(),
            target: Path::new(&self.target_file_path).with_extension(extension),
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
