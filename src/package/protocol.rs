//! Package service protocol types
//!
//! The service is an external executable. It receives one JSON request
//! line on stdin and answers with one JSON response line on stdout.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Export a folder into a package file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Identifier of the folder to export
    pub source: String,

    /// Package file to write
    pub target: PathBuf,

    /// Include subfolders
    pub recurse: bool,
}

/// Import a package file into the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Package file to read
    pub package: PathBuf,

    /// Let the service prompt before importing
    pub interactive: bool,
}

/// A message sent to the package service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "params", rename_all = "snake_case")]
pub enum PackageRequest {
    Export(ExportRequest),
    Import(ImportRequest),
}

/// A response from the package service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Error message (if failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
