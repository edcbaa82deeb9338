//! Package service implementations

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use super::protocol::{ExportRequest, ImportRequest, PackageRequest, PackageResponse};
use crate::storage::PackageConfig;

/// Something that can build and unpack packages
pub trait PackageService {
    /// Writes the source folder into a package file
    fn export(&self, request: &ExportRequest) -> Result<()>;

    /// Unpacks a package file into the project
    fn import(&self, request: &ImportRequest) -> Result<()>;
}

/// Package service backed by an external executable
///
/// A service without a program can still be built; it fails on first use,
/// after the saved settings have been checked.
#[derive(Debug, Clone)]
pub struct CommandService {
    program: Option<PathBuf>,
    args: Vec<String>,
}

impl CommandService {
    /// Creates a service running `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
            args: Vec::new(),
        }
    }

    /// Builds the service from configuration
    ///
    /// `program` overrides the configured command.
    pub fn from_config(config: &PackageConfig, program: Option<&str>) -> Self {
        Self {
            program: program.or(config.command.as_deref()).map(PathBuf::from),
            args: config.args.clone(),
        }
    }

    /// Returns the executable path, if one is configured
    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }

    /// Sends one request and waits for the response
    pub fn execute(&self, request: &PackageRequest) -> Result<PackageResponse> {
        let program = self.program().ok_or_else(|| {
            anyhow::anyhow!(
                "No package service configured. Pass --packager or set package.command in the config."
            )
        })?;

        let mut child = Command::new(program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to spawn package service: {}", program.display()))?;

        let sent = match child.stdin.take() {
            Some(mut stdin) => serde_json::to_string(request)
                .context("Failed to serialize request")
                .and_then(|json| {
                    writeln!(stdin, "{}", json).context("Failed to write to package service")
                }),
            None => Err(anyhow::anyhow!("Failed to open package service stdin")),
        };

        let first_line = child
            .stdout
            .take()
            .and_then(|stdout| BufReader::new(stdout).lines().next());

        // Reap the child before looking at what it sent back
        let status = child.wait().context("Failed to wait for package service")?;
        sent?;

        let response_line = first_line
            .ok_or_else(|| anyhow::anyhow!("No response from package service"))?
            .context("Failed to read package service response")?;

        let response: PackageResponse = serde_json::from_str(&response_line)
            .context("Failed to parse package service response")?;

        if !status.success() && response.success {
            anyhow::bail!("Package service exited with {}", status);
        }

        Ok(response)
    }

    fn call(&self, request: PackageRequest) -> Result<()> {
        let response = self.execute(&request)?;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "unknown error".to_string());
            anyhow::bail!("Package service failed: {}", message);
        }

        Ok(())
    }
}

impl PackageService for CommandService {
    fn export(&self, request: &ExportRequest) -> Result<()> {
        self.call(PackageRequest::Export(request.clone()))
    }

    fn import(&self, request: &ImportRequest) -> Result<()> {
        self.call(PackageRequest::Import(request.clone()))
    }
}
