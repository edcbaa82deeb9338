//! Import and export actions
//!
//! Every action reads the saved settings fresh from the store and checks
//! them before the package service is called. A failed check leaves the
//! project untouched.

use anyhow::Result;

use super::protocol::{ExportRequest, ImportRequest};
use super::service::PackageService;
use crate::domain::{ExportPlan, ImportPlan, SyncSaveData};
use crate::storage::{PackageConfig, PrefStore};

/// Options applied to every package operation
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub extension: String,
    pub recurse: bool,
    pub interactive_import: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&PackageConfig::default())
    }
}

impl From<&PackageConfig> for SyncOptions {
    fn from(config: &PackageConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            recurse: config.recurse,
            interactive_import: config.interactive_import,
        }
    }
}

/// Runs package actions against the saved settings
pub struct Synchronizer<'a, S: PackageService> {
    store: &'a PrefStore,
    service: &'a S,
    options: SyncOptions,
}

impl<'a, S: PackageService> Synchronizer<'a, S> {
    pub fn new(store: &'a PrefStore, service: &'a S, options: SyncOptions) -> Self {
        Self {
            store,
            service,
            options,
        }
    }

    fn saved(&self) -> Result<SyncSaveData> {
        Ok(self.store.load::<SyncSaveData>()?)
    }

    /// Exports the saved folder to the saved target
    pub fn export(&self) -> Result<ExportPlan> {
        let plan = self.saved()?.export_plan(&self.options.extension)?;
        self.run_export(&plan)?;
        Ok(plan)
    }

    /// Imports the saved package
    pub fn import(&self) -> Result<ImportPlan> {
        let plan = self.saved()?.import_plan()?;
        self.run_import(&plan)?;
        Ok(plan)
    }

    /// Imports the saved package, then exports the saved folder
    ///
    /// Both halves are checked first so a bad export setting never leaves
    /// a half-finished sync behind.
    pub fn import_and_export(&self) -> Result<(ImportPlan, ExportPlan)> {
        let saved = self.saved()?;
        let import = saved.import_plan()?;
        let export = saved.export_plan(&self.options.extension)?;

        self.run_import(&import)?;
        self.run_export(&export)?;

        Ok((import, export))
    }

    fn run_export(&self, plan: &ExportPlan) -> Result<()> {
        self.service.export(&ExportRequest {
            source: plan.source.clone(),
            target: plan.target.clone(),
            recurse: self.options.recurse,
        })
    }

    fn run_import(&self, plan: &ImportPlan) -> Result<()> {
        self.service.import(&ImportRequest {
            package: plan.package.clone(),
            interactive: self.options.interactive_import,
        })
    }
}
