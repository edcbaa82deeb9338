//! Domain models for pkgsync
//!
//! The saved settings and the checks run before any package work, without
//! any I/O beyond existence checks.

mod sync_data;

pub use sync_data::{ExportPlan, ImportPlan, SyncEdit, SyncSaveData, ValidationError};
