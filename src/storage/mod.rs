//! # Storage Layer
//!
//! Persistence for pkgsync: plain files, one per setting.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Preferences | Text / pretty JSON | `<project>/CustomProjectPrefs/{key}.json` |
//! | Config | TOML | `~/.config/pkgsync/config.toml` |
//!
//! ## Project Structure
//!
//! ```text
//! <project>/
//! ├── Assets/                 # Project data directory (marks the root)
//! └── CustomProjectPrefs/
//!     └── SyncSaveData.json   # Saved import/export paths
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Locates the project root
//! - [`PrefStore`] - Key-value preference store
//! - [`Config`] - Global configuration

mod config;
mod prefs;
mod project;

pub use config::{Config, ConfigError, OutputFormat, PackageConfig, CONFIG_DIR_ENV};
pub use prefs::{PrefStore, Record, StoreError, ENTRY_EXTENSION, PREFS_DIR_NAME};
pub use project::{Project, ProjectError, DATA_DIR_NAME};
