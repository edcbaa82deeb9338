//! pkgsync - keep a shared project folder in sync through packages
//!
//! A project folder is exported as a package for teammates, and their
//! packages are imported back. The chosen paths are remembered between
//! sessions in a small per-project settings store.

pub mod domain;
pub mod storage;
pub mod package;
pub mod cli;

pub use domain::{SyncEdit, SyncSaveData, ValidationError};
pub use storage::{PrefStore, Record, StoreError};
