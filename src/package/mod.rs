//! # Package Service
//!
//! Exporting and importing packages is delegated to an external program
//! speaking a one-line JSON protocol over stdin/stdout:
//!
//! ```text
//! -> {"operation":"export","params":{"source":"<id>","target":"out.unitypackage","recurse":true}}
//! <- {"success":true}
//! ```
//!
//! [`Synchronizer`] wires the saved settings to a [`PackageService`].

mod protocol;
mod service;
mod sync;

pub use protocol::{ExportRequest, ImportRequest, PackageRequest, PackageResponse};
pub use service::{CommandService, PackageService};
pub use sync::{SyncOptions, Synchronizer};
