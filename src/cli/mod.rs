//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Settings | Saved paths | `show`, `set --export-target out.unitypackage` |
//! | Actions | Package work | `export`, `import`, `sync` |
//! | Raw | Preference entries | `prefs get <key>`, `prefs list` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod package_cmd;
mod prefs_cmd;
mod settings_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
