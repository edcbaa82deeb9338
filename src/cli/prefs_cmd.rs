//! Raw preference commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Print the text stored under a key
    Get {
        /// Entry key
        key: String,
    },

    /// Store text under a key
    Set {
        /// Entry key
        key: String,

        /// Text to store
        value: String,
    },

    /// List stored keys
    List,

    /// Print the preference directory
    Path,
}

pub fn run(cmd: PrefsCommands, project: &Project, output: &Output) -> Result<()> {
    let store = project.prefs()?;

    match cmd {
        PrefsCommands::Get { key } => {
            let value = store.get_text(&key)?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "key": key,
                    "value": value,
                }));
            } else if let Some(value) = value {
                print!("{}", value);
                if !value.ends_with('\n') {
                    println!();
                }
            } else {
                output.verbose_ctx("prefs", &format!("No value stored for '{}'", key));
            }
        }

        PrefsCommands::Set { key, value } => {
            store.set_text(&key, &value)?;
            output.success(&format!("Stored '{}'", key));
        }

        PrefsCommands::List => {
            let keys = store.keys()?;

            if output.is_json() {
                output.data(&keys);
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }

        PrefsCommands::Path => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": store.root().display().to_string(),
                }));
            } else {
                println!("{}", store.root().display());
            }
        }
    }

    Ok(())
}
