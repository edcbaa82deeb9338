//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{package_cmd, prefs_cmd, settings_cmd};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "pkgsync")]
#[command(author, version, about = "Share a project folder as a package and import teammates' packages")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (defaults to the nearest directory containing Assets/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    /// Package service executable
    #[arg(long, global = true, env = "PKGSYNC_PACKAGER")]
    pub packager: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the preference directory for this project
    Init,

    /// Show the saved import and export settings
    Show,

    /// Change the saved import and export settings
    Set {
        /// Package file to import
        #[arg(long)]
        import_path: Option<String>,

        /// Identifier of the folder to export
        #[arg(long)]
        export_source: Option<String>,

        /// Where to write the exported package
        #[arg(long)]
        export_target: Option<String>,
    },

    /// Read and write raw preference entries
    #[command(subcommand)]
    Prefs(prefs_cmd::PrefsCommands),

    /// Export the shared folder as a package
    Export,

    /// Import the saved package
    Import,

    /// Import the saved package, then export the shared folder
    Sync,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("pkgsync starting");

    let project = open_project(cli.project.as_deref())?;
    output.verbose_ctx("project", &format!("Project root: {}", project.root().display()));

    let packager = cli.packager.as_deref();

    match cli.command {
        Commands::Init => {
            let store = project.prefs()?;
            output.success(&format!(
                "Preferences stored in {}",
                store.root().display()
            ));
        }

        Commands::Show => settings_cmd::show(&project, &output)?,

        Commands::Set {
            import_path,
            export_source,
            export_target,
        } => settings_cmd::set(&project, &output, import_path, export_source, export_target)?,

        Commands::Prefs(cmd) => prefs_cmd::run(cmd, &project, &output)?,

        Commands::Export => package_cmd::export(&project, &config, packager, &output)?,
        Commands::Import => package_cmd::import(&project, &config, packager, &output)?,
        Commands::Sync => package_cmd::sync(&project, &config, packager, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn open_project(root: Option<&Path>) -> Result<Project> {
    match root {
        Some(root) => Project::open(root),
        None => Project::open_current(),
    }
}
