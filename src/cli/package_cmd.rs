//! Export and import commands

use anyhow::Result;

use super::output::Output;
use crate::package::{CommandService, SyncOptions, Synchronizer};
use crate::storage::{Config, PrefStore, Project};

pub fn export(
    project: &Project,
    config: &Config,
    packager: Option<&str>,
    output: &Output,
) -> Result<()> {
    let store = project.prefs()?;
    let service = service(config, packager, output);
    let sync = synchronizer(&store, &service, config);

    let plan = sync.export()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "exported": true,
            "source": plan.source,
            "target": plan.target.display().to_string(),
        }));
    } else {
        output.success(&format!(
            "Exported {} to {}",
            plan.source,
            plan.target.display()
        ));
    }

    Ok(())
}

pub fn import(
    project: &Project,
    config: &Config,
    packager: Option<&str>,
    output: &Output,
) -> Result<()> {
    let store = project.prefs()?;
    let service = service(config, packager, output);
    let sync = synchronizer(&store, &service, config);

    let plan = sync.import()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "imported": true,
            "package": plan.package.display().to_string(),
        }));
    } else {
        output.success(&format!("Imported {}", plan.package.display()));
    }

    Ok(())
}

pub fn sync(
    project: &Project,
    config: &Config,
    packager: Option<&str>,
    output: &Output,
) -> Result<()> {
    let store = project.prefs()?;
    let service = service(config, packager, output);
    let sync = synchronizer(&store, &service, config);

    let (import, export) = sync.import_and_export()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "imported": true,
            "package": import.package.display().to_string(),
            "exported": true,
            "source": export.source,
            "target": export.target.display().to_string(),
        }));
    } else {
        output.success(&format!("Imported {}", import.package.display()));
        output.success(&format!(
            "Exported {} to {}",
            export.source,
            export.target.display()
        ));
    }

    Ok(())
}

fn service(config: &Config, packager: Option<&str>, output: &Output) -> CommandService {
    let service = CommandService::from_config(&config.package, packager);
    match service.program() {
        Some(program) => output.verbose_ctx(
            "package",
            &format!("Using package service: {}", program.display()),
        ),
        None => output.verbose_ctx("package", "No package service configured"),
    }
    service
}

fn synchronizer<'a>(
    store: &'a PrefStore,
    service: &'a CommandService,
    config: &Config,
) -> Synchronizer<'a, CommandService> {
    Synchronizer::new(store, service, SyncOptions::from(&config.package))
}
