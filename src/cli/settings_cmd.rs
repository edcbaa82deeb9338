//! Saved settings commands

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{SyncEdit, SyncSaveData};
use crate::storage::{Project, Record};

pub fn show(project: &Project, output: &Output) -> Result<()> {
    let store = project.prefs()?;
    let saved: SyncSaveData = store.load()?;

    if output.is_json() {
        output.data(&saved);
    } else {
        println!("Import");
        println!("  package:  {}", display(&saved.package_file_path));
        println!();
        println!("Export");
        println!("  folder:   {}", display(&saved.root_file_guid));
        println!("  target:   {}", display(&saved.target_file_path));
    }

    Ok(())
}

pub fn set(
    project: &Project,
    output: &Output,
    import_path: Option<String>,
    export_source: Option<String>,
    export_target: Option<String>,
) -> Result<()> {
    let edit = SyncEdit {
        package_file_path: import_path.map(absolute).transpose()?,
        root_file_guid: export_source,
        target_file_path: export_target.map(absolute).transpose()?,
    };

    if edit.is_empty() {
        anyhow::bail!("Nothing to change. Pass --import-path, --export-source or --export-target.");
    }

    let store = project.prefs()?;
    let saved: SyncSaveData = store.load()?;
    let updated = saved.apply(edit);

    if updated == saved {
        output.verbose_ctx("set", "Settings unchanged");
    }

    store.save(&updated)?;
    output.verbose_ctx(
        "set",
        &format!("Wrote {}", store.entry_path(SyncSaveData::KEY)?.display()),
    );

    if output.is_json() {
        output.data(&updated);
    } else {
        output.success("Settings saved");
    }

    Ok(())
}

/// Makes a path absolute so it survives a change of working directory
///
/// An empty value is kept as is; it clears the setting.
fn absolute(path: String) -> Result<String> {
    if path.trim().is_empty() {
        return Ok(path);
    }

    let resolved = std::path::absolute(&path)
        .with_context(|| format!("Failed to resolve path: {}", path))?;
    Ok(resolved.to_string_lossy().into_owned())
}

fn display(value: &str) -> &str {
    if value.trim().is_empty() {
        "(not set)"
    } else {
        value
    }
}
