//! CLI integration tests for pkgsync
//!
//! Each test runs the binary inside a throwaway project directory with an
//! isolated config directory.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the pkgsync binary, running inside `dir`
fn pkgsync(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("pkgsync"));
    cmd.current_dir(dir)
        .env("PKGSYNC_CONFIG_DIR", dir.join(".pkgsync-config"))
        .env_remove("PKGSYNC_PACKAGER");
    cmd
}

/// Create a temporary directory laid out like a project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("Assets").join("Shared")).unwrap();
    dir
}

fn saved_json(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("CustomProjectPrefs/SyncSaveData.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// =============================================================================
// Project and store
// =============================================================================

#[test]
fn test_init_creates_prefs_dir() {
    let dir = setup_project();

    pkgsync(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("CustomProjectPrefs"));

    assert!(dir.path().join("CustomProjectPrefs").is_dir());
}

#[test]
fn test_init_is_idempotent() {
    let dir = setup_project();

    pkgsync(dir.path()).arg("init").assert().success();
    pkgsync(dir.path()).arg("init").assert().success();
}

#[test]
fn test_runs_from_subdirectory() {
    let dir = setup_project();

    pkgsync(&dir.path().join("Assets/Shared"))
        .arg("init")
        .assert()
        .success();

    assert!(dir.path().join("CustomProjectPrefs").is_dir());
    assert!(!dir.path().join("Assets/Shared/CustomProjectPrefs").exists());
}

#[test]
fn test_outside_project_fails() {
    let dir = TempDir::new().unwrap();

    pkgsync(dir.path())
        .arg("--project")
        .arg(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a project directory"));
}

// =============================================================================
// Saved settings
// =============================================================================

#[test]
fn test_show_defaults() {
    let dir = setup_project();

    pkgsync(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn test_set_then_show() {
    let dir = setup_project();
    let package = dir.path().join("a.unitypackage");

    pkgsync(dir.path())
        .args(["set", "--export-source", "abc123", "--export-target"])
        .arg(dir.path().join("out.unitypackage"))
        .arg("--import-path")
        .arg(&package)
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    let json = saved_json(dir.path());
    assert_eq!(json["rootFileGuid"], "abc123");
    assert_eq!(json["packageFilePath"], package.to_str().unwrap());

    let output = pkgsync(dir.path())
        .args(["show", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let shown: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(shown, json);
}

#[test]
fn test_set_keeps_other_fields() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["set", "--export-source", "abc123"])
        .assert()
        .success();
    pkgsync(dir.path())
        .args(["set", "--export-target", "out.unitypackage"])
        .assert()
        .success();

    let json = saved_json(dir.path());
    assert_eq!(json["rootFileGuid"], "abc123");
    assert!(json["targetFilePath"]
        .as_str()
        .unwrap()
        .ends_with("out.unitypackage"));
}

#[test]
fn test_set_relative_path_is_made_absolute() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["set", "--export-target", "build/out.unitypackage"])
        .assert()
        .success();

    let json = saved_json(dir.path());
    let target = json["targetFilePath"].as_str().unwrap();
    assert!(Path::new(target).is_absolute());
}

#[test]
fn test_set_without_changes_fails() {
    let dir = setup_project();

    pkgsync(dir.path())
        .arg("set")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_malformed_settings_are_reported() {
    let dir = setup_project();
    fs::create_dir_all(dir.path().join("CustomProjectPrefs")).unwrap();
    fs::write(
        dir.path().join("CustomProjectPrefs/SyncSaveData.json"),
        "{ not json",
    )
    .unwrap();

    pkgsync(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'SyncSaveData'"));
}

#[test]
fn test_reads_settings_written_by_hand() {
    let dir = setup_project();
    fs::create_dir_all(dir.path().join("CustomProjectPrefs")).unwrap();
    fs::write(
        dir.path().join("CustomProjectPrefs/SyncSaveData.json"),
        r#"{
    "packageFilePath": "a.pkg",
    "rootFileGuid": "abc123",
    "targetFilePath": "out.pkg"
}"#,
    )
    .unwrap();

    pkgsync(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("abc123"))
        .stdout(predicate::str::contains("out.pkg"));
}

// =============================================================================
// Raw preferences
// =============================================================================

#[test]
fn test_prefs_round_trip() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["prefs", "set", "LastBuild", "2024-03-01"])
        .assert()
        .success();

    pkgsync(dir.path())
        .args(["prefs", "get", "LastBuild"])
        .assert()
        .success()
        .stdout("2024-03-01\n");

    assert_eq!(
        fs::read_to_string(dir.path().join("CustomProjectPrefs/LastBuild.json")).unwrap(),
        "2024-03-01"
    );
}

#[test]
fn test_prefs_get_missing_is_not_an_error() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["prefs", "get", "Unknown"])
        .assert()
        .success()
        .stdout("");

    pkgsync(dir.path())
        .args(["prefs", "get", "Unknown", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\":null"));
}

#[test]
fn test_prefs_rejects_path_keys() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["prefs", "set", "../escape", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid preference key"));

    assert!(!dir.path().join("escape.json").exists());
}

#[test]
fn test_prefs_list() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["prefs", "set", "B", "1"])
        .assert()
        .success();
    pkgsync(dir.path())
        .args(["prefs", "set", "A", "2"])
        .assert()
        .success();

    pkgsync(dir.path())
        .args(["prefs", "list"])
        .assert()
        .success()
        .stdout("A\nB\n");
}

#[test]
fn test_config_default_format() {
    let dir = setup_project();
    let config_dir = dir.path().join(".pkgsync-config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "default_format = \"json\"\n").unwrap();

    pkgsync(dir.path())
        .args(["prefs", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"path\""));
}

// =============================================================================
// Package actions
// =============================================================================

#[test]
fn test_export_without_source_is_rejected() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["set", "--export-target", "out.unitypackage"])
        .assert()
        .success();

    // The packager does not exist, so reaching it would fail differently
    pkgsync(dir.path())
        .args(["--packager", "/nonexistent/packager", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No folder to export"));

    assert!(!dir.path().join("out.unitypackage").exists());
}

#[test]
fn test_export_without_target_is_rejected() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["set", "--export-source", "abc123"])
        .assert()
        .success();

    pkgsync(dir.path())
        .args(["--packager", "/nonexistent/packager", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No export target"));
}

#[test]
fn test_import_without_package_is_rejected() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["--packager", "/nonexistent/packager", "import"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package to import"));
}

#[test]
fn test_import_missing_package_file_is_rejected() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["set", "--import-path", "gone.unitypackage"])
        .assert()
        .success();

    pkgsync(dir.path())
        .args(["--packager", "/nonexistent/packager", "import"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Package file not found"));
}

#[test]
fn test_export_checks_settings_before_packager() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["set", "--export-target", "out.unitypackage"])
        .assert()
        .success();

    pkgsync(dir.path())
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No folder to export"));
}

#[test]
fn test_import_checks_settings_before_packager() {
    let dir = setup_project();

    pkgsync(dir.path())
        .arg("import")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package to import"));
}

#[test]
fn test_export_without_packager_fails() {
    let dir = setup_project();

    pkgsync(dir.path())
        .args(["set", "--export-source", "abc123", "--export-target", "out.unitypackage"])
        .assert()
        .success();

    pkgsync(dir.path())
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package service configured"));
}

#[cfg(unix)]
mod with_packager {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Writes a packager that logs each request line and reports success
    fn fake_packager(dir: &Path) -> (PathBuf, PathBuf) {
        let script = dir.join("fake-packager");
        let log = dir.join("requests.log");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\nread line\necho \"$line\" >> '{}'\necho '{{\"success\":true}}'\n",
                log.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        (script, log)
    }

    fn requests(log: &Path) -> Vec<serde_json::Value> {
        fs::read_to_string(log)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_export_calls_packager() {
        let dir = setup_project();
        let (script, log) = fake_packager(dir.path());

        pkgsync(dir.path())
            .args(["set", "--export-source", "abc123", "--export-target", "out.zip"])
            .assert()
            .success();

        pkgsync(dir.path())
            .arg("--packager")
            .arg(&script)
            .arg("export")
            .assert()
            .success()
            .stdout(predicate::str::contains("Exported abc123"));

        let requests = requests(&log);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["operation"], "export");
        assert_eq!(requests[0]["params"]["source"], "abc123");
        assert_eq!(requests[0]["params"]["recurse"], true);
        assert!(requests[0]["params"]["target"]
            .as_str()
            .unwrap()
            .ends_with("out.unitypackage"));
    }

    #[test]
    fn test_sync_imports_then_exports() {
        let dir = setup_project();
        let (script, log) = fake_packager(dir.path());
        fs::write(dir.path().join("teammate.unitypackage"), b"pkg").unwrap();

        pkgsync(dir.path())
            .args([
                "set",
                "--import-path",
                "teammate.unitypackage",
                "--export-source",
                "abc123",
                "--export-target",
                "out.unitypackage",
            ])
            .assert()
            .success();

        pkgsync(dir.path())
            .env("PKGSYNC_PACKAGER", &script)
            .args(["sync", "--format", "json"])
            .assert()
            .success();

        let requests = requests(&log);
        let operations: Vec<_> = requests.iter().map(|r| r["operation"].clone()).collect();
        assert_eq!(operations, vec!["import", "export"]);
        assert_eq!(requests[0]["params"]["interactive"], false);
    }

    #[test]
    fn test_sync_with_bad_export_imports_nothing() {
        let dir = setup_project();
        let (script, log) = fake_packager(dir.path());
        fs::write(dir.path().join("teammate.unitypackage"), b"pkg").unwrap();

        pkgsync(dir.path())
            .args(["set", "--import-path", "teammate.unitypackage"])
            .assert()
            .success();

        pkgsync(dir.path())
            .arg("--packager")
            .arg(&script)
            .arg("sync")
            .assert()
            .failure();

        assert!(!log.exists());
    }
}
