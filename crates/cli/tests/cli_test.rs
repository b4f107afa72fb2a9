//! End-to-end tests of the buildium binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cargo_project(dir: &Path) {
    fs::write(
        dir.join("Cargo.toml"),
        "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    )
    .unwrap();
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(dir.join("src").join("main.rs"), "fn main() {}\n").unwrap();
}

fn buildium(home: &TempDir, cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("buildium").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG").current_dir(cwd);
    cmd
}

#[test]
fn test_targets_lists_cargo_commands() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    cargo_project(project.path());

    buildium(&home, project.path())
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("▶ Cargo: build"))
        .stdout(predicate::str::contains("Cargo: test"))
        .stdout(predicate::str::contains("Cargo: run"));
}

#[test]
fn test_targets_json_output() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    cargo_project(project.path());
    fs::write(
        project.path().join(".buildium.json"),
        r#"{ "name": "all", "cmd": "make", "keymap": "ctrl-alt-b" }"#,
    )
    .unwrap();

    let output = buildium(&home, project.path())
        .args(["targets", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entry = &listing[0];
    assert_eq!(entry["active"], "Custom: all");
    assert_eq!(entry["targets"][0]["name"], "Custom: all");
    assert_eq!(entry["targets"][0]["commandName"], "buildium:trigger:Custom: all");
    assert_eq!(entry["targets"][1]["name"], "Cargo: build");
}

#[test]
fn test_show_prints_named_target() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    cargo_project(project.path());

    buildium(&home, project.path())
        .args(["show", ".", "--target", "Cargo: test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🎯 Target: Cargo: test"))
        .stdout(predicate::str::contains("$ cargo test"))
        .stdout(predicate::str::contains("• shell: false"));
}

#[test]
fn test_show_unknown_target_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    cargo_project(project.path());

    buildium(&home, project.path())
        .args(["show", ".", "--target", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No target named \"nope\""));
}

#[test]
fn test_show_without_targets_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    buildium(&home, project.path())
        .args(["show", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No build targets found"));
}

#[test]
fn test_broken_build_file_is_reported_and_cargo_still_listed() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    cargo_project(project.path());
    fs::write(project.path().join(".buildium.json"), "{ \"cmd\": ").unwrap();

    buildium(&home, project.path())
        .arg("targets")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid build file."))
        .stdout(predicate::str::contains("▶ Cargo: build"));
}

#[test]
fn test_config_file_enables_summary() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    cargo_project(project.path());
    fs::write(
        project.path().join(".buildium-config.json"),
        r#"{ "notification_on_refresh": true }"#,
    )
    .unwrap();

    buildium(&home, project.path())
        .arg("targets")
        .assert()
        .success()
        .stderr(predicate::str::contains("Build targets parsed."));
}

#[test]
fn test_invalid_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let config = project.path().join("custom.json");
    fs::write(&config, r#"{ "command_namespace": "has space" }"#).unwrap();

    buildium(&home, project.path())
        .arg("targets")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_missing_project_path_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    buildium(&home, project.path())
        .args(["targets", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project path not found"));
}
