//! CLI subprocess integration tests.
//!
//! These tests invoke the `boxkit` binary as a subprocess against the mock
//! backend and verify exit codes, stdout content, and JSON output.

use std::path::{Path, PathBuf};
use std::process::Command;

fn boxkit_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_boxkit"));
    // The mock backend does not need distrobox installed.
    cmd.env("BOXKIT_SKIP_PREREQS", "1");
    cmd.env("BOXKIT_BACKEND", "mock");
    cmd.env_remove("SUDO_USER");
    cmd.env_remove("DOAS_USER");
    cmd
}

const MANIFEST: &str = r#"[base]
image=registry.fedoraproject.org/fedora-toolbox:40
additional_packages="git vim"
init_hooks="echo 'hello world'"

[dev]
include=base
additional_packages=htop
init_hooks=touch /tmp/ready
nvidia=true
"#;

fn write_manifest(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("distrobox.ini");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn cli_version_exits_zero() {
    let output = boxkit_bin().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("boxkit"), "version output: {stdout}");
}

#[test]
fn cli_help_lists_commands() {
    let output = boxkit_bin().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["create", "rm", "inspect", "completions"] {
        assert!(stdout.contains(command), "help must list '{command}'");
    }
}

#[test]
fn cli_dry_run_prints_create_commands() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);
    let output = boxkit_bin()
        .args(["create", "--dry-run", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].starts_with("distrobox-create --yes --name base"));
    assert!(lines[1].contains("--nvidia"));
    assert!(lines[1].contains(r#"--additional-packages "git vim htop""#));
    assert!(lines[1].contains("echo 'hello world' && touch /tmp/ready"));
}

#[test]
fn cli_replace_dry_run_plans_removal_first() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);
    let output = boxkit_bin()
        .args(["create", "-R", "-d", "-n", "dev", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert_eq!(lines[0], "distrobox-rm -f dev");
    assert!(lines[1].starts_with("distrobox-create --yes --name dev"));
}

#[test]
fn cli_create_json_reports_each_container() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);
    let output = boxkit_bin()
        .env("HOME", dir.path())
        .args(["--json", "create", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "base");
    assert_eq!(entries[0]["outcome"]["status"], "created");
    assert_eq!(entries[1]["name"], "dev");
}

#[test]
fn cli_inspect_json_decodes_hooks() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);
    let output = boxkit_bin()
        .args(["--json", "inspect", "-n", "dev", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let specs = json.as_array().unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0]["name"], "dev");
    assert_eq!(
        specs[0]["init_hooks"],
        ": ;  echo 'hello world' && touch /tmp/ready"
    );
    assert_eq!(specs[0]["additional_packages"][0], "git vim");
    assert_eq!(specs[0]["additional_packages"][1], "htop");
}

#[test]
fn cli_inspect_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);
    let output = boxkit_bin()
        .args(["inspect", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[base]"));
    assert!(stdout.contains("[dev]"));
    assert!(stdout.contains("nvidia"));
}

#[test]
fn cli_unknown_name_exits_zero_silently() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);
    let output = boxkit_bin()
        .args(["create", "-n", "nope", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let output = boxkit_bin()
        .args(["create", "--file"])
        .arg(dir.path().join("absent.ini"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn cli_circular_include_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "[a]\ninclude=b\n[b]\ninclude=a\n");
    let output = boxkit_bin()
        .args(["create", "-d", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("circular reference detected"), "{stderr}");
}

#[test]
fn cli_missing_include_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "[a]\ninclude=ghost\n");
    let output = boxkit_bin()
        .args(["inspect", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot include 'ghost'"), "{stderr}");
}

#[test]
fn cli_unknown_backend_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);
    let output = boxkit_bin()
        .env("BOXKIT_BACKEND", "lxc")
        .args(["rm", "--file"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn cli_completions_bash() {
    let output = boxkit_bin().args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("boxkit"));
}
