//! End-to-end CLI tests against the real binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn packtrain() -> Command {
    let mut cmd = Command::cargo_bin("packtrain").unwrap();
    // Force the deterministic non-interactive UI regardless of the host.
    cmd.env("CI", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    packtrain()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_prints_package_version() {
    packtrain()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn list_shows_builtin_integrations_and_hints() {
    let temp = TempDir::new().unwrap();
    packtrain()
        .args(["--project", temp.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aws"))
        .stdout(predicate::str::contains("boto3==1.16.62"))
        .stdout(predicate::str::contains("pip install packtrain[aws]"))
        .stdout(predicate::str::contains("pip install packtrain[all]"));
}

#[test]
fn list_json_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    let output = packtrain()
        .args(["--project", temp.path().to_str().unwrap(), "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.last().unwrap()["name"], "all");
    assert!(entries.iter().any(|e| e["name"] == "huggingface"));
}

#[test]
fn list_merges_project_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(".packtrain.yml"),
        "distribution: mypipelines\nintegrations:\n  vault:\n    requirements: [hvac==0.10.14]\n",
    )
    .unwrap();

    packtrain()
        .args(["--project", temp.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vault"))
        .stdout(predicate::str::contains("pip install mypipelines[vault]"));
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(".packtrain.yml"),
        "integrations:\n  all:\n    requirements: [foo==1.0]\n",
    )
    .unwrap();

    packtrain()
        .args(["--project", temp.path().to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved"));
}

#[test]
fn check_unknown_integration_exits_two() {
    let temp = TempDir::new().unwrap();
    packtrain()
        .args(["--project", temp.path().to_str().unwrap(), "check", "kubernetes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No integration named 'kubernetes'"))
        .stderr(predicate::str::contains("aws"))
        .stderr(predicate::str::contains("all"));
}

#[test]
fn completions_generate_for_bash() {
    packtrain()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("packtrain"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn write_fake_python(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-python");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn check_succeeds_against_a_complete_environment() {
        let temp = TempDir::new().unwrap();
        let python = write_fake_python(temp.path(), "printf 'boto3==1.16.62\\n'");

        packtrain()
            .args([
                "--project",
                temp.path().to_str().unwrap(),
                "check",
                "aws",
                "--python",
                python.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Integration 'aws' is ready"));
    }

    #[test]
    fn check_missing_dependency_exits_one() {
        let temp = TempDir::new().unwrap();
        let python = write_fake_python(temp.path(), "printf 'click==8.0.1\\n'");

        packtrain()
            .args([
                "--project",
                temp.path().to_str().unwrap(),
                "check",
                "aws",
                "--python",
                python.to_str().unwrap(),
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("boto3"))
            .stderr(predicate::str::contains("pip install packtrain[aws]"));
    }

    #[test]
    fn check_full_reports_every_gap() {
        let temp = TempDir::new().unwrap();
        let python = write_fake_python(temp.path(), "printf 'pg8000==1.16.5\\n'");

        packtrain()
            .args([
                "--project",
                temp.path().to_str().unwrap(),
                "check",
                "postgres",
                "--full",
                "--python",
                python.to_str().unwrap(),
            ])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("beam-nuggets"))
            .stdout(predicate::str::contains("sqlalchemy"));
    }

    #[test]
    fn check_json_reports_result() {
        let temp = TempDir::new().unwrap();
        let python = write_fake_python(temp.path(), "printf 'boto3==1.16.62\\n'");

        let output = packtrain()
            .args([
                "--project",
                temp.path().to_str().unwrap(),
                "check",
                "aws",
                "--json",
                "--python",
                python.to_str().unwrap(),
            ])
            .output()
            .unwrap();
        assert!(output.status.success());

        let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(payload["integration"], "aws");
        assert_eq!(payload["satisfied"], true);
        assert!(payload["missing"].as_array().unwrap().is_empty());
    }

    #[test]
    fn check_broken_environment_exits_one() {
        let temp = TempDir::new().unwrap();
        let python = write_fake_python(temp.path(), "echo 'No module named pip' >&2; exit 3");

        packtrain()
            .args([
                "--project",
                temp.path().to_str().unwrap(),
                "check",
                "aws",
                "--python",
                python.to_str().unwrap(),
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to query installed packages"));
    }

    #[test]
    fn check_honors_timeout_flag() {
        let temp = TempDir::new().unwrap();
        let python = write_fake_python(temp.path(), "sleep 30");

        packtrain()
            .args([
                "--project",
                temp.path().to_str().unwrap(),
                "check",
                "aws",
                "--timeout",
                "1",
                "--python",
                python.to_str().unwrap(),
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("timed out"));
    }
}
