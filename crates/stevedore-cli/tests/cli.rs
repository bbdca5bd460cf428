//! Integration tests for the Stevedore CLI.
//!
//! Each test creates a throwaway git checkout in a temporary directory,
//! invokes the `stevedore` binary via `assert_cmd`, and checks outputs
//! and exit codes. Tests that need a real container engine return early
//! when `docker` is unavailable.

#![allow(deprecated)] // cargo_bin deprecation: macro replacement not yet stable

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;

/// Convenience: get a `Command` for the `stevedore` binary.
fn stevedore() -> Command {
    Command::cargo_bin("stevedore").expect("stevedore binary not found")
}

fn git(dir: &Path, args: &[&str]) {
    let out = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git failed to start");
    assert!(out.status.success(), "git {args:?} failed");
}

/// Create a git repo with an initial commit.
fn init_test_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "user.email", "test@test.com"]);
    git(dir, &["config", "user.name", "Test"]);
    std::fs::write(dir.join("main.go"), "package main\n").expect("write failed");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", "initial"]);
}

fn head_commit(dir: &Path) -> String {
    let out = StdCommand::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .expect("git rev-parse failed");
    String::from_utf8(out.stdout).expect("utf8").trim().to_owned()
}

fn print_lines(dir: &Path) -> Vec<String> {
    let output = stevedore()
        .args(["print", "--project-dir", dir.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(str::to_owned)
        .collect()
}

fn docker_available() -> bool {
    StdCommand::new("docker")
        .arg("version")
        .output()
        .is_ok_and(|out| out.status.success())
}

// ─── print tests ────────────────────────────────────────────

#[test]
fn print_emits_six_key_value_lines() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    let lines = print_lines(dir.path());

    let keys: Vec<&str> = lines
        .iter()
        .map(|l| l.split_once('=').expect("KEY=value").0)
        .collect();
    assert_eq!(
        keys,
        ["VERSION", "BUILD_DATE", "VCS_URL", "VCS_REF", "NAME", "VENDOR"]
    );
    assert!(lines.iter().all(|l| !l.ends_with('=')), "empty value: {lines:?}");
    assert_eq!(lines[0], format!("VERSION={}", head_commit(dir.path())));
}

#[test]
fn print_vcs_ref_is_prefix_of_version() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    let lines = print_lines(dir.path());
    let version = lines[0].trim_start_matches("VERSION=");
    let vcs_ref = lines[3].trim_start_matches("VCS_REF=");

    assert!(version.starts_with(vcs_ref));
    assert!(vcs_ref.len() < version.len());
}

#[test]
fn print_twice_is_stable_and_leaves_tree_clean() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    let first = print_lines(dir.path());
    let second = print_lines(dir.path());

    let without_date = |lines: &[String]| -> Vec<String> {
        lines
            .iter()
            .filter(|l| !l.starts_with("BUILD_DATE="))
            .cloned()
            .collect()
    };
    assert_eq!(without_date(&first), without_date(&second));

    let status = StdCommand::new("git")
        .args(["status", "--porcelain"])
        .current_dir(dir.path())
        .output()
        .expect("git status failed");
    assert!(status.stdout.is_empty(), "print should not touch the checkout");
}

#[test]
fn print_json_output() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    let output = stevedore()
        .args(["print", "--json", "--project-dir", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    assert_eq!(json["VERSION"], head_commit(dir.path()).as_str());
    assert_eq!(json["NAME"], json["VCS_URL"]);
}

#[test]
fn print_outside_repo_fails() {
    let dir = tempfile::tempdir().unwrap();

    stevedore()
        .args(["print", "--project-dir", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("git metadata unavailable"));
}

#[test]
fn print_accepts_relative_project_dirs() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    let commit = head_commit(dir.path());
    let name = dir
        .path()
        .canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();

    for (cwd, rel) in [
        (dir.path(), "."),
        (dir.path(), "sub"),
        (dir.path(), "sub/.."),
        (sub.as_path(), ".."),
        (sub.as_path(), "."),
    ] {
        stevedore()
            .current_dir(cwd)
            .args(["print", "--project-dir", rel])
            .assert()
            .success()
            .stdout(
                predicate::str::contains(format!("VERSION={commit}\n"))
                    .and(predicate::str::contains(format!("VCS_URL={name}\n")))
                    .and(predicate::str::contains(format!("NAME={name}\n"))),
            );
    }
}

// ─── build tests ────────────────────────────────────────────

#[test]
fn build_dry_run_lists_build_args_tag_and_context() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());
    let commit = head_commit(dir.path());

    stevedore()
        .args([
            "build",
            "--dry-run",
            "--tool",
            "sh",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!("--build-arg VERSION={commit}"))
                .and(predicate::str::contains(format!(
                    "--build-arg VCS_REF={}",
                    &commit[..7]
                )))
                .and(predicate::str::contains("--build-arg 'BUILD_DATE="))
                .and(predicate::str::contains(
                    "-t go-docker-multi-stage-build:latest .",
                )),
        );
}

#[test]
fn build_dry_run_honours_project_config() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());
    std::fs::write(
        dir.path().join("stevedore.toml"),
        "tag = \"hello:dev\"\ncontext = \"demo\"\ndockerfile = \"demo/Dockerfile\"\n",
    )
    .unwrap();

    stevedore()
        .args([
            "build",
            "--dry-run",
            "--tool",
            "sh",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("build -f demo/Dockerfile --build-arg")
                .and(predicate::str::contains("-t hello:dev demo")),
        );
}

#[test]
fn build_exit_code_mirrors_tool() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    stevedore()
        .args([
            "build",
            "--tool",
            "false",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .code(1);
}

#[cfg(unix)]
#[test]
fn build_exit_code_mirrors_tool_beyond_one() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());
    let bin = tempfile::tempdir().unwrap();
    let tool = bin.path().join("fake-build-tool");
    std::fs::write(&tool, "#!/bin/sh\nexit 3\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    stevedore()
        .args([
            "build",
            "--tool",
            tool.to_str().unwrap(),
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .code(3);
}

#[test]
fn build_with_missing_tool_fails() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    stevedore()
        .args([
            "build",
            "--tool",
            "definitely-not-a-build-tool-xyz",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found on PATH"));
}

#[test]
fn build_with_malformed_dockerfile_registers_no_image() {
    if !docker_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());
    std::fs::write(dir.path().join("Dockerfile"), "FROM\nTHIS IS NOT AN INSTRUCTION\n").unwrap();
    let tag = format!("stevedore-test-malformed:{}", std::process::id());

    stevedore()
        .args([
            "build",
            "--tag",
            &tag,
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .failure();

    let inspect = StdCommand::new("docker")
        .args(["image", "inspect", &tag])
        .output()
        .expect("docker image inspect failed to start");
    assert!(!inspect.status.success(), "no image should exist under {tag}");
}

// ─── labels tests ───────────────────────────────────────────

#[test]
fn labels_lists_label_schema() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    stevedore()
        .args(["labels", "--project-dir", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("org.label-schema.docker.schema-version=1.0")
                .and(predicate::str::contains("org.label-schema.vcs-url=https://github.com/")),
        );
}

#[test]
fn labels_as_dockerfile_instruction() {
    let dir = tempfile::tempdir().unwrap();
    init_test_repo(dir.path());

    stevedore()
        .args([
            "labels",
            "--dockerfile",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("LABEL")
                .and(predicate::str::contains("org.label-schema.vcs-ref=\"")),
        );
}
