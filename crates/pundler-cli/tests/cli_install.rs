use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn pundler_cmd() -> Command {
    Command::cargo_bin("pundler").unwrap()
}

#[test]
fn test_install_without_requirements_fails() {
    let tmp = TempDir::new().unwrap();

    pundler_cmd()
        .current_dir(tmp.path())
        .args(["install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requirements.txt not found"));

    assert!(!tmp.path().join("freezed.txt").exists());
}

#[test]
fn test_install_empty_requirements_writes_empty_lockfiles() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("requirements.txt"), "# nothing yet\n\n").unwrap();

    pundler_cmd()
        .current_dir(tmp.path())
        .args(["install"])
        .assert()
        .success()
        .stderr(predicate::str::contains("0 installed"));

    assert_eq!(fs::read_to_string(tmp.path().join("freezed.txt")).unwrap(), "\n");
    assert_eq!(fs::read_to_string(tmp.path().join("pundles.txt")).unwrap(), "");
}

#[test]
fn test_lock_uses_configured_paths() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("pundler.toml"),
        "requirements = \"deps.txt\"\nfreeze-file = \"deps.lock\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("deps.txt"), "").unwrap();
    let sub = tmp.path().join("src");
    fs::create_dir_all(&sub).unwrap();

    pundler_cmd()
        .current_dir(&sub)
        .args(["lock"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Locked"));

    assert!(tmp.path().join("deps.lock").is_file());
    assert!(!sub.join("deps.lock").exists());
}

#[test]
fn test_invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("pundler.toml"), "pundle-dir = [\n").unwrap();

    pundler_cmd()
        .current_dir(tmp.path())
        .args(["lock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
