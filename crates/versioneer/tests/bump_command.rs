mod common;

use common::{TestRepo, versioneer};
use predicates::str::contains;

#[test]
fn bump_yes_writes_suggested_version() {
    let repo = TestRepo::released();
    repo.write_manifest("1.1.0");

    versioneer()
        .args(["bump", "--yes"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(contains("1.1.0 -> 1.1.1"));

    assert!(repo.read("Cargo.toml").contains("version = \"1.1.1\""));
}

#[test]
fn bump_suggestion_follows_changelog() {
    let repo = TestRepo::released();
    repo.write_manifest("1.1.0");
    repo.write_changelog("1.4.0");

    versioneer()
        .args(["bump", "--yes"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(contains("1.1.0 -> 1.4.1"));
}

#[test]
fn bump_accepts_explicit_version_with_prefix() {
    let repo = TestRepo::released();
    repo.write_manifest("1.1.0");

    versioneer()
        .args(["bump", "v2.0.0"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(contains("1.1.0 -> 2.0.0"));

    let manifest = repo.read("Cargo.toml");
    assert!(manifest.contains("version = \"2.0.0\""));
    assert!(manifest.contains("name = \"demo\""));
}

#[test]
fn bump_rejects_invalid_version() {
    let repo = TestRepo::released();
    repo.write_manifest("1.1.0");

    versioneer()
        .args(["bump", "1.2"])
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(contains("'1.2' is not a valid semantic version"));

    assert!(repo.read("Cargo.toml").contains("version = \"1.1.0\""));
}

#[test]
fn bump_refuses_unchanged_version() {
    let repo = TestRepo::released();
    repo.write_manifest("1.1.0");

    versioneer()
        .args(["bump", "1.1.0"])
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(contains("already at version 1.1.0"));
}

#[test]
fn manifest_ahead_needs_confirmation() {
    let repo = TestRepo::released();
    repo.write_manifest("1.2.0");
    repo.write_changelog("1.1.0");

    versioneer()
        .args(["bump", "1.3.0"])
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(contains("requires a terminal; pass --yes"));

    assert!(repo.read("Cargo.toml").contains("version = \"1.2.0\""));

    versioneer()
        .args(["bump", "1.3.0", "--yes"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(contains("1.2.0 -> 1.3.0"));
}

#[test]
fn bump_without_manifest_fails() {
    let repo = TestRepo::released();

    versioneer()
        .args(["bump", "--yes"])
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(contains("no manifest found"));
}

#[test]
fn bump_without_version_needs_terminal() {
    let repo = TestRepo::released();
    repo.write_manifest("1.1.0");

    versioneer()
        .arg("bump")
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(contains("pass a version argument"));
}
