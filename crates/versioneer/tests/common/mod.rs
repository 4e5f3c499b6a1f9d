#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// 2023-11-14T22:13:20Z
const BASE_TIME: i64 = 1_700_000_000;

/// The binary with prompts disabled, so every test runs as it would in CI.
pub fn versioneer() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("versioneer");
    cmd.env("VERSIONEER_NO_TTY", "1").env_remove("VERSIONEER_LOG");
    cmd
}

pub struct TestRepo {
    dir: TempDir,
    repo: git2::Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = git2::Repository::init(dir.path()).expect("init repository");
        Self { dir, repo }
    }

    /// `feat: initial` tagged v1.0.0, `feat: search` tagged v1.1.0, then an untagged `fix: typo`.
    pub fn released() -> Self {
        let repo = Self::new();
        let first = repo.commit("feat: initial", 100);
        repo.tag("v1.0.0", first);
        let second = repo.commit("feat: search", 200);
        repo.tag("v1.1.0", second);
        repo.commit("fix: typo", 300);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn commit(&self, message: &str, offset: i64) -> git2::Oid {
        let time = git2::Time::new(BASE_TIME + offset, 0);
        let sig = git2::Signature::new("Test", "test@example.com", &time).expect("signature");
        let tree_id = self
            .repo
            .index()
            .expect("index")
            .write_tree()
            .expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .map(|oid| self.repo.find_commit(oid).expect("find parent"));
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("commit")
    }

    pub fn tag(&self, name: &str, target: git2::Oid) {
        let object = self.repo.find_object(target, None).expect("find object");
        let sig = git2::Signature::now("Test", "test@example.com").expect("signature");
        self.repo
            .tag(name, &object, &sig, name, false)
            .expect("create tag");
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.repo
            .tag_names(None)
            .expect("list tags")
            .iter()
            .flatten()
            .map(str::to_string)
            .collect()
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).expect("write file");
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("read file")
    }

    pub fn write_manifest(&self, version: &str) {
        self.write(
            "Cargo.toml",
            &format!("[package]\nname = \"demo\"\nversion = \"{version}\"\nedition = \"2021\"\n"),
        );
    }

    pub fn write_changelog(&self, version: &str) {
        self.write(
            "CHANGELOG.md",
            &format!("# Changelog\n\n## [v{version}] - 2023-11-14\n\n- released\n"),
        );
    }
}
