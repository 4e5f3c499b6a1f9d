use std::path::Path;

use tempfile::TempDir;

const BASE_TIME: i64 = 1_700_000_000;

/// Absolute commit time for an offset used with [`TestRepo::commit`].
pub(crate) fn commit_time(offset: i64) -> i64 {
    BASE_TIME + offset
}

/// A throwaway repository whose commits have fixed, increasing timestamps.
pub(crate) struct TestRepo {
    dir: TempDir,
    repo: git2::Repository,
}

impl TestRepo {
    pub(crate) fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let repo = git2::Repository::init(dir.path())?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test")?;
        config.set_str("user.email", "test@example.com")?;

        Ok(Self { dir, repo })
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Commits on top of HEAD at `commit_time(offset)`.
    pub(crate) fn commit(&self, message: &str, offset: i64) -> anyhow::Result<git2::Oid> {
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target());
        let parents: Vec<git2::Oid> = parent.into_iter().collect();
        self.commit_with_parents(Some("HEAD"), message, offset, &parents)
    }

    /// Creates a commit with explicit parents, optionally moving `update_ref` to it.
    pub(crate) fn commit_with_parents(
        &self,
        update_ref: Option<&str>,
        message: &str,
        offset: i64,
        parents: &[git2::Oid],
    ) -> anyhow::Result<git2::Oid> {
        let time = git2::Time::new(commit_time(offset), 0);
        let sig = git2::Signature::new("Test", "test@example.com", &time)?;
        let tree_id = self.repo.index()?.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parents = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid))
            .collect::<Result<Vec<_>, _>>()?;
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        Ok(self
            .repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)?)
    }

    pub(crate) fn tag(&self, name: &str, target: git2::Oid, message: &str) -> anyhow::Result<()> {
        let object = self.repo.find_object(target, None)?;
        let sig = git2::Signature::now("Test", "test@example.com")?;
        self.repo.tag(name, &object, &sig, message, false)?;
        Ok(())
    }

    pub(crate) fn write_file(&self, name: &str, content: &str) -> anyhow::Result<()> {
        std::fs::write(self.path().join(name), content)?;
        Ok(())
    }
}
