use std::path::PathBuf;

use chrono::{DateTime, Utc};
use versioneer_core::{CommitRecord, TagRecord};
use versioneer_git::{CommitInfo, Repository, TagInfo};

use crate::Result;
use crate::traits::HistoryProvider;

/// [`HistoryProvider`] backed by a git2 repository, opened per call.
pub struct Git2Provider {
    root: PathBuf,
}

impl Git2Provider {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository's metadata directory, where per-repository state is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    pub fn git_dir(&self) -> Result<PathBuf> {
        let repo = Repository::open(&self.root)?;
        Ok(repo.git_dir().to_path_buf())
    }
}

impl HistoryProvider for Git2Provider {
    fn tags(&self) -> Result<Vec<TagRecord>> {
        let repo = Repository::open(&self.root)?;
        Ok(repo.tags()?.into_iter().map(tag_record).collect())
    }

    fn resolve(&self, revision: &str) -> Result<CommitRecord> {
        let repo = Repository::open(&self.root)?;
        Ok(commit_record(repo.resolve_commit(revision)?))
    }

    fn commits_between(&self, exclude: Option<&str>, include: &str) -> Result<Vec<CommitRecord>> {
        let repo = Repository::open(&self.root)?;
        Ok(repo
            .commits_between(exclude, include)?
            .into_iter()
            .map(commit_record)
            .collect())
    }

    fn create_tag(&self, name: &str, target: &str, message: &str) -> Result<TagRecord> {
        let repo = Repository::open(&self.root)?;
        Ok(tag_record(repo.create_tag(name, target, message)?))
    }
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

fn commit_record(info: CommitInfo) -> CommitRecord {
    CommitRecord::new(info.sha, info.summary, info.author, timestamp(info.time))
}

fn tag_record(info: TagInfo) -> TagRecord {
    TagRecord {
        name: info.name,
        target_commit: info.target_sha,
        annotation_message: info.message,
        created_at: timestamp(info.commit_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_repo::{TestRepo, commit_time};

    #[test]
    fn tags_carry_target_commit_time() -> anyhow::Result<()> {
        let repo = TestRepo::new()?;
        let first = repo.commit("feat: first", 100)?;
        repo.tag("v0.1.0", first, "First")?;

        let provider = Git2Provider::new(repo.path());
        let tags = provider.tags()?;

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "v0.1.0");
        assert_eq!(tags[0].target_commit, first.to_string());
        assert_eq!(tags[0].annotation_message, "First");
        assert_eq!(tags[0].created_at, timestamp(commit_time(100)));
        Ok(())
    }

    #[test]
    fn commits_between_tags_newest_first() -> anyhow::Result<()> {
        let repo = TestRepo::new()?;
        let first = repo.commit("feat: first", 100)?;
        repo.tag("v0.1.0", first, "First")?;
        repo.commit("fix: second", 200)?;
        repo.commit("docs: third", 300)?;

        let provider = Git2Provider::new(repo.path());
        let commits = provider.commits_between(Some("v0.1.0"), "HEAD")?;

        let summaries: Vec<_> = commits.iter().map(|c| c.summary.as_str()).collect();
        assert_eq!(summaries, ["docs: third", "fix: second"]);
        assert!(!commits[0].is_finalized());
        Ok(())
    }

    #[test]
    fn create_tag_at_older_commit() -> anyhow::Result<()> {
        let repo = TestRepo::new()?;
        let first = repo.commit("feat: first", 100)?;
        repo.commit("fix: second", 200)?;

        let provider = Git2Provider::new(repo.path());
        let tag = provider.create_tag("v1.0.0", &first.to_string(), "feat: first")?;

        assert_eq!(tag.target_commit, first.to_string());
        assert_eq!(provider.resolve("v1.0.0")?.id, first.to_string());
        Ok(())
    }

    #[test]
    fn git_dir_is_metadata_directory() -> anyhow::Result<()> {
        let repo = TestRepo::new()?;

        let git_dir = Git2Provider::new(repo.path()).git_dir()?;

        assert_eq!(
            git_dir.canonicalize()?,
            repo.path().join(".git").canonicalize()?
        );
        Ok(())
    }
}
