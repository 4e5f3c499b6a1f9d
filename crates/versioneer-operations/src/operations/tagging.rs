use tracing::{debug, info};
use versioneer_core::{CommitRecord, HEAD_SENTINEL, TagRecord, VersionTuple};

use super::version_planner::{TagPlan, VersionPlanner};
use crate::Result;
use crate::traits::HistoryProvider;

/// The tag with the highest version, regardless of when it was created.
#[must_use]
pub fn latest_tag(tags: &[TagRecord]) -> Option<&TagRecord> {
    tags.iter()
        .max_by(|a, b| a.version().cmp(&b.version()).then_with(|| a.name.cmp(&b.name)))
}

/// Commits after the highest-versioned tag up to HEAD, oldest first.
///
/// Without tags this is the whole of HEAD's history.
///
/// # Errors
///
/// Returns an error if the tags cannot be listed or HEAD cannot be walked.
pub fn untagged_commits<H: HistoryProvider>(history: &H) -> Result<Vec<CommitRecord>> {
    let tags = history.tags()?;
    let since = latest_tag(&tags).map(|tag| tag.name.as_str());
    let mut commits = history.commits_between(since, HEAD_SENTINEL)?;
    commits.reverse();
    debug!(since = ?since, count = commits.len(), "scanned untagged commits");
    Ok(commits)
}

#[derive(Debug, Clone, Default)]
pub struct TagOutcome {
    pub created: Vec<TagRecord>,
    pub skipped: Vec<String>,
}

pub struct TagOperation<H> {
    history: H,
}

impl<H: HistoryProvider> TagOperation<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    /// # Errors
    ///
    /// Returns an error if history cannot be read.
    pub fn scan(&self) -> Result<Vec<CommitRecord>> {
        untagged_commits(&self.history)
    }

    /// Plans tags for `commits` (oldest first), continuing from the highest existing tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed.
    pub fn plan(&self, commits: &[CommitRecord]) -> Result<TagPlan> {
        let tags = self.history.tags()?;
        let base = latest_tag(&tags).map_or(VersionTuple::ZERO, TagRecord::version);
        Ok(VersionPlanner::plan_tags(base, commits, &tags))
    }

    /// Creates an annotated tag for every planned tag that does not exist yet.
    ///
    /// With `dry_run` nothing is written and `created` stays empty.
    ///
    /// # Errors
    ///
    /// Returns an error if a tag cannot be created. Tags created before the
    /// failure are kept.
    pub fn apply(&self, plan: &TagPlan, dry_run: bool) -> Result<TagOutcome> {
        let mut outcome = TagOutcome::default();

        for planned in &plan.tags {
            if planned.exists {
                debug!(tag = %planned.name, "tag exists, skipping");
                outcome.skipped.push(planned.name.clone());
                continue;
            }
            if dry_run {
                continue;
            }
            let tag = self.history.create_tag(
                &planned.name,
                &planned.commit.id,
                planned.commit.tag_message(),
            )?;
            info!(tag = %tag.name, commit = %planned.commit.short_id(), "created tag");
            outcome.created.push(tag);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use versioneer_core::BumpType;

    use super::*;
    use crate::mocks::MockHistory;

    fn history() -> MockHistory {
        MockHistory::new()
            .with_linear(&[
                ("c1", "feat: init", 100),
                ("c2", "fix: one", 200),
                ("c3", "feat: two", 300),
                ("c4", "feat!: three", 400),
            ])
            .with_tag("v0.1.0", "c1")
    }

    #[test]
    fn scan_returns_commits_after_latest_tag_oldest_first() -> anyhow::Result<()> {
        let operation = TagOperation::new(history());

        let commits = operation.scan()?;

        let ids: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c3", "c4"]);
        Ok(())
    }

    #[test]
    fn scan_without_tags_returns_everything() -> anyhow::Result<()> {
        let history = MockHistory::new().with_linear(&[("a", "x", 1), ("b", "y", 2)]);

        let commits = untagged_commits(&history)?;

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "a");
        Ok(())
    }

    #[test]
    fn latest_tag_is_by_version_not_time() {
        let history = history().with_tag("v0.0.9", "c2");
        let tags = history.tags().expect("tags");

        assert_eq!(latest_tag(&tags).map(|t| t.name.as_str()), Some("v0.1.0"));
    }

    #[test]
    fn plan_and_apply_create_one_tag_per_commit() -> anyhow::Result<()> {
        let operation = TagOperation::new(history());
        let mut commits = operation.scan()?;
        VersionPlanner::assign_suggested_bumps(&mut commits);
        commits[1].set_message("Add the second feature");

        let plan = operation.plan(&commits)?;
        let outcome = operation.apply(&plan, false)?;

        let created: Vec<(&str, &str)> = outcome
            .created
            .iter()
            .map(|t| (t.name.as_str(), t.target_commit.as_str()))
            .collect();
        assert_eq!(
            created,
            [("v0.1.1", "c2"), ("v0.2.0", "c3"), ("v1.0.0", "c4")]
        );
        assert_eq!(outcome.created[1].annotation_message, "Add the second feature");
        assert_eq!(outcome.created[0].annotation_message, "fix: one");
        Ok(())
    }

    #[test]
    fn dry_run_writes_nothing() -> anyhow::Result<()> {
        let operation = TagOperation::new(history());
        let commits: Vec<CommitRecord> = operation
            .scan()?
            .into_iter()
            .map(|c| c.with_bump(BumpType::Patch))
            .collect();

        let plan = operation.plan(&commits)?;
        let outcome = operation.apply(&plan, true)?;

        assert!(outcome.created.is_empty());
        assert_eq!(plan.pending().count(), 3);
        assert_eq!(operation.history.created_tags().len(), 1);
        Ok(())
    }

    #[test]
    fn plan_continues_from_highest_tag() -> anyhow::Result<()> {
        let history = history().with_tag("v0.1.1", "c1");
        let operation = TagOperation::new(history);
        let commits = vec![
            CommitRecord::new("c2", "fix: one", "Test", crate::mocks::at(200))
                .with_bump(BumpType::Patch),
        ];

        let plan = operation.plan(&commits)?;
        let outcome = operation.apply(&plan, false)?;

        assert_eq!(plan.base, VersionTuple::new(0, 1, 1));
        assert_eq!(plan.tags[0].name, "v0.1.2");
        assert_eq!(outcome.created.len(), 1);
        Ok(())
    }
}
