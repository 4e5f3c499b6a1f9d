use std::collections::HashSet;

use versioneer_core::{BumpType, CommitRecord, TagRecord, VersionTuple};
use versioneer_version::{IncrementalVersionPlanner, max_bump_type};

/// One commit and the tag it will receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTag {
    pub commit: CommitRecord,
    pub version: VersionTuple,
    pub name: String,
    /// A tag with this name already exists and will not be touched.
    pub exists: bool,
}

impl PlannedTag {
    #[must_use]
    pub fn bump(&self) -> Option<BumpType> {
        self.commit.bump_hint()
    }
}

/// Result of planning tags for a batch of untagged commits.
#[derive(Debug, Clone, Default)]
pub struct TagPlan {
    pub base: VersionTuple,
    pub tags: Vec<PlannedTag>,
    /// Commits that have no bump assigned and stay untagged.
    pub unplanned: Vec<CommitRecord>,
}

impl TagPlan {
    /// Planned tags that do not exist yet.
    pub fn pending(&self) -> impl Iterator<Item = &PlannedTag> {
        self.tags.iter().filter(|tag| !tag.exists)
    }

    /// The largest bump among tags still to be created.
    #[must_use]
    pub fn overall_bump(&self) -> Option<BumpType> {
        let bumps: Vec<BumpType> = self.pending().filter_map(PlannedTag::bump).collect();
        max_bump_type(&bumps)
    }

    #[must_use]
    pub fn final_version(&self) -> VersionTuple {
        self.tags.last().map_or(self.base, |tag| tag.version)
    }
}

/// Plans one version per finalized commit, advancing from the last released version.
pub struct VersionPlanner;

impl VersionPlanner {
    /// `commits` must be oldest first. Each finalized commit with a bump hint gets
    /// the next version in the batch, so no two commits share a version.
    #[must_use]
    pub fn plan_tags(
        base: VersionTuple,
        commits: &[CommitRecord],
        existing: &[TagRecord],
    ) -> TagPlan {
        let existing: HashSet<&str> = existing.iter().map(|tag| tag.name.as_str()).collect();
        let mut planner = IncrementalVersionPlanner::new(base);
        let mut tags = Vec::new();
        let mut unplanned = Vec::new();

        for commit in commits {
            let bump = match commit.bump_hint() {
                Some(bump) if commit.is_finalized() => bump,
                _ => {
                    unplanned.push(commit.clone());
                    continue;
                }
            };

            let version = planner.advance(bump);
            let name = version.format(true);
            tags.push(PlannedTag {
                commit: commit.clone(),
                version,
                exists: existing.contains(name.as_str()),
                name,
            });
        }

        TagPlan {
            base,
            tags,
            unplanned,
        }
    }

    /// A bump guess from a conventional-commit summary.
    #[must_use]
    pub fn suggest_bump(summary: &str) -> BumpType {
        let (head, _) = summary.split_once(':').unwrap_or((summary, ""));
        if head.ends_with('!') || summary.contains("BREAKING CHANGE") {
            BumpType::Major
        } else if head == "feat" || head.starts_with("feat(") {
            BumpType::Minor
        } else {
            BumpType::Patch
        }
    }

    /// Assigns the suggested bump to every commit that has none yet.
    pub fn assign_suggested_bumps(commits: &mut [CommitRecord]) {
        for commit in commits.iter_mut().filter(|c| c.bump_hint().is_none()) {
            let bump = Self::suggest_bump(&commit.summary);
            commit.assign_bump(bump);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::at;

    fn commit(id: &str, summary: &str) -> CommitRecord {
        CommitRecord::new(id, summary, "Test", at(100))
    }

    fn existing(name: &str) -> TagRecord {
        TagRecord {
            name: name.to_string(),
            target_commit: "old".to_string(),
            annotation_message: String::new(),
            created_at: at(1),
        }
    }

    #[test]
    fn each_commit_gets_its_own_version() {
        let commits = vec![
            commit("a", "fix: a").with_bump(BumpType::Patch),
            commit("b", "fix: b").with_bump(BumpType::Patch),
            commit("c", "feat: c").with_bump(BumpType::Minor),
            commit("d", "feat!: d").with_bump(BumpType::Major),
        ];

        let plan = VersionPlanner::plan_tags(VersionTuple::new(1, 2, 3), &commits, &[]);

        let names: Vec<&str> = plan.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["v1.2.4", "v1.2.5", "v1.3.0", "v2.0.0"]);
        assert!(plan.tags.windows(2).all(|w| w[0].version < w[1].version));
        assert_eq!(plan.final_version(), VersionTuple::new(2, 0, 0));
        assert_eq!(plan.overall_bump(), Some(BumpType::Major));
    }

    #[test]
    fn commits_without_bump_stay_untagged() {
        let commits = vec![
            commit("a", "chore: a"),
            commit("b", "fix: b").with_bump(BumpType::Patch),
        ];

        let plan = VersionPlanner::plan_tags(VersionTuple::ZERO, &commits, &[]);

        assert_eq!(plan.tags.len(), 1);
        assert_eq!(plan.tags[0].name, "v0.0.1");
        assert_eq!(plan.unplanned.len(), 1);
        assert_eq!(plan.unplanned[0].id, "a");
    }

    #[test]
    fn existing_tag_names_are_marked() {
        let commits = vec![
            commit("a", "fix: a").with_bump(BumpType::Patch),
            commit("b", "fix: b").with_bump(BumpType::Patch),
        ];

        let plan = VersionPlanner::plan_tags(
            VersionTuple::new(1, 0, 0),
            &commits,
            &[existing("v1.0.1")],
        );

        assert!(plan.tags[0].exists);
        assert!(!plan.tags[1].exists);
        let pending: Vec<&str> = plan.pending().map(|t| t.name.as_str()).collect();
        assert_eq!(pending, ["v1.0.2"]);
        assert_eq!(plan.overall_bump(), Some(BumpType::Patch));
    }

    #[test]
    fn empty_plan_keeps_base() {
        let plan = VersionPlanner::plan_tags(VersionTuple::new(3, 1, 4), &[], &[]);
        assert_eq!(plan.final_version(), VersionTuple::new(3, 1, 4));
        assert_eq!(plan.overall_bump(), None);
    }

    #[test]
    fn bump_suggestions() {
        assert_eq!(VersionPlanner::suggest_bump("feat: add x"), BumpType::Minor);
        assert_eq!(VersionPlanner::suggest_bump("feat(cli): add x"), BumpType::Minor);
        assert_eq!(VersionPlanner::suggest_bump("feat!: drop y"), BumpType::Major);
        assert_eq!(VersionPlanner::suggest_bump("fix(core)!: change z"), BumpType::Major);
        assert_eq!(
            VersionPlanner::suggest_bump("refactor: BREAKING CHANGE in api"),
            BumpType::Major
        );
        assert_eq!(VersionPlanner::suggest_bump("fix: crash"), BumpType::Patch);
        assert_eq!(VersionPlanner::suggest_bump("Update readme"), BumpType::Patch);
        assert_eq!(VersionPlanner::suggest_bump("features: not a type"), BumpType::Patch);
    }

    #[test]
    fn suggested_bumps_keep_explicit_ones() {
        let mut commits = vec![
            commit("a", "feat: a"),
            commit("b", "fix: b").with_bump(BumpType::Major),
        ];

        VersionPlanner::assign_suggested_bumps(&mut commits);

        assert_eq!(commits[0].bump_hint(), Some(BumpType::Minor));
        assert!(commits[0].is_finalized());
        assert_eq!(commits[1].bump_hint(), Some(BumpType::Major));
    }
}
