use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use versioneer_changelog::ChangelogDocument;
use versioneer_core::{CommitRecord, TagRecord};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    ChangelogStore, HistoryProvider, ManifestAccess, ProgressMap, ProgressStore, Summarizer,
};

pub(crate) fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).expect("valid timestamp")
}

struct MockCommit {
    record: CommitRecord,
    parents: Vec<String>,
}

/// In-memory commit graph. Commit ids are plain strings chosen by the test.
#[derive(Default)]
pub struct MockHistory {
    commits: IndexMap<String, MockCommit>,
    tags: Mutex<Vec<TagRecord>>,
    head: Option<String>,
    failing_ranges: HashSet<String>,
}

impl MockHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a commit with explicit parents. Does not move HEAD.
    #[must_use]
    pub fn with_commit(mut self, id: &str, summary: &str, time: i64, parents: &[&str]) -> Self {
        self.commits.insert(
            id.to_string(),
            MockCommit {
                record: CommitRecord::new(id, summary, "Test", at(time)),
                parents: parents.iter().map(ToString::to_string).collect(),
            },
        );
        self
    }

    /// Appends commits on top of the current HEAD and moves HEAD to the last one.
    #[must_use]
    pub fn with_linear(mut self, commits: &[(&str, &str, i64)]) -> Self {
        for &(id, summary, time) in commits {
            let parents: Vec<String> = self.head.iter().cloned().collect();
            self.commits.insert(
                id.to_string(),
                MockCommit {
                    record: CommitRecord::new(id, summary, "Test", at(time)),
                    parents,
                },
            );
            self.head = Some(id.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_head(mut self, id: &str) -> Self {
        self.head = Some(id.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if `target` is not a known commit.
    #[must_use]
    pub fn with_tag(self, name: &str, target: &str) -> Self {
        let created_at = self.commits[target].record.committed_at;
        self.tags
            .lock()
            .expect("tags lock poisoned")
            .push(TagRecord {
                name: name.to_string(),
                target_commit: target.to_string(),
                annotation_message: format!("Release {name}"),
                created_at,
            });
        self
    }

    /// Makes `commits_between` fail whenever `exclude` is this revision.
    #[must_use]
    pub fn with_failing_range_from(mut self, exclude: &str) -> Self {
        self.failing_ranges.insert(exclude.to_string());
        self
    }

    pub fn created_tags(&self) -> Vec<TagRecord> {
        self.tags.lock().expect("tags lock poisoned").clone()
    }

    fn resolve_id(&self, revision: &str) -> Option<String> {
        if revision == "HEAD" {
            return self.head.clone();
        }
        if let Some(tag) = self
            .tags
            .lock()
            .expect("tags lock poisoned")
            .iter()
            .find(|t| t.name == revision)
        {
            return Some(tag.target_commit.clone());
        }
        self.commits.contains_key(revision).then(|| revision.to_string())
    }

    fn reachable(&self, id: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(commit) = self.commits.get(&current) {
                stack.extend(commit.parents.iter().cloned());
            }
        }
        seen
    }

    fn not_found(revision: &str) -> OperationError {
        versioneer_git::GitError::RefNotFound {
            refspec: revision.to_string(),
        }
        .into()
    }
}

impl HistoryProvider for MockHistory {
    fn tags(&self) -> Result<Vec<TagRecord>> {
        Ok(self.created_tags())
    }

    fn resolve(&self, revision: &str) -> Result<CommitRecord> {
        let id = self
            .resolve_id(revision)
            .ok_or_else(|| Self::not_found(revision))?;
        Ok(self.commits[&id].record.clone())
    }

    fn commits_between(&self, exclude: Option<&str>, include: &str) -> Result<Vec<CommitRecord>> {
        if exclude.is_some_and(|exclude| self.failing_ranges.contains(exclude)) {
            return Err(Self::not_found(exclude.unwrap_or_default()));
        }

        let include_id = self
            .resolve_id(include)
            .ok_or_else(|| Self::not_found(include))?;
        let hidden = match exclude {
            Some(exclude) => {
                let exclude_id = self
                    .resolve_id(exclude)
                    .ok_or_else(|| Self::not_found(exclude))?;
                self.reachable(&exclude_id)
            }
            None => HashSet::new(),
        };

        let mut commits: Vec<CommitRecord> = self
            .reachable(&include_id)
            .difference(&hidden)
            .map(|id| self.commits[id].record.clone())
            .collect();
        commits.sort_by(|a, b| {
            b.committed_at
                .cmp(&a.committed_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(commits)
    }

    fn create_tag(&self, name: &str, target: &str, message: &str) -> Result<TagRecord> {
        let target_id = self
            .resolve_id(target)
            .ok_or_else(|| Self::not_found(target))?;
        let mut tags = self.tags.lock().expect("tags lock poisoned");
        if tags.iter().any(|t| t.name == name) {
            return Err(versioneer_git::GitError::TagExists {
                name: name.to_string(),
            }
            .into());
        }
        let tag = TagRecord {
            name: name.to_string(),
            target_commit: target_id.clone(),
            annotation_message: message.to_string(),
            created_at: self.commits[&target_id].record.committed_at,
        };
        tags.push(tag.clone());
        Ok(tag)
    }
}

/// Records every input and returns a canned summary, or fails on request.
#[derive(Default)]
pub struct MockSummarizer {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl MockSummarizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

impl Summarizer for MockSummarizer {
    fn summarize(&self, raw_changelog: &str) -> Result<String> {
        let mut calls = self.calls.lock().expect("calls lock poisoned");
        calls.push(raw_changelog.to_string());
        if self.fail {
            return Err(OperationError::EmptySummary);
        }
        Ok(format!("summary #{}", calls.len()))
    }
}

#[derive(Default)]
pub struct MockProgressStore {
    state: Mutex<ProgressMap>,
    saves: Mutex<usize>,
    cleared: Mutex<bool>,
}

impl MockProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_progress(progress: ProgressMap) -> Self {
        Self {
            state: Mutex::new(progress),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> ProgressMap {
        self.state.lock().expect("state lock poisoned").clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().expect("saves lock poisoned")
    }

    pub fn was_cleared(&self) -> bool {
        *self.cleared.lock().expect("cleared lock poisoned")
    }
}

impl ProgressStore for MockProgressStore {
    fn load(&self) -> ProgressMap {
        self.snapshot()
    }

    fn save(&self, progress: &ProgressMap) -> Result<()> {
        *self.state.lock().expect("state lock poisoned") = progress.clone();
        *self.saves.lock().expect("saves lock poisoned") += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.state.lock().expect("state lock poisoned").clear();
        *self.cleared.lock().expect("cleared lock poisoned") = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockManifest {
    versions: Mutex<HashMap<PathBuf, String>>,
    read_only: bool,
}

impl MockManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(self, path: &str, version: &str) -> Self {
        self.versions
            .lock()
            .expect("versions lock poisoned")
            .insert(PathBuf::from(path), version.to_string());
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn version(&self, path: &str) -> Option<String> {
        self.versions
            .lock()
            .expect("versions lock poisoned")
            .get(Path::new(path))
            .cloned()
    }
}

impl ManifestAccess for MockManifest {
    fn read_version(&self, manifest_path: &Path) -> Option<String> {
        self.versions
            .lock()
            .expect("versions lock poisoned")
            .get(manifest_path)
            .cloned()
    }

    fn write_version(&self, manifest_path: &Path, version: &str) -> bool {
        if self.read_only {
            return false;
        }
        self.versions
            .lock()
            .expect("versions lock poisoned")
            .insert(manifest_path.to_path_buf(), version.to_string());
        true
    }
}

#[derive(Default)]
pub struct MockChangelogStore {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MockChangelogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .expect("files lock poisoned")
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .expect("files lock poisoned")
            .get(Path::new(path))
            .cloned()
    }
}

impl ChangelogStore for MockChangelogStore {
    fn read(&self, path: &Path) -> Result<ChangelogDocument> {
        Ok(self
            .files
            .lock()
            .expect("files lock poisoned")
            .get(path)
            .map(|content| ChangelogDocument::parse(content.clone()))
            .unwrap_or_default())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .expect("files lock poisoned")
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
