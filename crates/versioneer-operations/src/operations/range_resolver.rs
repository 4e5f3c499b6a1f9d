use tracing::debug;
use versioneer_core::{CommitRecord, Marker, TagRecord, VersionTuple};

use crate::Result;
use crate::traits::HistoryProvider;

/// The revision a marker names, or `None` for the root of history.
#[must_use]
pub fn marker_revision(marker: &Marker) -> Option<&str> {
    match marker {
        Marker::Start => None,
        Marker::Head | Marker::Tag(_) => Some(marker.as_str()),
    }
}

/// Finds the commits between two markers, falling back through progressively
/// looser strategies when the plain ancestry range comes back empty.
///
/// Results are newest first. Resolution never fails: anything that cannot be
/// resolved yields an empty list, which callers treat as "no changes".
pub struct CommitRangeResolver<'a, H> {
    history: &'a H,
    tags: Vec<TagRecord>,
}

struct RangeQuery<'q, H> {
    history: &'q H,
    tags: &'q [TagRecord],
    from: &'q str,
    to: &'q Marker,
    from_commit: Option<CommitRecord>,
    to_commit: Option<CommitRecord>,
}

type Strategy<H> = fn(&RangeQuery<'_, H>) -> Option<Vec<CommitRecord>>;

impl<'a, H: HistoryProvider> CommitRangeResolver<'a, H> {
    /// # Errors
    ///
    /// Returns an error if the repository's tags cannot be listed.
    pub fn new(history: &'a H) -> Result<Self> {
        let tags = history.tags()?;
        Ok(Self { history, tags })
    }

    #[must_use]
    pub fn tags(&self) -> &[TagRecord] {
        &self.tags
    }

    /// Commits strictly after `from`, up to and including `to`.
    #[must_use]
    pub fn resolve(&self, from: &Marker, to: &Marker) -> Vec<CommitRecord> {
        let Some(to_rev) = marker_revision(to) else {
            debug!(from = %from, "range ending at the root of history is empty");
            return Vec::new();
        };

        let Some(from_rev) = marker_revision(from) else {
            return self.resolve_initial(to);
        };

        let from_commit = self.history.resolve(from_rev).ok();
        let to_commit = self.history.resolve(to_rev).ok();

        let same_commit = matches!(
            (&from_commit, &to_commit),
            (Some(a), Some(b)) if a.id == b.id
        );
        if same_commit {
            debug!(from = %from, to = %to, "markers point at the same commit");
            return Vec::new();
        }

        let query = RangeQuery {
            history: self.history,
            tags: &self.tags,
            from: from_rev,
            to,
            from_commit,
            to_commit,
        };

        let strategies: [(&str, Strategy<H>); 4] = [
            ("direct", direct_range),
            ("date-window", date_window),
            ("preceding-tag", preceding_tag_range),
            ("target-commit", target_commit),
        ];

        strategies
            .iter()
            .find_map(|(name, strategy)| {
                let commits = strategy(&query)?;
                debug!(from = %from, to = %to, strategy = name, count = commits.len(), "resolved range");
                Some(commits)
            })
            .unwrap_or_else(|| {
                debug!(from = %from, to = %to, "no strategy resolved range");
                Vec::new()
            })
    }

    /// The first-release range: every ancestor of `to`, narrowed to the commits
    /// after the next-lower-versioned tag when one exists.
    #[must_use]
    pub fn resolve_initial(&self, to: &Marker) -> Vec<CommitRecord> {
        let Some(to_rev) = marker_revision(to) else {
            return Vec::new();
        };

        let ancestors = match self.history.ancestors(to_rev) {
            Ok(commits) if !commits.is_empty() => commits,
            Ok(_) => return Vec::new(),
            Err(e) => {
                debug!(to = %to, error = %e, "ancestry unavailable; falling back to target commit");
                return self.history.resolve(to_rev).map(|c| vec![c]).unwrap_or_default();
            }
        };

        let Some(lower) = preceding_tag(&self.tags, to) else {
            return ancestors;
        };

        match self.history.commits_between(Some(&lower.name), to_rev) {
            Ok(narrowed) => {
                debug!(to = %to, lower = %lower.name, count = narrowed.len(), "narrowed initial range");
                narrowed
            }
            Err(e) => {
                debug!(to = %to, lower = %lower.name, error = %e, "could not narrow initial range");
                ancestors
            }
        }
    }
}

/// The tag with the greatest version strictly below `to`'s version.
fn preceding_tag<'t>(tags: &'t [TagRecord], to: &Marker) -> Option<&'t TagRecord> {
    let to_name = to.tag_name()?;
    let to_version = VersionTuple::parse(to_name);
    tags.iter()
        .filter(|tag| tag.name != to_name && tag.version() < to_version)
        .max_by(|a, b| a.version().cmp(&b.version()).then_with(|| a.name.cmp(&b.name)))
}

fn non_empty(commits: Vec<CommitRecord>) -> Option<Vec<CommitRecord>> {
    (!commits.is_empty()).then_some(commits)
}

fn direct_range<H: HistoryProvider>(q: &RangeQuery<'_, H>) -> Option<Vec<CommitRecord>> {
    let to_rev = marker_revision(q.to)?;
    q.history
        .commits_between(Some(q.from), to_rev)
        .ok()
        .and_then(non_empty)
}

/// Walks `to`'s history newest first, keeping commits dated after `from` and
/// no later than `to`, and stops at the first commit at or before `from`.
fn date_window<H: HistoryProvider>(q: &RangeQuery<'_, H>) -> Option<Vec<CommitRecord>> {
    let from_time = q.from_commit.as_ref()?.committed_at;
    let to_time = q.to_commit.as_ref()?.committed_at;
    let to_rev = marker_revision(q.to)?;

    let window: Vec<CommitRecord> = q
        .history
        .ancestors(to_rev)
        .ok()?
        .into_iter()
        .take_while(|commit| commit.committed_at > from_time)
        .filter(|commit| commit.committed_at <= to_time)
        .collect();

    non_empty(window)
}

fn preceding_tag_range<H: HistoryProvider>(q: &RangeQuery<'_, H>) -> Option<Vec<CommitRecord>> {
    let lower = preceding_tag(q.tags, q.to)?;
    let to_rev = marker_revision(q.to)?;
    q.history
        .commits_between(Some(&lower.name), to_rev)
        .ok()
        .and_then(non_empty)
}

fn target_commit<H: HistoryProvider>(q: &RangeQuery<'_, H>) -> Option<Vec<CommitRecord>> {
    q.to_commit.clone().map(|commit| vec![commit])
}
