#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub target_sha: String,
    /// Annotation of an annotated tag, or the target commit's message for a lightweight tag.
    pub message: String,
    /// Commit time of the target commit, in seconds since the Unix epoch.
    pub commit_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub summary: String,
    pub author: String,
    /// Commit time in seconds since the Unix epoch.
    pub time: i64,
}

impl CommitInfo {
    pub(crate) fn from_commit(commit: &git2::Commit<'_>) -> Self {
        Self {
            sha: commit.id().to_string(),
            summary: commit.summary().unwrap_or_default().to_string(),
            author: commit.author().name().unwrap_or_default().to_string(),
            time: commit.time().seconds(),
        }
    }
}
