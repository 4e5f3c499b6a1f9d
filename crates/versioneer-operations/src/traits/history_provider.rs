use versioneer_core::{CommitRecord, TagRecord};

use crate::Result;

/// Read access to repository history plus annotated tag creation.
///
/// Revisions are anything the backing repository can resolve: tag names, `HEAD`, shas.
/// Commit lists are returned newest first.
pub trait HistoryProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed.
    fn tags(&self) -> Result<Vec<TagRecord>>;

    /// # Errors
    ///
    /// Returns an error if the revision does not name a commit.
    fn resolve(&self, revision: &str) -> Result<CommitRecord>;

    /// Commits reachable from `include` but not from `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if either revision cannot be resolved.
    fn commits_between(&self, exclude: Option<&str>, include: &str) -> Result<Vec<CommitRecord>>;

    /// # Errors
    ///
    /// Returns an error if the revision cannot be resolved.
    fn ancestors(&self, revision: &str) -> Result<Vec<CommitRecord>> {
        self.commits_between(None, revision)
    }

    /// # Errors
    ///
    /// Returns an error if the tag already exists or cannot be written.
    fn create_tag(&self, name: &str, target: &str, message: &str) -> Result<TagRecord>;
}
