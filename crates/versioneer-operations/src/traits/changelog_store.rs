use std::path::Path;

use versioneer_changelog::ChangelogDocument;

use crate::Result;

pub trait ChangelogStore: Send + Sync {
    /// Reads the changelog, returning an empty document when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    fn read(&self, path: &Path) -> Result<ChangelogDocument>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}
