use std::path::Path;

use versioneer_changelog::ChangelogDocument;

use crate::Result;
use crate::traits::ChangelogStore;

pub struct FileSystemChangelog;

impl FileSystemChangelog {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangelog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogStore for FileSystemChangelog {
    fn read(&self, path: &Path) -> Result<ChangelogDocument> {
        Ok(ChangelogDocument::from_file_or_empty(path)?)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        Ok(ChangelogDocument::parse(content).write_to_file(path)?)
    }
}
