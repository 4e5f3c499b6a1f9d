use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{Span, debug, warn};
use versioneer_core::fs::write_atomic;
use versioneer_core::{ChangelogRangeKey, ProgressContent};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ProgressMap, ProgressStore};

pub const PROGRESS_FILE_NAME: &str = "versioneer-changelog-progress.json";

/// Progress journal stored as JSON inside the repository's metadata directory.
///
/// The file maps `"<from>→<to>"` keys to generated text or the no-changes
/// placeholder. Keeping it under the git dir scopes it to one repository and
/// keeps it out of the work tree.
pub struct FileSystemProgressStore {
    path: PathBuf,
    span: Span,
}

impl FileSystemProgressStore {
    #[must_use]
    pub fn new(git_dir: &Path, span: Span) -> Self {
        Self {
            path: git_dir.join(PROGRESS_FILE_NAME),
            span,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Option<IndexMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no changelog progress recorded yet");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "changelog progress unreadable; starting fresh");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "changelog progress corrupt; starting fresh");
                None
            }
        }
    }
}

impl ProgressStore for FileSystemProgressStore {
    fn load(&self) -> ProgressMap {
        let _guard = self.span.enter();
        let Some(raw) = self.read_raw() else {
            return ProgressMap::new();
        };

        let mut progress = ProgressMap::with_capacity(raw.len());
        for (key, content) in raw {
            match key.parse::<ChangelogRangeKey>() {
                Ok(key) => {
                    progress.insert(key, ProgressContent::from(content));
                }
                Err(e) => warn!(key = %key, error = %e, "ignoring malformed progress entry"),
            }
        }

        debug!(entries = progress.len(), "loaded changelog progress");
        progress
    }

    fn save(&self, progress: &ProgressMap) -> Result<()> {
        let _guard = self.span.enter();
        let raw: IndexMap<String, String> = progress
            .iter()
            .map(|(key, content)| (key.to_string(), String::from(content.clone())))
            .collect();

        let json = serde_json::to_string_pretty(&raw).map_err(OperationError::ProgressSerialize)?;
        write_atomic(&self.path, json.as_bytes()).map_err(|source| {
            OperationError::ProgressWrite {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!(entries = progress.len(), path = %self.path.display(), "saved changelog progress");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.span.enter();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "cleared changelog progress");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OperationError::ProgressClear {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
