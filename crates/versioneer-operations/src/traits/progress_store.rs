use indexmap::IndexMap;
use versioneer_core::{ChangelogRangeKey, ProgressContent};

use crate::Result;

pub type ProgressMap = IndexMap<ChangelogRangeKey, ProgressContent>;

/// Durable journal of generated changelog ranges for one repository.
pub trait ProgressStore: Send + Sync {
    /// Missing or unreadable state loads as an empty map.
    fn load(&self) -> ProgressMap;

    /// Replaces the stored map with `progress`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&self, progress: &ProgressMap) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if existing state cannot be removed.
    fn clear(&self) -> Result<()>;
}
