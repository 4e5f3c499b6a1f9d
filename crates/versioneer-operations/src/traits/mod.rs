mod changelog_store;
mod history_provider;
mod manifest_access;
mod progress_store;
mod summarizer;

pub use changelog_store::ChangelogStore;
pub use history_provider::HistoryProvider;
pub use manifest_access::ManifestAccess;
pub use progress_store::{ProgressMap, ProgressStore};
pub use summarizer::Summarizer;
