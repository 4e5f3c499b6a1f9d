mod changelog;
mod git;
mod manifest;
mod progress;
mod summarizer;

pub use changelog::FileSystemChangelog;
pub use git::Git2Provider;
pub use manifest::FileSystemManifest;
pub use progress::{FileSystemProgressStore, PROGRESS_FILE_NAME};
pub use summarizer::{CommandSummarizer, PassthroughSummarizer};
