mod document;
mod error;
mod format;

pub use document::ChangelogDocument;
pub use error::ChangelogError;
pub use format::{
    ReleaseSection, UNRELEASED_LABEL, format_raw_commits, format_section_header, render_document,
};

pub type Result<T> = std::result::Result<T, ChangelogError>;
