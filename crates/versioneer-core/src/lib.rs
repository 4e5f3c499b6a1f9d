pub mod error;
pub mod fs;
pub mod range;
pub mod types;
pub mod version;

pub use error::*;
pub use range::{
    ChangelogRangeKey, HEAD_SENTINEL, Marker, NO_CHANGES_PLACEHOLDER, ProgressContent,
    START_SENTINEL,
};
pub use types::*;
pub use version::{VersionTuple, is_valid_semver};
