use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersioneerError {
    #[error("invalid semantic version '{input}'")]
    InvalidVersion {
        input: String,
        #[source]
        source: semver::Error,
    },

    #[error("unknown bump type '{0}' (expected major, minor or patch)")]
    InvalidBumpType(String),

    #[error("invalid range key '{0}': expected '<from>→<to>'")]
    InvalidRangeKey(String),
}

pub type Result<T> = std::result::Result<T, VersioneerError>;
