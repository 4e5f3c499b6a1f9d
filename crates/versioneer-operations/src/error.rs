use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] versioneer_core::VersioneerError),

    #[error(transparent)]
    Git(#[from] versioneer_git::GitError),

    #[error(transparent)]
    Project(#[from] versioneer_project::ProjectError),

    #[error(transparent)]
    Manifest(#[from] versioneer_manifest::ManifestError),

    #[error(transparent)]
    Changelog(#[from] versioneer_changelog::ChangelogError),

    #[error("failed to write changelog progress to '{path}'")]
    ProgressWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize changelog progress")]
    ProgressSerialize(#[source] serde_json::Error),

    #[error("failed to clear changelog progress at '{path}'")]
    ProgressClear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("summarizer command '{program}' could not be run")]
    SummarizerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("summarizer command '{program}' failed with {status}: {stderr}")]
    SummarizerFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("summarizer returned no text")]
    EmptySummary,

    #[error("no manifest found; set [manifest] path in .versioneer.toml")]
    ManifestNotFound,

    #[error("failed to write version to manifest '{path}'")]
    ManifestWriteFailed { path: PathBuf },

    #[error("'{version}' is not a valid semantic version")]
    InvalidVersion { version: String },

    #[error("manifest is already at version {version}")]
    VersionUnchanged { version: String },

    #[error("manifest version {manifest} is ahead of the changelog ({changelog}); confirmation required")]
    ConfirmationRequired { manifest: String, changelog: String },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OperationError>;
