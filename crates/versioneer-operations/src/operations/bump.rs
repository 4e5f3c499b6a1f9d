use std::path::PathBuf;

use tracing::{info, warn};
use versioneer_core::{VersionTuple, is_valid_semver};
use versioneer_project::Project;
use versioneer_version::suggest_next_version;

use super::reconcile::{ReconciliationReport, reconcile_project};
use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangelogStore, HistoryProvider, ManifestAccess};

#[derive(Debug, Clone)]
pub struct BumpSuggestion {
    pub manifest_path: PathBuf,
    pub current: Option<String>,
    pub suggested: VersionTuple,
    pub report: ReconciliationReport,
}

#[derive(Debug, Clone, Default)]
pub struct BumpInput {
    /// The version to write; the suggestion is used when absent.
    pub version: Option<String>,
    /// The operator accepted writing while the manifest leads the changelog.
    pub confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct BumpOutcome {
    pub manifest_path: PathBuf,
    pub previous: Option<String>,
    pub version: String,
}

pub struct BumpOperation<H, M, C> {
    history: H,
    manifest: M,
    changelog: C,
}

impl<H, M, C> BumpOperation<H, M, C>
where
    H: HistoryProvider,
    M: ManifestAccess,
    C: ChangelogStore,
{
    pub fn new(history: H, manifest: M, changelog: C) -> Self {
        Self {
            history,
            manifest,
            changelog,
        }
    }

    /// # Errors
    ///
    /// Returns [`OperationError::ManifestNotFound`] if the project has no manifest,
    /// or an error if tags or the changelog cannot be read.
    pub fn suggest(&self, project: &Project) -> Result<BumpSuggestion> {
        let manifest_path = project
            .manifest_path()
            .ok_or(OperationError::ManifestNotFound)?;
        let report = reconcile_project(&self.history, &self.manifest, &self.changelog, project)?;
        let current = self.manifest.read_version(&manifest_path);
        let suggested = suggest_next_version(report.changelog_version, report.tag_version);

        Ok(BumpSuggestion {
            manifest_path,
            current,
            suggested,
            report,
        })
    }

    /// Validates and writes a new manifest version.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidVersion`] for input that is not `SemVer`,
    /// [`OperationError::VersionUnchanged`] when nothing would change,
    /// [`OperationError::ConfirmationRequired`] when the manifest leads the
    /// changelog and `confirmed` is not set, and
    /// [`OperationError::ManifestWriteFailed`] if the write did not happen.
    pub fn execute(&self, project: &Project, input: &BumpInput) -> Result<BumpOutcome> {
        let suggestion = self.suggest(project)?;

        let version = match &input.version {
            Some(requested) => {
                let requested = requested.trim();
                let bare = requested.strip_prefix('v').unwrap_or(requested);
                if !is_valid_semver(bare) {
                    return Err(OperationError::InvalidVersion {
                        version: requested.to_string(),
                    });
                }
                bare.to_string()
            }
            None => suggestion.suggested.format(false),
        };

        if suggestion.current.as_deref() == Some(version.as_str()) {
            return Err(OperationError::VersionUnchanged { version });
        }

        if suggestion.report.requires_confirmation() && !input.confirmed {
            let report = &suggestion.report;
            return Err(OperationError::ConfirmationRequired {
                manifest: report
                    .manifest_version
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                changelog: report
                    .changelog_version
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            });
        }

        if !self.manifest.write_version(&suggestion.manifest_path, &version) {
            warn!(path = %suggestion.manifest_path.display(), "manifest version not written");
            return Err(OperationError::ManifestWriteFailed {
                path: suggestion.manifest_path,
            });
        }

        info!(
            path = %suggestion.manifest_path.display(),
            from = ?suggestion.current,
            to = %version,
            "bumped manifest version"
        );
        Ok(BumpOutcome {
            manifest_path: suggestion.manifest_path,
            previous: suggestion.current,
            version,
        })
    }
}
