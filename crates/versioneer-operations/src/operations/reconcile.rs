use std::cmp::Ordering;
use std::fmt;

use tracing::debug;
use versioneer_core::{TagRecord, VersionTuple};
use versioneer_project::Project;

use crate::Result;
use crate::traits::{ChangelogStore, HistoryProvider, ManifestAccess};

/// How the manifest version relates to the changelog, which is the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Synced,
    /// The manifest claims a release the changelog does not document.
    ManifestAhead,
    ManifestBehind,
    NoData,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Synced => "synced",
            Self::ManifestAhead => "manifest ahead of changelog",
            Self::ManifestBehind => "manifest behind changelog",
            Self::NoData => "no data",
        })
    }
}

/// Disagreement between the latest tag and the latest changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDrift {
    TagAheadOfChangelog,
    ChangelogAheadOfTag,
}

impl fmt::Display for TagDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TagAheadOfChangelog => "tag ahead of changelog",
            Self::ChangelogAheadOfTag => "changelog ahead of tag",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub tag_version: Option<VersionTuple>,
    pub changelog_version: Option<VersionTuple>,
    pub manifest_version: Option<VersionTuple>,
    pub classification: Classification,
    pub tag_drift: Option<TagDrift>,
}

impl ReconciliationReport {
    /// Proceeding while the manifest leads the changelog needs an explicit operator decision.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        self.classification == Classification::ManifestAhead
    }

    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.classification == Classification::Synced && self.tag_drift.is_none()
    }
}

/// Classifies the three version records against the changelog.
///
/// A missing changelog version is always `NoData`. A missing manifest version
/// leaves nothing to compare, so it is `NoData` as well. The tag flag is set
/// independently whenever both tag and changelog versions exist and differ.
#[must_use]
pub fn check(
    tag_version: Option<VersionTuple>,
    changelog_version: Option<VersionTuple>,
    manifest_version: Option<VersionTuple>,
) -> ReconciliationReport {
    let classification = match (changelog_version, manifest_version) {
        (Some(changelog), Some(manifest)) => match manifest.cmp(&changelog) {
            Ordering::Greater => Classification::ManifestAhead,
            Ordering::Less => Classification::ManifestBehind,
            Ordering::Equal => Classification::Synced,
        },
        _ => Classification::NoData,
    };

    let tag_drift = match (tag_version, changelog_version) {
        (Some(tag), Some(changelog)) => match tag.cmp(&changelog) {
            Ordering::Greater => Some(TagDrift::TagAheadOfChangelog),
            Ordering::Less => Some(TagDrift::ChangelogAheadOfTag),
            Ordering::Equal => None,
        },
        _ => None,
    };

    ReconciliationReport {
        tag_version,
        changelog_version,
        manifest_version,
        classification,
        tag_drift,
    }
}

/// Gathers the latest tag, changelog entry and manifest version of a project and checks them.
pub struct ReconcileOperation<H, M, C> {
    history: H,
    manifest: M,
    changelog: C,
}

impl<H, M, C> ReconcileOperation<H, M, C>
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
    /// Returns an error if the tags cannot be listed or an existing changelog cannot be read.
    pub fn execute(&self, project: &Project) -> Result<ReconciliationReport> {
        reconcile_project(&self.history, &self.manifest, &self.changelog, project)
    }
}

pub(crate) fn reconcile_project<H, M, C>(
    history: &H,
    manifest: &M,
    changelog: &C,
    project: &Project,
) -> Result<ReconciliationReport>
where
    H: HistoryProvider,
    M: ManifestAccess,
    C: ChangelogStore,
{
    let tag_version = history.tags()?.iter().map(TagRecord::version).max();

    let changelog_version = changelog.read(&project.changelog_path())?.latest_version();

    let manifest_version = project
        .manifest_path()
        .and_then(|path| manifest.read_version(&path))
        .map(|version| VersionTuple::parse(&version));

    let report = check(tag_version, changelog_version, manifest_version);
    debug!(
        tag = ?report.tag_version,
        changelog = ?report.changelog_version,
        manifest = ?report.manifest_version,
        classification = %report.classification,
        "reconciled versions"
    );
    Ok(report)
}
