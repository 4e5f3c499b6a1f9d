use std::cmp::Reverse;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;
use versioneer_changelog::{ChangelogDocument, ReleaseSection, UNRELEASED_LABEL, render_document};
use versioneer_core::{ChangelogRangeKey, Marker, ProgressContent, TagRecord, VersionTuple};

use super::orchestrator::section_label;
use crate::Result;
use crate::traits::{ChangelogStore, HistoryProvider, ProgressMap, ProgressStore};

/// Sections for every generated range, newest first.
///
/// Placeholders are skipped. When several ranges end at the same marker only
/// the highest-ordered key is used. `HEAD` becomes `Unreleased` dated `today`;
/// tags are dated by their commit, or `today` if the tag no longer exists.
#[must_use]
pub fn assemble_sections(
    progress: &ProgressMap,
    tags: &[TagRecord],
    today: NaiveDate,
) -> Vec<ReleaseSection> {
    let mut generated: Vec<(&ChangelogRangeKey, &str)> = progress
        .iter()
        .filter_map(|(key, content)| content.text().map(|text| (key, text)))
        .collect();
    generated.sort_by(|a, b| b.0.cmp(a.0));

    let mut seen: HashSet<&Marker> = HashSet::new();
    generated
        .into_iter()
        .filter(|(key, _)| seen.insert(&key.to))
        .map(|(key, text)| {
            let date = match &key.to {
                Marker::Tag(name) => tags
                    .iter()
                    .find(|tag| &tag.name == name)
                    .map_or(today, |tag| tag.created_at.date_naive()),
                Marker::Start | Marker::Head => today,
            };
            ReleaseSection::new(section_label(&key.to), date, text.trim())
        })
        .collect()
}

/// Adds sections from the existing document that were not regenerated, then
/// orders everything with `Unreleased` first and versions descending.
#[must_use]
pub fn merge_with_existing(
    mut sections: Vec<ReleaseSection>,
    existing: &ChangelogDocument,
    today: NaiveDate,
) -> Vec<ReleaseSection> {
    let covered: HashSet<String> = sections.iter().map(|s| normalized_label(&s.label)).collect();

    for label in existing.labels() {
        if covered.contains(&normalized_label(label)) {
            continue;
        }
        let Some(body) = existing.section(label).filter(|body| !body.is_empty()) else {
            continue;
        };
        let date = existing.section_date(label).unwrap_or(today);
        sections.push(ReleaseSection::new(label, date, body));
    }

    sections.sort_by_key(|s| {
        let unreleased = s.label.eq_ignore_ascii_case(UNRELEASED_LABEL);
        (Reverse(unreleased), Reverse(VersionTuple::parse(&s.label)))
    });
    sections
}

/// `v1.2.0`, `V1.2.0` and `1.2.0` name the same section; other labels compare case-insensitively.
fn normalized_label(label: &str) -> String {
    let trimmed = match label.strip_prefix(['v', 'V']) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => label,
    };
    trimmed.to_ascii_lowercase()
}

#[derive(Debug, Clone)]
pub struct SavedChangelog {
    pub path: PathBuf,
    pub sections: Vec<ReleaseSection>,
}

/// Writes the changelog document assembled from stored progress.
pub struct AssembleOperation<H, P, C> {
    history: H,
    store: P,
    changelog: C,
}

impl<H, P, C> AssembleOperation<H, P, C>
where
    H: HistoryProvider,
    P: ProgressStore,
    C: ChangelogStore,
{
    pub fn new(history: H, store: P, changelog: C) -> Self {
        Self {
            history,
            store,
            changelog,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed or the changelog cannot be
    /// read or written.
    pub fn execute(&self, path: &Path, today: NaiveDate) -> Result<SavedChangelog> {
        let tags = self.history.tags()?;
        let progress = self.store.load();
        let existing = self.changelog.read(path)?;

        let generated = assemble_sections(&progress, &tags, today);
        let sections = merge_with_existing(generated, &existing, today);
        self.changelog.write(path, &render_document(&sections))?;

        info!(path = %path.display(), sections = sections.len(), "saved changelog");
        Ok(SavedChangelog {
            path: path.to_path_buf(),
            sections,
        })
    }
}
