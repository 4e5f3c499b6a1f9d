use std::path::Path;

use chrono::NaiveDate;
use versioneer_core::VersionTuple;
use versioneer_core::fs::write_atomic;

use crate::error::ChangelogError;
use crate::format::UNRELEASED_LABEL;

/// A `CHANGELOG.md` as read from disk.
///
/// Sections are introduced by `## [<label>]` headers; everything up to the next such
/// header belongs to that section.
#[derive(Debug, Clone, Default)]
pub struct ChangelogDocument {
    content: String,
}

impl ChangelogDocument {
    #[must_use]
    pub fn parse(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { content })
    }

    /// Reads the document, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::Read` for any failure other than the file not existing.
    pub fn from_file_or_empty(path: &Path) -> Result<Self, ChangelogError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self { content }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ChangelogError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Every section label, in document order, `Unreleased` included.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.content.lines().filter_map(section_label).collect()
    }

    /// Released version labels in document order (newest first by convention).
    #[must_use]
    pub fn versions(&self) -> Vec<&str> {
        self.labels()
            .into_iter()
            .filter(|label| !label.eq_ignore_ascii_case(UNRELEASED_LABEL))
            .collect()
    }

    /// The first released version in the document.
    #[must_use]
    pub fn latest_version(&self) -> Option<VersionTuple> {
        self.versions().first().map(|label| VersionTuple::parse(label))
    }

    /// Body of the section whose label matches `label`, trimmed, without its header.
    ///
    /// Labels match with or without a leading `v`, so `v1.2.0` finds `## [1.2.0]`.
    #[must_use]
    pub fn section(&self, label: &str) -> Option<&str> {
        let wanted = strip_v(label);
        let mut offset = 0;
        let mut start = None;

        for line in self.content.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();
            match (start, section_label(line)) {
                (None, Some(found)) if strip_v(found) == wanted => start = Some(offset),
                (Some(body_start), Some(_)) => {
                    return Some(self.content[body_start..line_start].trim());
                }
                _ => {}
            }
        }

        start.map(|body_start| self.content[body_start..].trim())
    }

    /// Whether the section for `label` exists and has a non-blank body.
    #[must_use]
    pub fn has_content_for(&self, label: &str) -> bool {
        self.section(label).is_some_and(|body| !body.is_empty())
    }

    /// The date after a section header (`## [1.0.0] - 2025-01-01`), if it has one.
    #[must_use]
    pub fn section_date(&self, label: &str) -> Option<NaiveDate> {
        let wanted = strip_v(label);
        let header = self
            .content
            .lines()
            .find(|line| section_label(line).is_some_and(|found| strip_v(found) == wanted))?;
        let (_, after) = header.split_once(']')?;
        let date = after.trim().trim_start_matches('-').trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        write_atomic(path, self.content.as_bytes()).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn section_label(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("##")?.trim_start();
    let rest = rest.strip_prefix('[')?;
    let end = rest.find(']')?;
    let label = rest[..end].trim();
    (!label.is_empty()).then_some(label)
}

fn strip_v(label: &str) -> &str {
    label
        .strip_prefix('v')
        .or_else(|| label.strip_prefix('V'))
        .unwrap_or(label)
}
