use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VersioneerError;
use crate::version::VersionTuple;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BumpType {
    type Err = VersioneerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(VersioneerError::InvalidBumpType(s.to_string())),
        }
    }
}

/// A commit as scanned from history.
///
/// The bump hint and resolved message are assigned in memory while a batch is
/// being prepared; assigning either marks the commit as finalized. Nothing
/// here is persisted on its own, only the tags and changelog entries derived
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub summary: String,
    pub author: String,
    pub committed_at: DateTime<Utc>,
    bump_hint: Option<BumpType>,
    resolved_message: Option<String>,
    finalized: bool,
}

impl CommitRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        summary: impl Into<String>,
        author: impl Into<String>,
        committed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            author: author.into(),
            committed_at,
            bump_hint: None,
            resolved_message: None,
            finalized: false,
        }
    }

    #[must_use]
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(7)
            .map_or(self.id.len(), |(idx, _)| idx);
        &self.id[..end]
    }

    #[must_use]
    pub fn bump_hint(&self) -> Option<BumpType> {
        self.bump_hint
    }

    pub fn assign_bump(&mut self, bump: BumpType) {
        self.bump_hint = Some(bump);
        self.finalized = true;
    }

    #[must_use]
    pub fn with_bump(mut self, bump: BumpType) -> Self {
        self.assign_bump(bump);
        self
    }

    #[must_use]
    pub fn resolved_message(&self) -> Option<&str> {
        self.resolved_message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.resolved_message = Some(message.into());
        self.finalized = true;
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// The text used when this commit becomes a tag annotation.
    #[must_use]
    pub fn tag_message(&self) -> &str {
        self.resolved_message.as_deref().unwrap_or(&self.summary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: String,
    pub target_commit: String,
    pub annotation_message: String,
    /// Commit time of the tagged commit.
    pub created_at: DateTime<Utc>,
}

impl TagRecord {
    #[must_use]
    pub fn version(&self) -> VersionTuple {
        VersionTuple::parse(&self.name)
    }
}
