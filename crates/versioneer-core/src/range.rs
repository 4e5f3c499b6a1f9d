use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VersioneerError;
use crate::version::VersionTuple;

pub const START_SENTINEL: &str = "start";
pub const HEAD_SENTINEL: &str = "HEAD";
pub const RANGE_SEPARATOR: char = '→';
pub const NO_CHANGES_PLACEHOLDER: &str = "no changes";

/// A point in history: the root of history, the current branch head, or a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    Start,
    Head,
    Tag(String),
}

impl Marker {
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => START_SENTINEL,
            Self::Head => HEAD_SENTINEL,
            Self::Tag(name) => name,
        }
    }

    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Tag(name) => Some(name),
            _ => None,
        }
    }

    /// The lenient version of a tag marker; `None` for the sentinels.
    #[must_use]
    pub fn version(&self) -> Option<VersionTuple> {
        self.tag_name().map(VersionTuple::parse)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Start => 0,
            Self::Tag(_) => 1,
            Self::Head => 2,
        }
    }
}

impl From<&str> for Marker {
    fn from(s: &str) -> Self {
        match s {
            START_SENTINEL => Self::Start,
            HEAD_SENTINEL => Self::Head,
            name => Self::Tag(name.to_string()),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `start` sorts first, `HEAD` last, and tags by version in between (ties broken by name).
impl Ord for Marker {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.version().cmp(&other.version()))
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl PartialOrd for Marker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Identity of one unit of changelog work: the commits after `from` up to and including `to`.
///
/// Keys order by their `to` marker first, so sorting a set of keys yields
/// release order with `HEAD` last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChangelogRangeKey {
    pub from: Marker,
    pub to: Marker,
}

impl ChangelogRangeKey {
    #[must_use]
    pub fn new(from: Marker, to: Marker) -> Self {
        Self { from, to }
    }
}

impl Ord for ChangelogRangeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to
            .cmp(&other.to)
            .then_with(|| self.from.cmp(&other.from))
    }
}

impl PartialOrd for ChangelogRangeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ChangelogRangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", self.from, self.to)
    }
}

impl FromStr for ChangelogRangeKey {
    type Err = VersioneerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(RANGE_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(from), Some(to), None) if !from.is_empty() && !to.is_empty() => {
                Ok(Self::new(Marker::from(from), Marker::from(to)))
            }
            _ => Err(VersioneerError::InvalidRangeKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for ChangelogRangeKey {
    type Error = VersioneerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChangelogRangeKey> for String {
    fn from(key: ChangelogRangeKey) -> Self {
        key.to_string()
    }
}

/// Content recorded for a range: generated text, or the placeholder for an empty range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProgressContent {
    NoChanges,
    Generated(String),
}

impl ProgressContent {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::NoChanges)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::NoChanges => None,
            Self::Generated(text) => Some(text),
        }
    }
}

impl From<String> for ProgressContent {
    fn from(value: String) -> Self {
        if value == NO_CHANGES_PLACEHOLDER {
            Self::NoChanges
        } else {
            Self::Generated(value)
        }
    }
}

impl From<ProgressContent> for String {
    fn from(content: ProgressContent) -> Self {
        match content {
            ProgressContent::NoChanges => NO_CHANGES_PLACEHOLDER.to_string(),
            ProgressContent::Generated(text) => text,
        }
    }
}
