use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VersioneerError};

/// A `(major, minor, patch)` triple ordered lexicographically.
///
/// [`VersionTuple::parse`] is lenient: anything that does not start with three
/// dot-separated non-negative integers becomes `0.0.0`, so malformed tags sort
/// as the oldest possible version instead of failing a sort. Callers that need
/// validation use [`VersionTuple::parse_strict`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct VersionTuple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTuple {
    pub const ZERO: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Strips one leading `v`/`V`, then reads the first three dot-separated
    /// fields. Extra fields are ignored (`v1.2.3.4` is `1.2.3`).
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::try_parse_lenient(input).unwrap_or(Self::ZERO)
    }

    /// Parses a full semantic version (pre-release and build metadata are
    /// accepted and dropped), with an optional leading `v`/`V`.
    ///
    /// # Errors
    ///
    /// Returns [`VersioneerError::InvalidVersion`] if the input is not valid `SemVer`.
    pub fn parse_strict(input: &str) -> Result<Self> {
        let version =
            Version::parse(strip_prefix(input)).map_err(|source| VersioneerError::InvalidVersion {
                input: input.to_string(),
                source,
            })?;
        Ok(Self::from(&version))
    }

    #[must_use]
    pub fn format(&self, prefix: bool) -> String {
        if prefix {
            format!("v{self}")
        } else {
            self.to_string()
        }
    }

    fn try_parse_lenient(input: &str) -> Option<Self> {
        let mut fields = strip_prefix(input).split('.');
        let major = fields.next()?.parse().ok()?;
        let minor = fields.next()?.parse().ok()?;
        let patch = fields.next()?.parse().ok()?;
        Some(Self::new(major, minor, patch))
    }
}

fn strip_prefix(input: &str) -> &str {
    input
        .strip_prefix('v')
        .or_else(|| input.strip_prefix('V'))
        .unwrap_or(input)
}

/// Returns `true` if `input` (without a `v` prefix) is a valid semantic version.
#[must_use]
pub fn is_valid_semver(input: &str) -> bool {
    Version::parse(input).is_ok()
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<&Version> for VersionTuple {
    fn from(version: &Version) -> Self {
        Self::new(version.major, version.minor, version.patch)
    }
}

impl From<VersionTuple> for Version {
    fn from(version: VersionTuple) -> Self {
        Version::new(version.major, version.minor, version.patch)
    }
}
