use versioneer_core::{BumpType, VersionTuple};

/// Applies a single bump to `base`.
#[must_use]
pub fn next_after(base: VersionTuple, bump: BumpType) -> VersionTuple {
    match bump {
        BumpType::Major => VersionTuple::new(base.major + 1, 0, 0),
        BumpType::Minor => VersionTuple::new(base.major, base.minor + 1, 0),
        BumpType::Patch => VersionTuple::new(base.major, base.minor, base.patch + 1),
    }
}

#[must_use]
pub fn max_bump_type(bumps: &[BumpType]) -> Option<BumpType> {
    bumps.iter().copied().max()
}

/// Assigns one version per bump, each computed from the previous one.
///
/// Every commit in a batch gets its own version: planning the same batch
/// against the repository's last tag independently would collapse all of
/// them onto the same next version.
#[derive(Debug, Clone)]
pub struct IncrementalVersionPlanner {
    current: VersionTuple,
}

impl IncrementalVersionPlanner {
    #[must_use]
    pub fn new(base: VersionTuple) -> Self {
        Self { current: base }
    }

    #[must_use]
    pub fn current(&self) -> VersionTuple {
        self.current
    }

    pub fn advance(&mut self, bump: BumpType) -> VersionTuple {
        self.current = next_after(self.current, bump);
        self.current
    }

    #[must_use]
    pub fn plan(base: VersionTuple, bumps: &[BumpType]) -> Vec<VersionTuple> {
        let mut planner = Self::new(base);
        bumps.iter().map(|&bump| planner.advance(bump)).collect()
    }
}

/// Suggests the next manifest version: one patch past the latest documented
/// changelog version, else past the latest tag, else `0.0.1`.
#[must_use]
pub fn suggest_next_version(
    changelog_version: Option<VersionTuple>,
    tag_version: Option<VersionTuple>,
) -> VersionTuple {
    changelog_version
        .or(tag_version)
        .map_or(VersionTuple::new(0, 0, 1), |base| {
            next_after(base, BumpType::Patch)
        })
}
