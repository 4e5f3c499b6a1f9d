use crate::{CommitInfo, Result};

use super::Repository;

impl Repository {
    /// Resolves a revision (tag name, branch, `HEAD`, sha) to the commit it points at.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GitError::RefNotFound`] if the revision does not name a commit.
    pub fn resolve_commit(&self, refspec: &str) -> Result<CommitInfo> {
        let oid = self.resolve_oid(refspec)?;
        let commit = self.inner.find_commit(oid)?;
        Ok(CommitInfo::from_commit(&commit))
    }

    /// Commits reachable from `include` but not from `exclude`, newest first.
    ///
    /// With `exclude` set to `None` this is the full ancestry of `include`.
    ///
    /// # Errors
    ///
    /// Returns an error if either revision cannot be resolved or the walk fails.
    pub fn commits_between(&self, exclude: Option<&str>, include: &str) -> Result<Vec<CommitInfo>> {
        let mut walk = self.inner.revwalk()?;
        walk.set_sorting(git2::Sort::TIME)?;
        walk.push(self.resolve_oid(include)?)?;
        if let Some(exclude) = exclude {
            walk.hide(self.resolve_oid(exclude)?)?;
        }

        walk.map(|oid| {
            let commit = self.inner.find_commit(oid?)?;
            Ok(CommitInfo::from_commit(&commit))
        })
        .collect()
    }

    /// Every commit reachable from `refspec`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision cannot be resolved or the walk fails.
    pub fn ancestors(&self, refspec: &str) -> Result<Vec<CommitInfo>> {
        self.commits_between(None, refspec)
    }
}
