use crate::{GitError, Result, TagInfo};

use super::Repository;

impl Repository {
    /// Lists every tag that resolves to a commit, in name order.
    ///
    /// Tags pointing at trees or blobs are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag names cannot be read.
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.inner.tag_names(None)?;
        let mut tags = Vec::with_capacity(names.len());

        for name in names.iter().flatten() {
            let Ok(reference) = self.inner.find_reference(&format!("refs/tags/{name}")) else {
                continue;
            };
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };
            let message = match reference.peel_to_tag() {
                Ok(tag) => tag.message().unwrap_or_default().trim().to_string(),
                Err(_) => commit.message().unwrap_or_default().trim().to_string(),
            };

            tags.push(TagInfo {
                name: name.to_string(),
                target_sha: commit.id().to_string(),
                message,
                commit_time: commit.time().seconds(),
            });
        }

        Ok(tags)
    }

    fn tag_exists(&self, name: &str) -> bool {
        self.inner
            .find_reference(&format!("refs/tags/{name}"))
            .is_ok()
    }

    /// Creates an annotated tag on the commit `target` resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::TagExists`] if a tag with this name already exists,
    /// or an error if the target cannot be resolved or the tag cannot be written.
    pub fn create_tag(&self, name: &str, target: &str, message: &str) -> Result<TagInfo> {
        if self.tag_exists(name) {
            return Err(GitError::TagExists {
                name: name.to_string(),
            });
        }

        let commit = self.inner.find_commit(self.resolve_oid(target)?)?;
        let sig = self.inner.signature()?;

        self.inner
            .tag(name, commit.as_object(), &sig, message, false)?;

        Ok(TagInfo {
            name: name.to_string(),
            target_sha: commit.id().to_string(),
            message: message.to_string(),
            commit_time: commit.time().seconds(),
        })
    }
}
