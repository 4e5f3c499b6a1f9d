use std::path::{Path, PathBuf};

use versioneer_manifest::find_manifest;

use crate::config::{ProjectConfig, load_config};
use crate::error::ProjectError;

/// A work tree together with its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    #[must_use]
    pub fn changelog_path(&self) -> PathBuf {
        self.root.join(self.config.changelog_path())
    }

    /// The configured manifest, or the first of `Cargo.toml` / `pyproject.toml` found at the root.
    #[must_use]
    pub fn manifest_path(&self) -> Option<PathBuf> {
        match self.config.manifest_path() {
            Some(path) => Some(self.root.join(path)),
            None => find_manifest(&self.root),
        }
    }
}

/// Walks up from `start_dir` to the nearest directory containing `.git` and loads its config.
///
/// # Errors
///
/// Returns `ProjectError::NotFound` if no enclosing work tree exists, or a config error
/// if `.versioneer.toml` is present but invalid.
pub fn discover_project(start_dir: &Path) -> Result<Project, ProjectError> {
    let start_dir = start_dir.canonicalize()?;

    let root = start_dir
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .ok_or_else(|| ProjectError::NotFound {
            start_dir: start_dir.clone(),
        })?
        .to_path_buf();

    let config = load_config(&root)?;
    Ok(Project { root, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn work_tree() -> anyhow::Result<TempDir> {
        let dir = TempDir::new()?;
        std::fs::create_dir(dir.path().join(".git"))?;
        Ok(dir)
    }

    #[test]
    fn discover_from_root() -> anyhow::Result<()> {
        let dir = work_tree()?;

        let project = discover_project(dir.path())?;

        assert_eq!(project.root, dir.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn discover_from_nested_directory() -> anyhow::Result<()> {
        let dir = work_tree()?;
        let nested = dir.path().join("src/deep");
        std::fs::create_dir_all(&nested)?;

        let project = discover_project(&nested)?;

        assert_eq!(project.root, dir.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn discover_without_git_fails() -> anyhow::Result<()> {
        let dir = TempDir::new()?;

        // A parent of the temp dir could itself be a work tree; only assert on the error kind
        // when nothing was found.
        match discover_project(dir.path()) {
            Err(ProjectError::NotFound { .. }) => {}
            Ok(project) => assert_ne!(project.root, dir.path().canonicalize()?),
            Err(other) => return Err(other.into()),
        }
        Ok(())
    }

    #[test]
    fn changelog_path_is_under_root() -> anyhow::Result<()> {
        let dir = work_tree()?;
        let project = discover_project(dir.path())?;

        assert_eq!(
            project.changelog_path(),
            dir.path().canonicalize()?.join("CHANGELOG.md")
        );
        Ok(())
    }

    #[test]
    fn manifest_path_auto_detected() -> anyhow::Result<()> {
        let dir = work_tree()?;
        std::fs::write(dir.path().join("pyproject.toml"), "[project]\n")?;
        let project = discover_project(dir.path())?;

        assert_eq!(
            project.manifest_path(),
            Some(dir.path().canonicalize()?.join("pyproject.toml"))
        );
        Ok(())
    }

    #[test]
    fn manifest_path_from_config() -> anyhow::Result<()> {
        let dir = work_tree()?;
        std::fs::write(
            dir.path().join(crate::CONFIG_FILE_NAME),
            "[manifest]\npath = \"backend/Cargo.toml\"\n",
        )?;
        let project = discover_project(dir.path())?;

        assert_eq!(
            project.manifest_path(),
            Some(dir.path().canonicalize()?.join("backend/Cargo.toml"))
        );
        Ok(())
    }
}
