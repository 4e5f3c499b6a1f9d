use std::path::{Path, PathBuf};

use crate::config_file::ConfigFile;
use crate::error::ProjectError;
use crate::{CONFIG_FILE_NAME, DEFAULT_CHANGELOG_PATH, DEFAULT_MAX_INPUT_CHARS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    command: Vec<String>,
    max_input_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl SummarizerConfig {
    /// The external summarizer's argv; `None` when no summarizer is configured.
    #[must_use]
    pub fn command(&self) -> Option<&[String]> {
        (!self.command.is_empty()).then_some(self.command.as_slice())
    }

    #[must_use]
    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    changelog_path: PathBuf,
    manifest_path: Option<PathBuf>,
    summarizer: SummarizerConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            changelog_path: PathBuf::from(DEFAULT_CHANGELOG_PATH),
            manifest_path: None,
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Changelog location relative to the work tree root.
    #[must_use]
    pub fn changelog_path(&self) -> &Path {
        &self.changelog_path
    }

    /// Configured manifest location relative to the work tree root, if any.
    #[must_use]
    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }

    #[must_use]
    pub fn summarizer(&self) -> &SummarizerConfig {
        &self.summarizer
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_summarizer(mut self, summarizer: SummarizerConfig) -> Self {
        self.summarizer = summarizer;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }
}

/// Parses configuration text. `path` is only used in error messages.
///
/// # Errors
///
/// Returns `ProjectError::ConfigParse` for malformed TOML or unknown keys, and
/// `ProjectError::InvalidConfig` for values that parse but cannot be used.
pub fn parse_config(content: &str, path: &Path) -> Result<ProjectConfig, ProjectError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let defaults = ProjectConfig::default();
    let summarizer = file.summarizer.unwrap_or_default();

    let max_input_chars = summarizer
        .max_input_chars
        .unwrap_or(DEFAULT_MAX_INPUT_CHARS);
    if max_input_chars == 0 {
        return Err(ProjectError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "summarizer.max-input-chars must be greater than zero",
        });
    }

    let command = summarizer.command.unwrap_or_default();
    if command.first().is_some_and(|program| program.trim().is_empty()) {
        return Err(ProjectError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "summarizer.command must start with a program name",
        });
    }

    Ok(ProjectConfig {
        changelog_path: file
            .changelog
            .and_then(|c| c.path)
            .map_or(defaults.changelog_path, PathBuf::from),
        manifest_path: file.manifest.and_then(|m| m.path).map(PathBuf::from),
        summarizer: SummarizerConfig {
            command,
            max_input_chars,
        },
    })
}

/// Loads `.versioneer.toml` from `root`, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ProjectError> {
    let path = root.join(CONFIG_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content, &path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ProjectConfig::default()),
        Err(source) => Err(ProjectError::ConfigRead { path, source }),
    }
}
