use std::path::{Path, PathBuf};

use crate::error::ManifestError;

/// Supported manifest formats and where each keeps its version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Cargo,
    Pyproject,
}

impl ManifestKind {
    /// Auto-detection order when no manifest is configured.
    pub const DETECTION_ORDER: [Self; 2] = [Self::Cargo, Self::Pyproject];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Cargo => "Cargo.toml",
            Self::Pyproject => "pyproject.toml",
        }
    }

    /// Table paths that may hold `version`, in lookup order.
    #[must_use]
    pub fn version_tables(self) -> &'static [&'static [&'static str]] {
        match self {
            Self::Cargo => &[&["package"]],
            Self::Pyproject => &[&["project"], &["tool", "poetry"]],
        }
    }

    /// # Errors
    ///
    /// Returns `ManifestError::UnsupportedManifest` if the file name is not recognized.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        Self::DETECTION_ORDER
            .into_iter()
            .find(|kind| kind.file_name() == name)
            .ok_or_else(|| ManifestError::UnsupportedManifest {
                path: path.to_path_buf(),
            })
    }
}

/// Finds the first supported manifest directly under `root`.
#[must_use]
pub fn find_manifest(root: &Path) -> Option<PathBuf> {
    ManifestKind::DETECTION_ORDER
        .into_iter()
        .map(|kind| root.join(kind.file_name()))
        .find(|path| path.is_file())
}
