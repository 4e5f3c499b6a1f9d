use std::path::Path;

use tracing::{debug, warn};

use crate::traits::ManifestAccess;

pub struct FileSystemManifest;

impl FileSystemManifest {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestAccess for FileSystemManifest {
    fn read_version(&self, manifest_path: &Path) -> Option<String> {
        match versioneer_manifest::read_version(manifest_path) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!(manifest = %manifest_path.display(), error = %e, "manifest version unavailable");
                None
            }
        }
    }

    fn write_version(&self, manifest_path: &Path, version: &str) -> bool {
        let written = versioneer_manifest::write_version(manifest_path, version)
            .and_then(|()| versioneer_manifest::verify_version(manifest_path, version));
        match written {
            Ok(()) => {
                debug!(manifest = %manifest_path.display(), version, "updated manifest version");
                true
            }
            Err(e) => {
                warn!(manifest = %manifest_path.display(), error = %e, "failed to write manifest version");
                false
            }
        }
    }
}
