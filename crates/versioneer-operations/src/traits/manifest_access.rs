use std::path::Path;

/// Manifest version access with the failure policy the engine expects:
/// unreadable versions are absent and failed writes are reported, not raised.
pub trait ManifestAccess: Send + Sync {
    fn read_version(&self, manifest_path: &Path) -> Option<String>;

    /// Returns `false` if the version could not be written.
    fn write_version(&self, manifest_path: &Path, version: &str) -> bool;
}
