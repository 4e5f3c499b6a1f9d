use std::path::Path;

use toml_edit::value;
use versioneer_core::fs::write_atomic;

use crate::error::ManifestError;
use crate::kind::ManifestKind;
use crate::reader::{missing_version, read_document, read_version, version_table_path};

/// Replaces the manifest's version, leaving the rest of the file untouched.
///
/// The version is written where the manifest already keeps it; a manifest without
/// a version field is rejected rather than guessed at.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or written, or has no
/// version field to update.
pub fn write_version(path: &Path, version: &str) -> Result<(), ManifestError> {
    let kind = ManifestKind::from_path(path)?;
    let mut doc = read_document(path)?;

    let table_path = version_table_path(&doc, kind).ok_or_else(|| missing_version(path, kind))?;

    let mut item = doc.as_item_mut();
    for key in table_path {
        item = item
            .get_mut(*key)
            .ok_or_else(|| missing_version(path, kind))?;
    }

    let table = item
        .as_table_like_mut()
        .ok_or_else(|| missing_version(path, kind))?;
    table.insert("version", value(version));

    write_atomic(path, doc.to_string().as_bytes()).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// # Errors
///
/// Returns `ManifestError::VerificationFailed` if the version in the manifest
/// does not match the expected version.
pub fn verify_version(path: &Path, expected: &str) -> Result<(), ManifestError> {
    let actual = read_version(path)?;

    if actual != expected {
        return Err(ManifestError::VerificationFailed {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(())
}
