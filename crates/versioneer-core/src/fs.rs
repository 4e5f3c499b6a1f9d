use std::io::Write;
use std::path::Path;

/// Replaces `path` with `data` through a temporary file in the same directory.
///
/// A reader sees either the old contents or the new ones, never a partial write.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file cannot be
/// written or moved into place.
pub fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    // The temp file is owner-only; an existing target keeps its own mode.
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
