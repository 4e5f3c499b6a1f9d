use std::path::Path;

use toml_edit::{DocumentMut, Item};

use crate::error::ManifestError;
use crate::kind::ManifestKind;

/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be read, or
/// `ManifestError::Parse` if the TOML is malformed.
pub fn read_document(path: &Path) -> Result<DocumentMut, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    content
        .parse::<DocumentMut>()
        .map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads the version string exactly as written in the manifest.
///
/// # Errors
///
/// Returns `ManifestError::MissingField` if none of the manifest's version tables
/// carries a string `version`, or a read/parse error for the file itself.
pub fn read_version(path: &Path) -> Result<String, ManifestError> {
    let kind = ManifestKind::from_path(path)?;
    let doc = read_document(path)?;

    let table = version_table(&doc, kind).ok_or_else(|| missing_version(path, kind))?;

    table
        .get("version")
        .and_then(Item::as_str)
        .map(str::to_string)
        .ok_or_else(|| missing_version(path, kind))
}

/// The first table path of `kind` whose table has a string `version`.
pub(crate) fn version_table_path(
    doc: &DocumentMut,
    kind: ManifestKind,
) -> Option<&'static [&'static str]> {
    kind.version_tables()
        .iter()
        .copied()
        .find(|table_path| {
            lookup(doc.as_item(), table_path)
                .and_then(|table| table.get("version"))
                .and_then(Item::as_str)
                .is_some()
        })
}

fn version_table(doc: &DocumentMut, kind: ManifestKind) -> Option<&Item> {
    version_table_path(doc, kind).and_then(|table_path| lookup(doc.as_item(), table_path))
}

fn lookup<'a>(root: &'a Item, table_path: &[&str]) -> Option<&'a Item> {
    table_path.iter().try_fold(root, |item, key| item.get(*key))
}

pub(crate) fn missing_version(path: &Path, kind: ManifestKind) -> ManifestError {
    let field = kind
        .version_tables()
        .iter()
        .map(|table_path| format!("{}.version", table_path.join(".")))
        .collect::<Vec<_>>()
        .join(" or ");

    ManifestError::MissingField {
        path: path.to_path_buf(),
        field,
    }
}
