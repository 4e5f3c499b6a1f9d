mod error;
mod kind;
mod reader;
mod writer;

pub use error::ManifestError;
pub use kind::{ManifestKind, find_manifest};
pub use reader::{read_document, read_version};
pub use writer::{verify_version, write_version};

pub type Result<T> = std::result::Result<T, ManifestError>;
