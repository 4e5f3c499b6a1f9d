use std::path::Path;

use versioneer_operations::operations::ReconcileOperation;
use versioneer_operations::providers::{FileSystemChangelog, FileSystemManifest, Git2Provider};
use versioneer_project::discover_project;

use crate::error::Result;
use crate::output::{OutputFormatter, PlainTextFormatter};

pub(crate) fn run(start_path: &Path) -> Result<()> {
    let project = discover_project(start_path)?;

    let operation = ReconcileOperation::new(
        Git2Provider::new(&project.root),
        FileSystemManifest::new(),
        FileSystemChangelog::new(),
    );
    let report = operation.execute(&project)?;

    print!("{}", PlainTextFormatter.format_report(&report));

    Ok(())
}
