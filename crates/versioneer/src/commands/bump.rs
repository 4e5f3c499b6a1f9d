use std::path::Path;

use versioneer_operations::OperationError;
use versioneer_operations::operations::{BumpInput, BumpOperation};
use versioneer_operations::providers::{FileSystemChangelog, FileSystemManifest, Git2Provider};
use versioneer_project::discover_project;

use super::BumpArgs;
use crate::error::{CliError, Result};
use crate::interaction;
use crate::output::{OutputFormatter, PlainTextFormatter};

pub(crate) fn run(args: BumpArgs, start_path: &Path) -> Result<()> {
    let project = discover_project(start_path)?;
    let operation = BumpOperation::new(
        Git2Provider::new(&project.root),
        FileSystemManifest::new(),
        FileSystemChangelog::new(),
    );

    let version = match args.version {
        Some(version) => Some(version),
        None if args.yes => None,
        None => {
            let suggestion = operation.suggest(&project)?;
            Some(interaction::input_version(
                &suggestion.suggested.format(false),
            )?)
        }
    };

    let input = BumpInput {
        version,
        confirmed: args.yes,
    };

    let outcome = match operation.execute(&project, &input) {
        Err(OperationError::ConfirmationRequired {
            manifest,
            changelog,
        }) => {
            let prompt = format!(
                "Manifest version {manifest} is ahead of the changelog ({changelog}). Write anyway?"
            );
            if !interaction::confirm(&prompt, "--yes")? {
                return Err(CliError::Cancelled);
            }
            operation.execute(
                &project,
                &BumpInput {
                    confirmed: true,
                    ..input
                },
            )?
        }
        other => other?,
    };

    print!("{}", PlainTextFormatter.format_bump(&outcome));

    Ok(())
}
