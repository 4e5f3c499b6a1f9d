use std::path::Path;

use versioneer_core::CommitRecord;
use versioneer_operations::operations::{TagOperation, VersionPlanner};
use versioneer_operations::providers::Git2Provider;
use versioneer_project::discover_project;

use super::TagArgs;
use crate::error::Result;
use crate::interaction;
use crate::output::{OutputFormatter, PlainTextFormatter};

pub(crate) fn run_plan(start_path: &Path) -> Result<()> {
    let project = discover_project(start_path)?;
    let operation = TagOperation::new(Git2Provider::new(&project.root));

    let mut commits = operation.scan()?;
    VersionPlanner::assign_suggested_bumps(&mut commits);
    let plan = operation.plan(&commits)?;

    print!("{}", PlainTextFormatter.format_plan(&plan));

    Ok(())
}

pub(crate) fn run(args: TagArgs, start_path: &Path) -> Result<()> {
    let project = discover_project(start_path)?;
    let operation = TagOperation::new(Git2Provider::new(&project.root));

    let mut commits = operation.scan()?;
    if commits.is_empty() {
        println!("No untagged commits.");
        return Ok(());
    }

    if args.yes {
        VersionPlanner::assign_suggested_bumps(&mut commits);
    } else {
        select_bumps(&mut commits)?;
    }

    let plan = operation.plan(&commits)?;
    print!("{}", PlainTextFormatter.format_plan(&plan));

    let outcome = operation.apply(&plan, args.dry_run)?;
    print!(
        "{}",
        PlainTextFormatter.format_tag_outcome(&outcome, args.dry_run)
    );

    Ok(())
}

fn select_bumps(commits: &mut [CommitRecord]) -> Result<()> {
    for commit in commits.iter_mut() {
        let suggested = VersionPlanner::suggest_bump(&commit.summary);
        if let Some(bump) = interaction::select_bump(commit, suggested)? {
            commit.assign_bump(bump);
        }
    }
    Ok(())
}
