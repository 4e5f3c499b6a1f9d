mod bump;
mod changelog;
mod status;
mod tag;

use std::path::Path;

use clap::{Args, Subcommand};

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Compare the latest tag, changelog and manifest versions
    Status,
    /// Show the tags that would be created for untagged commits
    Plan,
    /// Create version tags for untagged commits
    Tag(TagArgs),
    /// Generate, inspect and save changelog sections per tag range
    #[command(subcommand)]
    Changelog(ChangelogCommand),
    /// Write a new version into the manifest
    Bump(BumpArgs),
}

#[derive(Args)]
pub(crate) struct TagArgs {
    /// Show what would be tagged without creating tags
    #[arg(long)]
    pub dry_run: bool,

    /// Accept the suggested bump for every commit instead of prompting
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub(crate) enum ChangelogCommand {
    /// Summarize every tag range that is not generated or documented yet
    Generate(GenerateArgs),
    /// Write generated sections into the changelog file
    Save,
    /// List every tag range with its generation status
    Ranges(RangesArgs),
    /// Forget all generated progress
    Clear,
    /// Print the commits and raw changelog text between two markers
    Range(RangeArgs),
}

#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Discard stored progress and regenerate every range
    #[arg(long)]
    pub rebuild: bool,

    /// Generate every range without asking between ranges
    #[arg(long)]
    pub auto: bool,

    /// Also summarize commits after the latest tag
    #[arg(long)]
    pub include_unreleased: bool,
}

#[derive(Args)]
pub(crate) struct RangesArgs {
    /// Include the range from the latest tag to HEAD
    #[arg(long)]
    pub include_unreleased: bool,
}

#[derive(Args)]
pub(crate) struct RangeArgs {
    /// Start marker: a tag name or `start`
    pub from: String,
    /// End marker: a tag name or HEAD
    pub to: String,
}

#[derive(Args)]
pub(crate) struct BumpArgs {
    /// Version to write (default: the suggested next version)
    pub version: Option<String>,

    /// Do not prompt; write the version even if the manifest leads the changelog
    #[arg(long, short)]
    pub yes: bool,
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::Status => status::run(start_path),
            Self::Plan => tag::run_plan(start_path),
            Self::Tag(args) => tag::run(args, start_path),
            Self::Changelog(command) => changelog::run(command, start_path),
            Self::Bump(args) => bump::run(args, start_path),
        }
    }
}
