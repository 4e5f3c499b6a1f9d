use dialoguer::{Confirm, Input, Select};
use versioneer_core::{BumpType, ChangelogRangeKey, CommitRecord, is_valid_semver};
use versioneer_operations::operations::RunControl;

use crate::environment::require_interactive;
use crate::error::{CliError, Result};

const RUN_CONTROL_ITEMS: [&str; 4] = [
    "continue - generate the next range",
    "skip - stop generating, keep what was written",
    "auto - generate every remaining range without asking",
    "abort - stop now",
];

/// Asks how to proceed after a range has been generated. Escape aborts.
pub(crate) fn select_run_control(key: &ChangelogRangeKey, remaining: usize) -> Result<RunControl> {
    require_interactive("--auto")?;

    let selection = Select::new()
        .with_prompt(format!("Generated {key}; {remaining} range(s) left"))
        .items(RUN_CONTROL_ITEMS)
        .default(0)
        .interact_opt()?;

    Ok(match selection {
        Some(0) => RunControl::Continue,
        Some(1) => RunControl::SkipRest,
        Some(2) => RunControl::AutoAll,
        _ => RunControl::Abort,
    })
}

/// `None` leaves the commit untagged.
pub(crate) fn select_bump(commit: &CommitRecord, suggested: BumpType) -> Result<Option<BumpType>> {
    require_interactive("--yes")?;

    let items = [
        "patch - Bug fixes (backwards compatible)",
        "minor - New features (backwards compatible)",
        "major - Breaking changes",
        "none - Leave this commit untagged",
    ];
    let default = match suggested {
        BumpType::Patch => 0,
        BumpType::Minor => 1,
        BumpType::Major => 2,
    };

    let selection = Select::new()
        .with_prompt(format!("{} {}", commit.short_id(), commit.summary))
        .items(items)
        .default(default)
        .interact_opt()?;

    match selection {
        Some(0) => Ok(Some(BumpType::Patch)),
        Some(1) => Ok(Some(BumpType::Minor)),
        Some(2) => Ok(Some(BumpType::Major)),
        Some(_) => Ok(None),
        None => Err(CliError::Cancelled),
    }
}

pub(crate) fn confirm(prompt: &str, hint: &'static str) -> Result<bool> {
    require_interactive(hint)?;

    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact_opt()?;
    Ok(answer.unwrap_or(false))
}

/// Reads a version, offering `suggested` as the default.
pub(crate) fn input_version(suggested: &str) -> Result<String> {
    require_interactive("a version argument")?;

    let version: String = Input::new()
        .with_prompt("New manifest version")
        .default(suggested.to_string())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            let bare = input.trim().strip_prefix('v').unwrap_or(input.trim());
            if is_valid_semver(bare) {
                Ok(())
            } else {
                Err(format!("'{input}' is not a valid semantic version"))
            }
        })
        .interact_text()?;
    Ok(version)
}
