use std::io::IsTerminal;

use crate::error::{CliError, Result};

const NO_TTY_VAR: &str = "VERSIONEER_NO_TTY";
const FORCE_TTY_VAR: &str = "VERSIONEER_FORCE_TTY";
const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NonInteractiveReason {
    ExplicitDisable,
    CiDetected { env_var: &'static str },
    NoTerminal,
}

pub(crate) fn non_interactive_reason() -> Option<NonInteractiveReason> {
    if std::env::var_os(NO_TTY_VAR).is_some() {
        return Some(NonInteractiveReason::ExplicitDisable);
    }
    if std::env::var_os(FORCE_TTY_VAR).is_some() {
        return None;
    }
    if let Some(env_var) = CI_ENV_VARS
        .iter()
        .copied()
        .find(|var| std::env::var_os(var).is_some())
    {
        return Some(NonInteractiveReason::CiDetected { env_var });
    }
    if !std::io::stdin().is_terminal() {
        return Some(NonInteractiveReason::NoTerminal);
    }
    None
}

/// Fails with a hint naming the flag that avoids the prompt.
pub(crate) fn require_interactive(hint: &'static str) -> Result<()> {
    match non_interactive_reason() {
        None => Ok(()),
        Some(reason) => {
            tracing::debug!(?reason, "prompt unavailable");
            Err(CliError::NotATty { hint })
        }
    }
}
