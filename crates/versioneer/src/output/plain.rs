use versioneer_core::{ChangelogRangeKey, VersionTuple};
use versioneer_operations::operations::{
    BumpOutcome, Preflight, RangeOutcome, RangePreview, RangeStatus, RangeStep,
    ReconciliationReport, SavedChangelog, TagOutcome, TagPlan,
};

use super::OutputFormatter;

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn version_or_none(version: Option<VersionTuple>) -> String {
        version.map_or_else(|| "none".to_string(), |v| v.to_string())
    }

    fn format_commit_list(output: &mut String, title: &str, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        output.push_str(&format!("\n{title}:\n"));
        for line in lines {
            output.push_str(&format!("  {line}\n"));
        }
    }
}

impl OutputFormatter for PlainTextFormatter {
    fn format_report(&self, report: &ReconciliationReport) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Latest tag:       {}\n",
            Self::version_or_none(report.tag_version)
        ));
        output.push_str(&format!(
            "Changelog:        {}\n",
            Self::version_or_none(report.changelog_version)
        ));
        output.push_str(&format!(
            "Manifest:         {}\n",
            Self::version_or_none(report.manifest_version)
        ));
        output.push_str(&format!("\nStatus: {}\n", report.classification));

        if let Some(drift) = report.tag_drift {
            output.push_str(&format!("Warning: {drift}\n"));
        }
        if report.requires_confirmation() {
            output.push_str("Bumping the manifest will ask for confirmation.\n");
        }
        output
    }

    fn format_statuses(&self, statuses: &[(ChangelogRangeKey, RangeStatus)]) -> String {
        if statuses.is_empty() {
            return "No changelog ranges; create a version tag first.\n".to_string();
        }

        let width = statuses
            .iter()
            .map(|(key, _)| key.to_string().chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for (key, status) in statuses {
            let key = key.to_string();
            let pad = width - key.chars().count();
            output.push_str(&format!("{key}{}  {status}\n", " ".repeat(pad)));
        }
        output
    }

    fn format_preflight(&self, preflight: &Preflight) -> Option<String> {
        match preflight.untagged_commits {
            0 => None,
            count => Some(format!(
                "Warning: {count} commit(s) after the latest tag are not covered; \
                 tag them first or pass --include-unreleased\n"
            )),
        }
    }

    fn format_range_outcome(&self, outcome: &RangeOutcome) -> String {
        let key = &outcome.key;
        match &outcome.step {
            RangeStep::Generated {
                commit_count,
                content,
            } => format!("{key}: generated from {commit_count} commit(s)\n\n{content}\n"),
            RangeStep::NoChanges => format!("{key}: no changes\n"),
            RangeStep::Skipped(reason) => format!("{key}: skipped ({reason})\n"),
            RangeStep::SummaryUnavailable { error } => {
                format!("{key}: no summary available ({error})\n")
            }
        }
    }

    fn format_preview(&self, key: &ChangelogRangeKey, preview: &RangePreview) -> String {
        if preview.commits.is_empty() {
            return format!("{key}: no commits\n");
        }
        format!(
            "{key}: {} commit(s)\n\n{}\n",
            preview.commits.len(),
            preview.raw_changelog.trim_end()
        )
    }

    fn format_plan(&self, plan: &TagPlan) -> String {
        if plan.tags.is_empty() && plan.unplanned.is_empty() {
            return "No untagged commits.\n".to_string();
        }

        let mut output = format!("Base version: {}\n", plan.base);

        let planned: Vec<String> = plan
            .tags
            .iter()
            .map(|tag| {
                let bump = tag.bump().map(|b| b.to_string()).unwrap_or_default();
                let exists = if tag.exists { " (exists)" } else { "" };
                format!(
                    "{} {} [{bump}] {}{exists}",
                    tag.name,
                    tag.commit.short_id(),
                    tag.commit.summary
                )
            })
            .collect();
        Self::format_commit_list(&mut output, "Planned tags", &planned);

        let untagged: Vec<String> = plan
            .unplanned
            .iter()
            .map(|commit| format!("{} {}", commit.short_id(), commit.summary))
            .collect();
        Self::format_commit_list(&mut output, "Left untagged", &untagged);

        if let Some(bump) = plan.overall_bump() {
            output.push_str(&format!(
                "\nRelease: {} -> {} ({bump})\n",
                plan.base,
                plan.final_version()
            ));
        }
        output
    }

    fn format_tag_outcome(&self, outcome: &TagOutcome, dry_run: bool) -> String {
        let mut output = String::new();
        if dry_run {
            output.push_str("Dry run - no tags were created.\n");
        }
        for tag in &outcome.created {
            output.push_str(&format!("Created {}\n", tag.name));
        }
        for name in &outcome.skipped {
            output.push_str(&format!("Skipped {name} (already exists)\n"));
        }
        output
    }

    fn format_saved(&self, saved: &SavedChangelog) -> String {
        format!(
            "Wrote {} section(s) to {}\n",
            saved.sections.len(),
            saved.path.display()
        )
    }

    fn format_bump(&self, outcome: &BumpOutcome) -> String {
        let previous = outcome.previous.as_deref().unwrap_or("none");
        format!(
            "{}: {previous} -> {}\n",
            outcome.manifest_path.display(),
            outcome.version
        )
    }
}
