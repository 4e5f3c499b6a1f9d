use chrono::NaiveDate;

use versioneer_core::CommitRecord;

pub const UNRELEASED_LABEL: &str = "Unreleased";

const CHANGELOG_HEADER: &str = r"# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).
";

/// Commit summaries are grouped by conventional-commit prefix, in this order.
const COMMIT_GROUPS: [(&str, &str); 3] = [
    ("feat", "New Features"),
    ("fix", "Bug Fixes"),
    ("docs", "Documentation"),
];
const OTHER_GROUP: &str = "Other Changes";

/// One `## [<label>] - <date>` section of an assembled changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSection {
    pub label: String,
    pub date: NaiveDate,
    pub content: String,
}

impl ReleaseSection {
    #[must_use]
    pub fn new(label: impl Into<String>, date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            date,
            content: content.into(),
        }
    }
}

#[must_use]
pub fn format_section_header(label: &str, date: NaiveDate) -> String {
    format!("## [{label}] - {date}")
}

/// Renders a complete document from sections already in display order.
#[must_use]
pub fn render_document(sections: &[ReleaseSection]) -> String {
    let mut output = CHANGELOG_HEADER.to_string();

    for section in sections {
        output.push('\n');
        output.push_str(&format_section_header(&section.label, section.date));
        output.push_str("\n\n");
        let content = section.content.trim();
        if !content.is_empty() {
            output.push_str(content);
            output.push('\n');
        }
    }

    output
}

/// Formats commit summaries as markdown, grouped by conventional-commit type.
///
/// This is the raw text handed to a summarizer. An empty slice yields an empty string.
#[must_use]
pub fn format_raw_commits(commits: &[CommitRecord]) -> String {
    let mut groups: Vec<Vec<&str>> = vec![Vec::new(); COMMIT_GROUPS.len() + 1];

    for commit in commits {
        let summary = commit.summary.as_str();
        let index = COMMIT_GROUPS
            .iter()
            .position(|(prefix, _)| summary.starts_with(prefix))
            .unwrap_or(COMMIT_GROUPS.len());
        groups[index].push(summary);
    }

    let titles = COMMIT_GROUPS
        .iter()
        .map(|(_, title)| *title)
        .chain(std::iter::once(OTHER_GROUP));

    let mut sections = Vec::new();
    for (title, summaries) in titles.zip(&groups) {
        if summaries.is_empty() {
            continue;
        }
        let mut section = format!("### {title}\n");
        for summary in summaries {
            section.push_str("- ");
            section.push_str(summary);
            section.push('\n');
        }
        sections.push(section);
    }

    sections.join("\n")
}
