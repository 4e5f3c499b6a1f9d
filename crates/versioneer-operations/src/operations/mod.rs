mod assembly;
mod bump;
mod orchestrator;
mod range_resolver;
mod reconcile;
mod tagging;
mod version_planner;

pub use assembly::{AssembleOperation, SavedChangelog, assemble_sections, merge_with_existing};
pub use bump::{BumpInput, BumpOperation, BumpOutcome, BumpSuggestion};
pub use orchestrator::{
    ChangelogRangeOrchestrator, ChangelogRun, GenerateOptions, Preflight, RangeOutcome,
    RangePreview, RangeStatus, RangeStep, RunControl, SkipReason, build_range_keys,
    chronological_tags, section_label,
};
pub use range_resolver::{CommitRangeResolver, marker_revision};
pub use reconcile::{
    Classification, ReconcileOperation, ReconciliationReport, TagDrift, check,
};
pub use tagging::{TagOperation, TagOutcome, latest_tag, untagged_commits};
pub use version_planner::{PlannedTag, TagPlan, VersionPlanner};
