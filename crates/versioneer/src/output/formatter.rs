use versioneer_core::ChangelogRangeKey;
use versioneer_operations::operations::{
    BumpOutcome, Preflight, RangeOutcome, RangePreview, RangeStatus, ReconciliationReport,
    SavedChangelog, TagOutcome, TagPlan,
};

pub(crate) trait OutputFormatter {
    fn format_report(&self, report: &ReconciliationReport) -> String;
    fn format_statuses(&self, statuses: &[(ChangelogRangeKey, RangeStatus)]) -> String;
    fn format_preflight(&self, preflight: &Preflight) -> Option<String>;
    fn format_range_outcome(&self, outcome: &RangeOutcome) -> String;
    fn format_preview(&self, key: &ChangelogRangeKey, preview: &RangePreview) -> String;
    fn format_plan(&self, plan: &TagPlan) -> String;
    fn format_tag_outcome(&self, outcome: &TagOutcome, dry_run: bool) -> String;
    fn format_saved(&self, saved: &SavedChangelog) -> String;
    fn format_bump(&self, outcome: &BumpOutcome) -> String;
}
