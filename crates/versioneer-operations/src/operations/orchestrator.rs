use std::fmt;

use tracing::{Span, debug, info, warn};
use versioneer_changelog::{ChangelogDocument, UNRELEASED_LABEL, format_raw_commits};
use versioneer_core::{ChangelogRangeKey, CommitRecord, Marker, ProgressContent, TagRecord};
use versioneer_project::DEFAULT_MAX_INPUT_CHARS;

use super::range_resolver::CommitRangeResolver;
use super::tagging::untagged_commits;
use crate::Result;
use crate::traits::{HistoryProvider, ProgressMap, ProgressStore, Summarizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Clear stored progress first and ignore already documented versions.
    pub rebuild: bool,
    /// Append the `last tag → HEAD` range.
    pub include_unreleased: bool,
    /// Raw text longer than this many characters is truncated before summarizing.
    pub max_input_chars: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rebuild: false,
            include_unreleased: false,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

/// What the operator wants after a range has been generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunControl {
    Continue,
    /// Stop generating; the remaining ranges are reported as skipped.
    SkipRest,
    /// Generate every remaining range without asking again.
    AutoAll,
    /// Stop immediately. Progress saved so far is kept.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyDocumented,
    AlreadyGenerated,
    StoppedByOperator,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AlreadyDocumented => "already in changelog",
            Self::AlreadyGenerated => "already generated",
            Self::StoppedByOperator => "stopped",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeStep {
    Generated { commit_count: usize, content: String },
    NoChanges,
    Skipped(SkipReason),
    /// The summarizer failed; nothing was stored for this range.
    SummaryUnavailable { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeOutcome {
    pub key: ChangelogRangeKey,
    pub step: RangeStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    Pending,
    Generated,
    NoChanges,
    /// The changelog document already has content for the range's version.
    Documented,
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Generated => "generated",
            Self::NoChanges => "no-changes",
            Self::Documented => "documented",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Preflight {
    pub ranges: Vec<ChangelogRangeKey>,
    pub untagged_commits: usize,
}

#[derive(Debug, Clone)]
pub struct RangePreview {
    pub commits: Vec<CommitRecord>,
    pub raw_changelog: String,
}

/// Orders tags by the time of the commit they point at, ties broken by version.
#[must_use]
pub fn chronological_tags(tags: &[TagRecord]) -> Vec<&TagRecord> {
    let mut sorted: Vec<&TagRecord> = tags.iter().collect();
    sorted.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.version().cmp(&b.version()))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

/// `start → first tag`, each consecutive tag pair, and optionally `last tag → HEAD`.
#[must_use]
pub fn build_range_keys(tags: &[TagRecord], include_unreleased: bool) -> Vec<ChangelogRangeKey> {
    let mut keys = Vec::new();
    let mut previous = Marker::Start;

    for tag in chronological_tags(tags) {
        let current = Marker::tag(&tag.name);
        keys.push(ChangelogRangeKey::new(previous, current.clone()));
        previous = current;
    }

    if include_unreleased {
        keys.push(ChangelogRangeKey::new(previous, Marker::Head));
    }

    keys
}

/// The changelog label a range's `to` marker is documented under.
#[must_use]
pub fn section_label(marker: &Marker) -> &str {
    match marker {
        Marker::Head => UNRELEASED_LABEL,
        Marker::Start | Marker::Tag(_) => marker.as_str(),
    }
}

/// HEAD moves, so an `Unreleased` section never counts as finished documentation.
fn is_documented(changelog: &ChangelogDocument, key: &ChangelogRangeKey) -> bool {
    match &key.to {
        Marker::Tag(name) => changelog.has_content_for(name),
        Marker::Start | Marker::Head => false,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Drives changelog generation over every tag range of a repository.
pub struct ChangelogRangeOrchestrator<H, S, P> {
    history: H,
    summarizer: S,
    store: P,
    span: Span,
}

impl<H, S, P> ChangelogRangeOrchestrator<H, S, P>
where
    H: HistoryProvider,
    S: Summarizer,
    P: ProgressStore,
{
    pub fn new(history: H, summarizer: S, store: P, span: Span) -> Self {
        Self {
            history,
            summarizer,
            store,
            span,
        }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// # Errors
    ///
    /// Returns an error if tags or HEAD's history cannot be read.
    pub fn preflight(&self, include_unreleased: bool) -> Result<Preflight> {
        let _entered = self.span.enter();
        let tags = self.history.tags()?;
        let untagged = untagged_commits(&self.history)?.len();
        let ranges = build_range_keys(&tags, include_unreleased);
        debug!(ranges = ranges.len(), untagged, "preflight");
        Ok(Preflight {
            ranges,
            untagged_commits: untagged,
        })
    }

    /// Starts a run. Nothing is generated until the returned iterator is advanced.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed or, for a rebuild, if stored
    /// progress cannot be cleared.
    pub fn run(
        &self,
        changelog: ChangelogDocument,
        options: GenerateOptions,
    ) -> Result<ChangelogRun<'_, H, S, P>> {
        let _entered = self.span.enter();
        let resolver = CommitRangeResolver::new(&self.history)?;
        let keys = build_range_keys(resolver.tags(), options.include_unreleased);

        let progress = if options.rebuild {
            info!("rebuilding changelog progress from scratch");
            self.store.clear()?;
            ProgressMap::new()
        } else {
            self.store.load()
        };

        info!(ranges = keys.len(), stored = progress.len(), "starting changelog run");

        Ok(ChangelogRun {
            resolver,
            summarizer: &self.summarizer,
            store: &self.store,
            span: self.span.clone(),
            changelog,
            keys: keys.into_iter(),
            progress,
            options,
            auto: false,
            state: RunState::Running,
        })
    }

    /// Status of every range, without generating anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed.
    pub fn statuses(
        &self,
        changelog: &ChangelogDocument,
        include_unreleased: bool,
    ) -> Result<Vec<(ChangelogRangeKey, RangeStatus)>> {
        let _entered = self.span.enter();
        let tags = self.history.tags()?;
        let progress = self.store.load();

        Ok(build_range_keys(&tags, include_unreleased)
            .into_iter()
            .map(|key| {
                let status = if is_documented(changelog, &key) {
                    RangeStatus::Documented
                } else {
                    match progress.get(&key) {
                        Some(ProgressContent::Generated(_)) => RangeStatus::Generated,
                        Some(ProgressContent::NoChanges) => RangeStatus::NoChanges,
                        None => RangeStatus::Pending,
                    }
                };
                (key, status)
            })
            .collect())
    }

    /// Resolves an arbitrary range and formats its raw changelog text.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed.
    pub fn preview(&self, key: &ChangelogRangeKey) -> Result<RangePreview> {
        let _entered = self.span.enter();
        let resolver = CommitRangeResolver::new(&self.history)?;
        let commits = resolver.resolve(&key.from, &key.to);
        let raw_changelog = format_raw_commits(&commits);
        Ok(RangePreview {
            commits,
            raw_changelog,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    SkippingRest,
    Aborted,
}

/// A pull-based changelog run: each `next` processes one range.
///
/// After a [`RangeStep::Generated`] outcome the caller decides how to proceed
/// and reports it with [`ChangelogRun::apply`]; not calling it means continue.
pub struct ChangelogRun<'a, H, S, P> {
    resolver: CommitRangeResolver<'a, H>,
    summarizer: &'a S,
    store: &'a P,
    span: Span,
    changelog: ChangelogDocument,
    keys: std::vec::IntoIter<ChangelogRangeKey>,
    progress: ProgressMap,
    options: GenerateOptions,
    auto: bool,
    state: RunState,
}

impl<H, S, P> ChangelogRun<'_, H, S, P>
where
    H: HistoryProvider,
    S: Summarizer,
    P: ProgressStore,
{
    pub fn apply(&mut self, control: RunControl) {
        debug!(?control, "operator decision");
        match control {
            RunControl::Continue => {}
            RunControl::AutoAll => self.auto = true,
            RunControl::SkipRest => self.state = RunState::SkippingRest,
            RunControl::Abort => self.state = RunState::Aborted,
        }
    }

    /// Whether the operator should be asked before the next range.
    #[must_use]
    pub fn wants_control(&self, outcome: &RangeOutcome) -> bool {
        !self.auto
            && self.state == RunState::Running
            && matches!(outcome.step, RangeStep::Generated { .. })
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    fn process(&mut self, key: &ChangelogRangeKey) -> Result<RangeStep> {
        if !self.options.rebuild {
            if is_documented(&self.changelog, key) {
                debug!(range = %key, "already documented");
                return Ok(RangeStep::Skipped(SkipReason::AlreadyDocumented));
            }
            if matches!(self.progress.get(key), Some(ProgressContent::Generated(_))) {
                debug!(range = %key, "already generated");
                return Ok(RangeStep::Skipped(SkipReason::AlreadyGenerated));
            }
        }

        let commits = self.resolver.resolve(&key.from, &key.to);
        if commits.is_empty() {
            info!(range = %key, "no changes");
            self.progress.insert(key.clone(), ProgressContent::NoChanges);
            self.store.save(&self.progress)?;
            return Ok(RangeStep::NoChanges);
        }

        let raw = format_raw_commits(&commits);
        let input = truncate_chars(&raw, self.options.max_input_chars);
        if input.len() < raw.len() {
            debug!(range = %key, chars = self.options.max_input_chars, "truncated raw changelog");
        }

        match self.summarizer.summarize(input) {
            Ok(content) => {
                info!(range = %key, commits = commits.len(), "generated range");
                self.progress
                    .insert(key.clone(), ProgressContent::Generated(content.clone()));
                self.store.save(&self.progress)?;
                Ok(RangeStep::Generated {
                    commit_count: commits.len(),
                    content,
                })
            }
            Err(e) => {
                warn!(range = %key, error = %e, "summary unavailable");
                Ok(RangeStep::SummaryUnavailable {
                    error: e.to_string(),
                })
            }
        }
    }
}

impl<H, S, P> Iterator for ChangelogRun<'_, H, S, P>
where
    H: HistoryProvider,
    S: Summarizer,
    P: ProgressStore,
{
    type Item = Result<RangeOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == RunState::Aborted {
            return None;
        }
        let key = self.keys.next()?;
        let span = self.span.clone();
        let _entered = span.enter();

        let step = if self.state == RunState::SkippingRest {
            Ok(RangeStep::Skipped(SkipReason::StoppedByOperator))
        } else {
            self.process(&key)
        };

        Some(step.map(|step| RangeOutcome { key, step }))
    }
}
