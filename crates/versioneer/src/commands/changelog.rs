use std::path::Path;

use tracing::info_span;
use versioneer_core::{ChangelogRangeKey, Marker};
use versioneer_operations::operations::{
    AssembleOperation, ChangelogRangeOrchestrator, GenerateOptions, RunControl,
};
use versioneer_operations::providers::{
    CommandSummarizer, FileSystemChangelog, FileSystemProgressStore, Git2Provider,
    PassthroughSummarizer,
};
use versioneer_operations::traits::{ChangelogStore, ProgressStore, Summarizer};
use versioneer_project::{Project, discover_project};

use super::{ChangelogCommand, GenerateArgs, RangeArgs, RangesArgs};
use crate::environment::require_interactive;
use crate::error::Result;
use crate::interaction;
use crate::output::{OutputFormatter, PlainTextFormatter};

/// The external command from `.versioneer.toml`, or the raw listing when none is set.
enum ConfiguredSummarizer {
    Command(CommandSummarizer),
    Passthrough(PassthroughSummarizer),
}

impl ConfiguredSummarizer {
    fn for_project(project: &Project) -> Self {
        project
            .config
            .summarizer()
            .command()
            .and_then(CommandSummarizer::new)
            .map_or(Self::Passthrough(PassthroughSummarizer), Self::Command)
    }
}

impl Summarizer for ConfiguredSummarizer {
    fn summarize(&self, raw_changelog: &str) -> versioneer_operations::Result<String> {
        match self {
            Self::Command(summarizer) => summarizer.summarize(raw_changelog),
            Self::Passthrough(summarizer) => summarizer.summarize(raw_changelog),
        }
    }
}

pub(crate) fn run(command: ChangelogCommand, start_path: &Path) -> Result<()> {
    let project = discover_project(start_path)?;
    let history = Git2Provider::new(&project.root);
    let span = info_span!("changelog", root = %project.root.display());
    let store = FileSystemProgressStore::new(&history.git_dir()?, span.clone());

    match command {
        ChangelogCommand::Generate(args) => {
            let summarizer = ConfiguredSummarizer::for_project(&project);
            let orchestrator = ChangelogRangeOrchestrator::new(history, summarizer, store, span);
            run_generate(&orchestrator, &project, &args)
        }
        ChangelogCommand::Save => {
            let operation = AssembleOperation::new(history, store, FileSystemChangelog::new());
            let today = chrono::Local::now().date_naive();
            let saved = operation.execute(&project.changelog_path(), today)?;
            print!("{}", PlainTextFormatter.format_saved(&saved));
            Ok(())
        }
        ChangelogCommand::Ranges(args) => {
            let orchestrator =
                ChangelogRangeOrchestrator::new(history, PassthroughSummarizer, store, span);
            run_ranges(&orchestrator, &project, &args)
        }
        ChangelogCommand::Clear => {
            store.clear()?;
            println!("Cleared changelog progress at {}", store.path().display());
            Ok(())
        }
        ChangelogCommand::Range(args) => {
            let orchestrator =
                ChangelogRangeOrchestrator::new(history, PassthroughSummarizer, store, span);
            run_range(&orchestrator, args)
        }
    }
}

fn run_generate(
    orchestrator: &ChangelogRangeOrchestrator<
        Git2Provider,
        ConfiguredSummarizer,
        FileSystemProgressStore,
    >,
    project: &Project,
    args: &GenerateArgs,
) -> Result<()> {
    if !args.auto {
        require_interactive("--auto")?;
    }

    let preflight = orchestrator.preflight(args.include_unreleased)?;
    if let Some(warning) = PlainTextFormatter.format_preflight(&preflight) {
        eprint!("{warning}");
    }

    let document = FileSystemChangelog::new().read(&project.changelog_path())?;
    let options = GenerateOptions {
        rebuild: args.rebuild,
        include_unreleased: args.include_unreleased,
        max_input_chars: project.config.summarizer().max_input_chars(),
    };

    let mut run = orchestrator.run(document, options)?;
    if args.auto {
        run.apply(RunControl::AutoAll);
    }

    let mut aborted = false;
    while let Some(outcome) = run.next() {
        let outcome = outcome?;
        print!("{}", PlainTextFormatter.format_range_outcome(&outcome));

        if run.wants_control(&outcome) && run.remaining() > 0 {
            let control = interaction::select_run_control(&outcome.key, run.remaining())?;
            aborted = control == RunControl::Abort;
            run.apply(control);
        }
    }

    if aborted {
        println!("Aborted; generated ranges are kept.");
    }
    println!("Run `versioneer changelog save` to write the changelog.");

    Ok(())
}

fn run_ranges(
    orchestrator: &ChangelogRangeOrchestrator<
        Git2Provider,
        PassthroughSummarizer,
        FileSystemProgressStore,
    >,
    project: &Project,
    args: &RangesArgs,
) -> Result<()> {
    let document = FileSystemChangelog::new().read(&project.changelog_path())?;
    let statuses = orchestrator.statuses(&document, args.include_unreleased)?;

    print!("{}", PlainTextFormatter.format_statuses(&statuses));

    Ok(())
}

fn run_range(
    orchestrator: &ChangelogRangeOrchestrator<
        Git2Provider,
        PassthroughSummarizer,
        FileSystemProgressStore,
    >,
    args: RangeArgs,
) -> Result<()> {
    let key = ChangelogRangeKey::new(
        Marker::from(args.from.as_str()),
        Marker::from(args.to.as_str()),
    );
    let preview = orchestrator.preview(&key)?;

    print!("{}", PlainTextFormatter.format_preview(&key, &preview));

    Ok(())
}
