use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::Summarizer;

/// Runs an external program with the raw changelog on stdin and takes its stdout as the summary.
pub struct CommandSummarizer {
    program: String,
    args: Vec<String>,
}

impl CommandSummarizer {
    /// Returns `None` for an empty argv.
    #[must_use]
    pub fn new(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Summarizer for CommandSummarizer {
    fn summarize(&self, raw_changelog: &str) -> Result<String> {
        debug!(program = %self.program, input_len = raw_changelog.len(), "running summarizer");

        let spawn_error = |source| OperationError::SummarizerSpawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin from its own thread so a program that streams output while
        // reading cannot fill both pipes and stall.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(raw_changelog.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (output, writer.join())
        });

        // A program may exit without consuming its input; its status decides the outcome.
        match written {
            Ok(Err(e)) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                return Err(spawn_error(e));
            }
            _ => {}
        }

        let output = output.map_err(spawn_error)?;
        if !output.status.success() {
            return Err(OperationError::SummarizerFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let summary = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if summary.is_empty() {
            return Err(OperationError::EmptySummary);
        }
        Ok(summary)
    }
}

/// Uses the raw grouped commit listing as the changelog text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughSummarizer;

impl Summarizer for PassthroughSummarizer {
    fn summarize(&self, raw_changelog: &str) -> Result<String> {
        let text = raw_changelog.trim();
        if text.is_empty() {
            return Err(OperationError::EmptySummary);
        }
        Ok(text.to_string())
    }
}
