use crate::Result;

/// Turns the raw commit listing of one range into changelog prose.
pub trait Summarizer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no summary could be produced. Callers treat this as
    /// "no summary available" for the range, not as a fatal condition.
    fn summarize(&self, raw_changelog: &str) -> Result<String>;
}
