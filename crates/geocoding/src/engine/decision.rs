//! The cascade decision table.

use super::attempt::AttemptOutcome;
use crate::errors::RetryClass;

/// What the engine does after an attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// Return the candidate; no further providers or retries.
    Finish,
    /// Wait for the retry delay and call the same provider again.
    Retry,
    /// Abandon this provider and move to the next one.
    NextProvider,
}

/// Decide the next step from the outcome of attempt number `attempt`
/// (1-based) out of `max_attempts`.
pub(crate) fn next_step(outcome: AttemptOutcome, attempt: u32, max_attempts: u32) -> Step {
    match outcome {
        AttemptOutcome::Success => Step::Finish,
        AttemptOutcome::EmptyResult => Step::NextProvider,
        failure => match failure.retry_class() {
            Some(RetryClass::SameProvider) if attempt < max_attempts => Step::Retry,
            _ => Step::NextProvider,
        },
    }
}
