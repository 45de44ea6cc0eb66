//! Per-attempt bookkeeping for one `resolve` call.
//!
//! Nothing here leaves the engine: the records exist for the duration of
//! the cascade and end up in log output only.

use std::fmt;
use std::time::Duration;

use crate::errors::{GeocodingError, RetryClass};

/// Classification of one attempt against one provider.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum AttemptOutcome {
    /// HTTP 200 with at least one candidate.
    Success,
    /// HTTP 200 with zero candidates; a confirmed "no match".
    EmptyResult,
    /// The per-request timeout elapsed.
    Timeout,
    /// Refused, DNS or TLS failure.
    ConnectionError,
    /// Unexpected status, malformed body, invalid coordinate, ...
    OtherError,
}

impl AttemptOutcome {
    pub fn from_error(error: &GeocodingError) -> Self {
        match error {
            GeocodingError::Timeout { .. } => Self::Timeout,
            GeocodingError::Connection { .. } => Self::ConnectionError,
            _ => Self::OtherError,
        }
    }

    /// How the cascade treats this outcome when it is a failure.
    pub fn retry_class(self) -> Option<RetryClass> {
        match self {
            Self::Success | Self::EmptyResult => None,
            Self::Timeout => Some(RetryClass::SameProvider),
            Self::ConnectionError | Self::OtherError => Some(RetryClass::NextProvider),
        }
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "SUCCESS",
            Self::EmptyResult => "EMPTY",
            Self::Timeout => "TIMEOUT",
            Self::ConnectionError => "CONNECTION_ERROR",
            Self::OtherError => "ERROR",
        };
        f.write_str(label)
    }
}

/// Record of a single provider attempt.
#[derive(Clone, Debug)]
pub(crate) struct ProviderAttempt {
    pub provider_id: &'static str,
    /// 1-based attempt index against this provider
    pub attempt: u32,
    pub elapsed: Duration,
    pub outcome: AttemptOutcome,
}

/// Every attempt made during one resolution, in order.
#[derive(Clone, Debug, Default)]
pub(crate) struct ResolutionDiagnostics {
    attempts: Vec<ProviderAttempt>,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record(&mut self, attempt: ProviderAttempt) {
        self.attempts.push(attempt);
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        if self.attempts.is_empty() {
            return "no attempts".to_string();
        }
        self.attempts
            .iter()
            .map(|a| {
                format!(
                    "{}#{}: {} ({}ms)",
                    a.provider_id,
                    a.attempt,
                    a.outcome,
                    a.elapsed.as_millis()
                )
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    #[cfg(test)]
    pub fn attempts(&self) -> &[ProviderAttempt] {
        &self.attempts
    }

    #[cfg(test)]
    pub fn attempts_for(&self, provider_id: &str) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.provider_id == provider_id)
            .count()
    }
}
