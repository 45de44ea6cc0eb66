/// Classification for retry policy.
///
/// Used by the engine to decide what to do after a failed attempt.
///
/// # Behavior Summary
///
/// | Class | Retry same provider? | Try next provider? |
/// |-------|---------------------|--------------------|
/// | `SameProvider` | Yes, while attempts remain | Yes, once exhausted |
/// | `NextProvider` | No | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient failure (timeout). Retry against the same endpoint after
    /// the configured delay, then move on when the attempt budget is spent.
    SameProvider,

    /// Retrying the same endpoint won't help (connection refused, bad
    /// status, unparseable body). Move on to the next provider immediately.
    NextProvider,
}
