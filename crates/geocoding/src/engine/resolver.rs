use async_trait::async_trait;

use crate::models::ResolutionOutcome;

/// Inbound contract for code that needs addresses turned into coordinates.
///
/// Request handlers should depend on `Arc<dyn AddressResolver>` rather than
/// on [`GeocodingEngine`](super::GeocodingEngine) so tests can substitute a
/// fake.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve a free-text address. Never fails: every provider fault is
    /// folded into the returned outcome.
    async fn resolve(&self, address: &str) -> ResolutionOutcome;
}
