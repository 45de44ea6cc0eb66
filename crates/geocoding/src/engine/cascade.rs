//! Geocoding engine for cascading over providers.
//!
//! The engine tries providers in order and returns the first candidate:
//! - Timeouts are retried against the same provider, up to the policy bound
//! - Empty results, connection failures and bad responses skip straight to
//!   the next provider
//! - When every provider is exhausted the address is `NotFound`

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::attempt::{AttemptOutcome, ProviderAttempt, ResolutionDiagnostics};
use super::decision::{next_step, Step};
use super::resolver::AddressResolver;
use super::retry_policy::RetryPolicy;
use crate::config::GeocoderConfig;
use crate::errors::GeocodingError;
use crate::models::{FailureReason, GeocodedLocation, ResolutionOutcome};
use crate::provider::{fetch_candidate, GeocodingProvider};
use crate::transport::TransportConfig;

/// Resolves addresses by cascading over an ordered list of providers.
///
/// Holds no per-call state: the provider list, retry policy and pooled HTTP
/// client are fixed at construction, so one engine can be shared behind an
/// `Arc` and used from any number of tasks at once.
pub struct GeocodingEngine {
    providers: Vec<Arc<dyn GeocodingProvider>>,
    client: Client,
    retry_policy: RetryPolicy,
}

impl GeocodingEngine {
    /// Create an engine with its own HTTP client.
    ///
    /// # Arguments
    ///
    /// * `providers` - Providers in priority order (first is tried first)
    /// * `transport` - Timeouts and pool limits for the shared client
    /// * `retry_policy` - Attempt bound and delay for timeouts
    pub fn new(
        providers: Vec<Arc<dyn GeocodingProvider>>,
        transport: &TransportConfig,
        retry_policy: RetryPolicy,
    ) -> Result<Self, GeocodingError> {
        let client = transport.build_client()?;
        Ok(Self::with_client(providers, client, retry_policy))
    }

    /// Create an engine around an existing client.
    pub fn with_client(
        providers: Vec<Arc<dyn GeocodingProvider>>,
        client: Client,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            providers,
            client,
            retry_policy,
        }
    }

    /// Build the providers, transport and policy described by `config`.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, GeocodingError> {
        Self::new(
            config.build_providers(),
            &config.transport,
            config.retry_policy.clone(),
        )
    }

    /// Get the list of registered providers, in cascade order.
    pub fn providers(&self) -> &[Arc<dyn GeocodingProvider>] {
        &self.providers
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Resolve a free-text address to a coordinate.
    ///
    /// Each attempt is bounded by the transport's request timeout, but the
    /// cascade as a whole has no deadline. Callers that need one should wrap
    /// the call in `tokio::time::timeout`.
    pub async fn resolve(&self, address: &str) -> ResolutionOutcome {
        self.resolve_with_diagnostics(address).await.0
    }

    #[instrument(name = "resolve", level = "info", skip_all, fields(address = %address))]
    pub(crate) async fn resolve_with_diagnostics(
        &self,
        address: &str,
    ) -> (ResolutionOutcome, ResolutionDiagnostics) {
        let mut diagnostics = ResolutionDiagnostics::new();

        if self.providers.is_empty() {
            warn!("No geocoding providers configured");
            return (
                ResolutionOutcome::Failed(FailureReason::NoProvidersConfigured),
                diagnostics,
            );
        }

        let address = address.trim();
        let max_attempts = self.retry_policy.max_attempts();

        for provider in &self.providers {
            let provider_id = provider.id();
            let mut attempt = 1;

            loop {
                let started = Instant::now();
                let result = fetch_candidate(provider.as_ref(), &self.client, address).await;
                let elapsed = started.elapsed();

                let (outcome, candidate) = match result {
                    Ok(Some(candidate)) => (AttemptOutcome::Success, Some(candidate)),
                    Ok(None) => (AttemptOutcome::EmptyResult, None),
                    Err(e) => {
                        debug!(
                            provider = provider_id,
                            attempt,
                            retry_class = ?e.retry_class(),
                            error = %e,
                            "Geocoding attempt failed"
                        );
                        (AttemptOutcome::from_error(&e), None)
                    }
                };

                diagnostics.record(ProviderAttempt {
                    provider_id,
                    attempt,
                    elapsed,
                    outcome,
                });
                debug!(
                    provider = provider_id,
                    attempt,
                    outcome = %outcome,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Geocoding attempt finished"
                );

                match (next_step(outcome, attempt, max_attempts), candidate) {
                    (Step::Finish, Some(candidate)) => {
                        info!(
                            provider = provider_id,
                            latitude = candidate.coordinate.latitude(),
                            longitude = candidate.coordinate.longitude(),
                            "Resolved address. Diagnostics: {}",
                            diagnostics.summary()
                        );
                        let location = GeocodedLocation {
                            coordinate: candidate.coordinate,
                            display_name: candidate.display_name,
                            provider: Cow::Borrowed(provider_id),
                        };
                        return (ResolutionOutcome::Found(location), diagnostics);
                    }
                    (Step::Retry, _) => {
                        warn!(
                            provider = provider_id,
                            attempt,
                            max_attempts,
                            "Provider timed out, retrying in {:?}",
                            self.retry_policy.retry_delay()
                        );
                        tokio::time::sleep(self.retry_policy.retry_delay()).await;
                        attempt += 1;
                    }
                    _ => {
                        debug!(
                            provider = provider_id,
                            outcome = %outcome,
                            "Giving up on provider, trying next"
                        );
                        break;
                    }
                }
            }
        }

        warn!(
            attempts = diagnostics.len(),
            "No provider resolved address. Diagnostics: {}",
            diagnostics.summary()
        );
        (ResolutionOutcome::NotFound, diagnostics)
    }
}

#[async_trait]
impl AddressResolver for GeocodingEngine {
    async fn resolve(&self, address: &str) -> ResolutionOutcome {
        GeocodingEngine::resolve(self, address).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::provider::nominatim::NominatimProvider;
    use crate::provider::photon::PhotonProvider;
    use crate::provider::ProviderEndpoint;

    fn nominatim(server: &MockServer) -> Arc<dyn GeocodingProvider> {
        Arc::new(NominatimProvider::new(ProviderEndpoint::new(
            server.uri(),
            "test/nominatim",
        )))
    }

    fn photon(server: &MockServer) -> Arc<dyn GeocodingProvider> {
        Arc::new(PhotonProvider::new(ProviderEndpoint::new(
            server.uri(),
            "test/photon",
        )))
    }

    fn engine(providers: Vec<Arc<dyn GeocodingProvider>>, max_attempts: u32) -> GeocodingEngine {
        let transport = TransportConfig {
            request_timeout: Duration::from_millis(200),
            ..TransportConfig::default()
        };
        GeocodingEngine::new(
            providers,
            &transport,
            RetryPolicy::new(max_attempts, Duration::from_millis(10)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_no_providers_fails_without_attempts() {
        let engine = engine(Vec::new(), 3);
        let (outcome, diagnostics) = engine.resolve_with_diagnostics("anywhere").await;
        assert_eq!(
            outcome,
            ResolutionOutcome::Failed(FailureReason::NoProvidersConfigured)
        );
        assert_eq!(diagnostics.len(), 0);
    }

    #[tokio::test]
    async fn test_diagnostics_record_timeouts_then_success() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [{"geometry": {"coordinates": [2.0, 1.0]}}]
            })))
            .mount(&secondary)
            .await;

        let engine = engine(vec![nominatim(&primary), photon(&secondary)], 2);
        let (outcome, diagnostics) = engine.resolve_with_diagnostics("somewhere").await;

        assert_eq!(outcome.coordinate().unwrap().as_lat_lon(), (1.0, 2.0));
        let outcomes: Vec<_> = diagnostics
            .attempts()
            .iter()
            .map(|a| (a.provider_id, a.attempt, a.outcome))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("NOMINATIM", 1, AttemptOutcome::Timeout),
                ("NOMINATIM", 2, AttemptOutcome::Timeout),
                ("PHOTON", 1, AttemptOutcome::Success),
            ]
        );
    }

    #[tokio::test]
    async fn test_diagnostics_record_single_empty_attempt() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .mount(&secondary)
            .await;

        let engine = engine(vec![nominatim(&primary), photon(&secondary)], 3);
        let (outcome, diagnostics) = engine.resolve_with_diagnostics("nowhere").await;

        assert_eq!(outcome, ResolutionOutcome::NotFound);
        assert_eq!(diagnostics.attempts_for("NOMINATIM"), 1);
        assert_eq!(diagnostics.attempts_for("PHOTON"), 1);
        assert!(diagnostics
            .attempts()
            .iter()
            .all(|a| a.outcome == AttemptOutcome::EmptyResult));
    }
}
