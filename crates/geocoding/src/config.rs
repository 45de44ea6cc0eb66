//! Deployment configuration for the geocoding engine.
//!
//! Everything the engine needs is read from environment variables (with an
//! optional `.env` file); nothing is hardcoded beyond the defaults below.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::engine::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::errors::ConfigError;
use crate::provider::mapsco::{self, MapsCoProvider};
use crate::provider::nominatim::{self, NominatimProvider};
use crate::provider::photon::{self, PhotonProvider};
use crate::provider::{GeocodingProvider, ProviderEndpoint};
use crate::transport::TransportConfig;

pub const ENV_MAX_ATTEMPTS: &str = "GEOCODER_MAX_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "GEOCODER_RETRY_DELAY_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "GEOCODER_REQUEST_TIMEOUT_MS";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "GEOCODER_CONNECT_TIMEOUT_MS";
pub const ENV_POOL_MAX_IDLE_PER_HOST: &str = "GEOCODER_POOL_MAX_IDLE_PER_HOST";
pub const ENV_POOL_IDLE_TIMEOUT_MS: &str = "GEOCODER_POOL_IDLE_TIMEOUT_MS";
pub const ENV_PROVIDERS: &str = "GEOCODER_PROVIDERS";
pub const ENV_NOMINATIM_URL: &str = "GEOCODER_NOMINATIM_URL";
pub const ENV_NOMINATIM_USER_AGENT: &str = "GEOCODER_NOMINATIM_USER_AGENT";
pub const ENV_PHOTON_URL: &str = "GEOCODER_PHOTON_URL";
pub const ENV_PHOTON_USER_AGENT: &str = "GEOCODER_PHOTON_USER_AGENT";
pub const ENV_MAPSCO_URL: &str = "GEOCODER_MAPSCO_URL";
pub const ENV_MAPSCO_USER_AGENT: &str = "GEOCODER_MAPSCO_USER_AGENT";
pub const ENV_MAPSCO_API_KEY: &str = "GEOCODER_MAPSCO_API_KEY";

const DEFAULT_PROVIDER_ORDER: &str = "nominatim,photon,mapsco";

/// One entry of the provider cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderConfig {
    Nominatim(ProviderEndpoint),
    Photon(ProviderEndpoint),
    MapsCo {
        endpoint: ProviderEndpoint,
        api_key: String,
    },
}

impl ProviderConfig {
    pub fn build(&self) -> Arc<dyn GeocodingProvider> {
        match self {
            Self::Nominatim(endpoint) => Arc::new(NominatimProvider::new(endpoint.clone())),
            Self::Photon(endpoint) => Arc::new(PhotonProvider::new(endpoint.clone())),
            Self::MapsCo { endpoint, api_key } => {
                Arc::new(MapsCoProvider::new(endpoint.clone(), api_key.clone()))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nominatim(_) => "nominatim",
            Self::Photon(_) => "photon",
            Self::MapsCo { .. } => "mapsco",
        }
    }
}

pub struct GeocoderConfig {
    /// Providers in cascade order
    pub providers: Vec<ProviderConfig>,
    pub transport: TransportConfig,
    pub retry_policy: RetryPolicy,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderConfig::Nominatim(ProviderEndpoint::new(
                    nominatim::DEFAULT_BASE_URL,
                    nominatim::DEFAULT_USER_AGENT,
                )),
                ProviderConfig::Photon(ProviderEndpoint::new(
                    photon::DEFAULT_BASE_URL,
                    photon::DEFAULT_USER_AGENT,
                )),
            ],
            transport: TransportConfig::default(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl GeocoderConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_attempts = parse_number(&get, ENV_MAX_ATTEMPTS, DEFAULT_MAX_ATTEMPTS as u64)?;
        if max_attempts == 0 || max_attempts > u32::MAX as u64 {
            return Err(ConfigError::InvalidValue {
                key: ENV_MAX_ATTEMPTS,
                value: max_attempts.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let retry_delay = parse_millis(&get, ENV_RETRY_DELAY_MS, DEFAULT_RETRY_DELAY)?;
        let retry_policy = RetryPolicy::new(max_attempts as u32, retry_delay);

        let defaults = TransportConfig::default();
        let transport = TransportConfig {
            request_timeout: parse_millis(&get, ENV_REQUEST_TIMEOUT_MS, defaults.request_timeout)?,
            connect_timeout: parse_millis(&get, ENV_CONNECT_TIMEOUT_MS, defaults.connect_timeout)?,
            pool_max_idle_per_host: parse_number(
                &get,
                ENV_POOL_MAX_IDLE_PER_HOST,
                defaults.pool_max_idle_per_host as u64,
            )? as usize,
            pool_idle_timeout: parse_millis(
                &get,
                ENV_POOL_IDLE_TIMEOUT_MS,
                defaults.pool_idle_timeout,
            )?,
        };

        let explicit_order = get(ENV_PROVIDERS);
        let order_is_explicit = explicit_order.is_some();
        let order = explicit_order.unwrap_or_else(|| DEFAULT_PROVIDER_ORDER.to_string());
        let mut providers: Vec<ProviderConfig> = Vec::new();
        let mut seen: Vec<String> = Vec::new();

        for name in order
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
        {
            if seen.contains(&name) {
                return Err(ConfigError::DuplicateProvider(name));
            }
            seen.push(name.clone());

            let provider = match name.as_str() {
                "nominatim" => ProviderConfig::Nominatim(parse_endpoint(
                    &get,
                    ENV_NOMINATIM_URL,
                    nominatim::DEFAULT_BASE_URL,
                    ENV_NOMINATIM_USER_AGENT,
                    nominatim::DEFAULT_USER_AGENT,
                )?),
                "photon" => ProviderConfig::Photon(parse_endpoint(
                    &get,
                    ENV_PHOTON_URL,
                    photon::DEFAULT_BASE_URL,
                    ENV_PHOTON_USER_AGENT,
                    photon::DEFAULT_USER_AGENT,
                )?),
                "mapsco" => {
                    let endpoint = parse_endpoint(
                        &get,
                        ENV_MAPSCO_URL,
                        mapsco::DEFAULT_BASE_URL,
                        ENV_MAPSCO_USER_AGENT,
                        mapsco::DEFAULT_USER_AGENT,
                    )?;
                    match get(ENV_MAPSCO_API_KEY) {
                        Some(api_key) => ProviderConfig::MapsCo { endpoint, api_key },
                        None => {
                            if order_is_explicit {
                                warn!("{ENV_MAPSCO_API_KEY} not set; mapsco provider disabled");
                            } else {
                                debug!("{ENV_MAPSCO_API_KEY} not set; mapsco provider disabled");
                            }
                            continue;
                        }
                    }
                }
                _ => return Err(ConfigError::UnknownProvider(name)),
            };
            providers.push(provider);
        }

        if providers.is_empty() {
            warn!("Geocoding configuration lists no usable providers");
        }

        Ok(Self {
            providers,
            transport,
            retry_policy,
        })
    }

    /// Instantiate the configured providers, in cascade order.
    pub fn build_providers(&self) -> Vec<Arc<dyn GeocodingProvider>> {
        self.providers.iter().map(ProviderConfig::build).collect()
    }
}

fn parse_number<G>(get: &G, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidValue {
                key,
                value,
                reason: e.to_string(),
            }
        }),
    }
}

fn parse_millis<G>(get: &G, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    parse_number(get, key, default.as_millis() as u64).map(Duration::from_millis)
}

fn parse_endpoint<G>(
    get: &G,
    url_key: &'static str,
    default_url: &str,
    agent_key: &str,
    default_agent: &str,
) -> Result<ProviderEndpoint, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let user_agent = get(agent_key).unwrap_or_else(|| default_agent.to_string());
    match get(url_key) {
        None => Ok(ProviderEndpoint::new(default_url, user_agent)),
        Some(url) => {
            ProviderEndpoint::parse(&url, user_agent).map_err(|e| ConfigError::InvalidValue {
                key: url_key,
                value: url,
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<GeocoderConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GeocoderConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.retry_policy.max_attempts(), 3);
        assert_eq!(cfg.retry_policy.retry_delay(), Duration::from_secs(1));
        assert_eq!(cfg.transport.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.transport.connect_timeout, Duration::from_secs(5));

        // mapsco needs an API key, so the default cascade has two providers
        let names: Vec<_> = cfg.providers.iter().map(ProviderConfig::name).collect();
        assert_eq!(names, vec!["nominatim", "photon"]);
    }

    #[test]
    fn test_mapsco_enabled_with_api_key() {
        let cfg = load(&[(ENV_MAPSCO_API_KEY, "abc123")]).unwrap();
        assert_eq!(cfg.providers.len(), 3);
        match &cfg.providers[2] {
            ProviderConfig::MapsCo { endpoint, api_key } => {
                assert_eq!(api_key, "abc123");
                assert_eq!(endpoint.base_url(), mapsco::DEFAULT_BASE_URL);
                assert_eq!(endpoint.user_agent(), mapsco::DEFAULT_USER_AGENT);
            }
            other => panic!("expected mapsco, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_order_and_endpoints() {
        let cfg = load(&[
            (ENV_PROVIDERS, " Photon , nominatim "),
            (ENV_PHOTON_URL, "http://localhost:2322"),
            (ENV_NOMINATIM_USER_AGENT, "my-app/2.0"),
            (ENV_MAX_ATTEMPTS, "2"),
            (ENV_RETRY_DELAY_MS, "250"),
            (ENV_REQUEST_TIMEOUT_MS, "1500"),
        ])
        .unwrap();

        let names: Vec<_> = cfg.providers.iter().map(ProviderConfig::name).collect();
        assert_eq!(names, vec!["photon", "nominatim"]);
        match &cfg.providers[0] {
            ProviderConfig::Photon(endpoint) => {
                assert_eq!(endpoint.base_url(), "http://localhost:2322/")
            }
            other => panic!("expected photon, got {other:?}"),
        }
        match &cfg.providers[1] {
            ProviderConfig::Nominatim(endpoint) => assert_eq!(endpoint.user_agent(), "my-app/2.0"),
            other => panic!("expected nominatim, got {other:?}"),
        }
        assert_eq!(cfg.retry_policy.max_attempts(), 2);
        assert_eq!(cfg.retry_policy.retry_delay(), Duration::from_millis(250));
        assert_eq!(cfg.transport.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = load(&[(ENV_MAX_ATTEMPTS, "  "), (ENV_PROVIDERS, "")]).unwrap();
        assert_eq!(cfg.retry_policy.max_attempts(), 3);
        assert_eq!(cfg.providers.len(), 2);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = load(&[(ENV_MAX_ATTEMPTS, "0")]).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_MAX_ATTEMPTS,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_number_rejected() {
        let err = load(&[(ENV_REQUEST_TIMEOUT_MS, "ten")]).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_REQUEST_TIMEOUT_MS,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = load(&[(ENV_NOMINATIM_URL, "nominatim.local")]).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_NOMINATIM_URL,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = load(&[(ENV_PROVIDERS, "nominatim,google")]).err().unwrap();
        assert!(matches!(err, ConfigError::UnknownProvider(name) if name == "google"));
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let err = load(&[(ENV_PROVIDERS, "photon,PHOTON")]).err().unwrap();
        assert!(matches!(err, ConfigError::DuplicateProvider(name) if name == "photon"));
    }

    #[test]
    fn test_build_providers_keeps_order() {
        let cfg = load(&[
            (ENV_PROVIDERS, "mapsco,photon,nominatim"),
            (ENV_MAPSCO_API_KEY, "k"),
        ])
        .unwrap();
        let ids: Vec<_> = cfg.build_providers().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["MAPSCO", "PHOTON", "NOMINATIM"]);
    }
}
