//! Shared HTTP transport.
//!
//! One pooled [`reqwest::Client`] serves every provider and every
//! concurrent `resolve` call. It is configured once and never mutated.

use std::time::Duration;

use reqwest::Client;

use crate::errors::GeocodingError;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default TCP/TLS connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client settings shared by all providers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound for one attempt, from connect to the last body byte.
    pub request_timeout: Duration,

    /// Upper bound for establishing the connection.
    pub connect_timeout: Duration,

    /// Idle keep-alive connections kept per provider host.
    pub pool_max_idle_per_host: usize,

    /// How long an idle pooled connection is kept.
    pub pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_max_idle_per_host: 8,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl TransportConfig {
    /// Build the shared client.
    pub fn build_client(&self) -> Result<Client, GeocodingError> {
        Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout)
            .build()
            .map_err(GeocodingError::Client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transport() {
        let config = TransportConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_max_idle_per_host, 8);
    }

    #[test]
    fn test_build_client() {
        assert!(TransportConfig::default().build_client().is_ok());
    }
}
