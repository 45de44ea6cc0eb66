//! Error types and retry classification for the geocoding crate.
//!
//! This module provides:
//! - [`GeocodingError`]: Failure of a single provider attempt
//! - [`RetryClass`]: Classification for determining retry behavior
//! - [`ConfigError`]: Invalid deployment configuration

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during one attempt against one provider.
///
/// None of these reach callers of `resolve`; the engine classifies each
/// one via [`retry_class`](Self::retry_class) and keeps cascading.
#[derive(Error, Debug)]
pub enum GeocodingError {
    /// The request did not complete within the per-request timeout.
    /// The only transient failure: retried against the same provider.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The connection could not be established (refused, DNS, TLS).
    #[error("Connection failed: {provider} - {message}")]
    Connection {
        provider: String,
        message: String,
    },

    /// The provider answered with a status other than 200.
    #[error("Unexpected status from {provider}: {status}")]
    UnexpectedStatus {
        provider: String,
        status: u16,
    },

    /// The body could not be decoded into the provider's response shape.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        provider: String,
        message: String,
    },

    /// The provider returned numbers outside the valid degree ranges.
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Any other transport failure (redirect loop, body read error, ...).
    #[error("Request to {provider} failed: {message}")]
    Request {
        provider: String,
        message: String,
    },

    /// The shared HTTP client could not be built.
    #[error("HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GeocodingError {
    /// Classify a transport error returned by `reqwest` for `provider`.
    pub fn from_transport(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else if err.is_connect() {
            Self::Connection {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::MalformedResponse {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Request {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }

    pub fn malformed(provider: &str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mimapa_geocoding::errors::{GeocodingError, RetryClass};
    ///
    /// let error = GeocodingError::Timeout { provider: "NOMINATIM".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::SameProvider);
    ///
    /// let error = GeocodingError::UnexpectedStatus { provider: "PHOTON".to_string(), status: 503 };
    /// assert_eq!(error.retry_class(), RetryClass::NextProvider);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Timeout { .. } => RetryClass::SameProvider,

            Self::Connection { .. }
            | Self::UnexpectedStatus { .. }
            | Self::MalformedResponse { .. }
            | Self::InvalidCoordinate { .. }
            | Self::Request { .. }
            | Self::Client(_) => RetryClass::NextProvider,
        }
    }
}

/// Errors raised while loading [`GeocoderConfig`](crate::config::GeocoderConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown geocoding provider '{0}'")]
    UnknownProvider(String),

    #[error("Geocoding provider '{0}' listed more than once")]
    DuplicateProvider(String),
}
