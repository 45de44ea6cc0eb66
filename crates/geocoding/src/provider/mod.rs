//! Geocoding provider abstractions and implementations.
//!
//! This module contains:
//! - The `GeocodingProvider` trait that all providers implement
//! - `ProviderEndpoint`, the base URL and client identification of a provider
//! - The shared call path used for every provider attempt
//! - Concrete providers (Nominatim, Photon, geocode.maps.co)
//!
//! # Coordinate order
//!
//! Nominatim and geocode.maps.co answer with `lat`/`lon` fields. Photon
//! answers with GeoJSON, where `geometry.coordinates` is `[lon, lat]`.
//! Every provider normalizes to (latitude, longitude) before handing a
//! [`Candidate`] back.

mod endpoint;
mod traits;

pub mod mapsco;
pub mod nominatim;
pub mod photon;

pub use endpoint::ProviderEndpoint;
pub use traits::GeocodingProvider;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::trace;

use crate::errors::GeocodingError;
use crate::models::Candidate;

/// Perform one attempt against `provider`.
///
/// Returns `Ok(None)` for a confirmed "no match". Transport failures are
/// classified into [`GeocodingError::Timeout`], [`GeocodingError::Connection`]
/// or [`GeocodingError::Request`]; any status other than 200 is
/// [`GeocodingError::UnexpectedStatus`].
pub async fn fetch_candidate(
    provider: &dyn GeocodingProvider,
    client: &Client,
    address: &str,
) -> Result<Option<Candidate>, GeocodingError> {
    let provider_id = provider.id();

    let response = provider
        .build_request(client, address)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| GeocodingError::from_transport(provider_id, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(GeocodingError::UnexpectedStatus {
            provider: provider_id.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| GeocodingError::from_transport(provider_id, e))?;

    trace!(provider = provider_id, bytes = body.len(), "Received response body");

    provider.parse_candidate(&body)
}
