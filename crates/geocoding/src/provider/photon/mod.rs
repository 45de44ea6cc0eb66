//! Photon (komoot) geocoding provider.
//!
//! `GET /api/?q=<address>&limit=1` returns a GeoJSON FeatureCollection.
//! GeoJSON positions are `[longitude, latitude]`, so the pair is swapped
//! before it becomes a [`Coordinate`].

mod models;

use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};

use crate::errors::GeocodingError;
use crate::models::{Candidate, Coordinate};
use crate::provider::{GeocodingProvider, ProviderEndpoint};

use models::{Feature, FeatureCollection};

pub const PROVIDER_ID: &str = "PHOTON";
pub const DEFAULT_BASE_URL: &str = "https://photon.komoot.io";
pub const DEFAULT_USER_AGENT: &str = "MiMapa-Geocoder/1.0 (photon)";

/// Secondary provider: Photon, an OpenStreetMap-based search-as-you-type
/// geocoder without API keys.
pub struct PhotonProvider {
    endpoint: ProviderEndpoint,
}

impl PhotonProvider {
    pub fn new(endpoint: ProviderEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &ProviderEndpoint {
        &self.endpoint
    }
}

impl Default for PhotonProvider {
    fn default() -> Self {
        Self::new(ProviderEndpoint::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT))
    }
}

impl GeocodingProvider for PhotonProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn build_request(&self, client: &Client, address: &str) -> RequestBuilder {
        client
            .get(self.endpoint.url("api/"))
            .query(&[("q", address), ("limit", "1")])
            .header(USER_AGENT, self.endpoint.user_agent())
    }

    fn parse_candidate(&self, body: &str) -> Result<Option<Candidate>, GeocodingError> {
        let collection: FeatureCollection = serde_json::from_str(body)
            .map_err(|e| GeocodingError::malformed(PROVIDER_ID, e.to_string()))?;

        let Some(first) = collection.features.into_iter().next() else {
            return Ok(None);
        };

        let feature: Feature = serde_json::from_value(first)
            .map_err(|e| GeocodingError::malformed(PROVIDER_ID, e.to_string()))?;

        let (longitude, latitude) = match feature.geometry.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            other => {
                return Err(GeocodingError::malformed(
                    PROVIDER_ID,
                    format!("expected [lon, lat], got {} values", other.len()),
                ))
            }
        };

        let coordinate = Coordinate::new(latitude, longitude)?;
        Ok(Some(Candidate::new(
            coordinate,
            feature.properties.display_name(),
        )))
    }
}
