//! geocode.maps.co provider.
//!
//! A hosted Nominatim mirror that requires an API key. Requests and
//! responses follow the Nominatim `/search` format.

use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};

use crate::errors::GeocodingError;
use crate::models::Candidate;
use crate::provider::nominatim::parse_place_list;
use crate::provider::{GeocodingProvider, ProviderEndpoint};

pub const PROVIDER_ID: &str = "MAPSCO";
pub const DEFAULT_BASE_URL: &str = "https://geocode.maps.co";
pub const DEFAULT_USER_AGENT: &str = "MiMapa-Geocoder/1.0 (mapsco)";

/// Optional tertiary provider, enabled when an API key is configured.
pub struct MapsCoProvider {
    endpoint: ProviderEndpoint,
    api_key: String,
}

impl MapsCoProvider {
    pub fn new(endpoint: ProviderEndpoint, api_key: String) -> Self {
        Self { endpoint, api_key }
    }

    /// Provider against the public endpoint with the default `User-Agent`.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(
            ProviderEndpoint::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT),
            api_key,
        )
    }

    pub fn endpoint(&self) -> &ProviderEndpoint {
        &self.endpoint
    }
}

impl GeocodingProvider for MapsCoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn build_request(&self, client: &Client, address: &str) -> RequestBuilder {
        client
            .get(self.endpoint.url("search"))
            .query(&[
                ("q", address),
                ("api_key", self.api_key.as_str()),
                ("limit", "1"),
            ])
            .header(USER_AGENT, self.endpoint.user_agent())
    }

    fn parse_candidate(&self, body: &str) -> Result<Option<Candidate>, GeocodingError> {
        parse_place_list(PROVIDER_ID, body)
    }
}
