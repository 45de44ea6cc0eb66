//! Nominatim (OpenStreetMap) geocoding provider.
//!
//! `GET /search?q=<address>&format=json&limit=1` returns a JSON array of
//! places with `lat`/`lon` as decimal strings, already in
//! (latitude, longitude) order.
//!
//! Usage policy: https://operations.osmfoundation.org/policies/nominatim/
//! requires an identifying `User-Agent`.

mod models;

use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::errors::GeocodingError;
use crate::models::{Candidate, Coordinate};
use crate::provider::{GeocodingProvider, ProviderEndpoint};

use models::Place;

pub const PROVIDER_ID: &str = "NOMINATIM";
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "MiMapa-Geocoder/1.0 (nominatim)";

/// Primary provider: the public OpenStreetMap Nominatim instance (or a
/// self-hosted one).
pub struct NominatimProvider {
    endpoint: ProviderEndpoint,
}

impl NominatimProvider {
    pub fn new(endpoint: ProviderEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &ProviderEndpoint {
        &self.endpoint
    }
}

impl Default for NominatimProvider {
    fn default() -> Self {
        Self::new(ProviderEndpoint::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT))
    }
}

impl GeocodingProvider for NominatimProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn build_request(&self, client: &Client, address: &str) -> RequestBuilder {
        client
            .get(self.endpoint.url("search"))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, self.endpoint.user_agent())
    }

    fn parse_candidate(&self, body: &str) -> Result<Option<Candidate>, GeocodingError> {
        parse_place_list(PROVIDER_ID, body)
    }
}

/// Decode a Nominatim-style place array and normalize its first element.
///
/// Shared with other providers that mirror the Nominatim response format.
pub(crate) fn parse_place_list(
    provider_id: &str,
    body: &str,
) -> Result<Option<Candidate>, GeocodingError> {
    // Decoded as raw values so that later entries are never inspected.
    let places: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| GeocodingError::malformed(provider_id, e.to_string()))?;

    let Some(first) = places.into_iter().next() else {
        return Ok(None);
    };

    let place: Place = serde_json::from_value(first)
        .map_err(|e| GeocodingError::malformed(provider_id, e.to_string()))?;

    let latitude = place
        .lat
        .to_f64()
        .ok_or_else(|| GeocodingError::malformed(provider_id, "unparseable lat"))?;
    let longitude = place
        .lon
        .to_f64()
        .ok_or_else(|| GeocodingError::malformed(provider_id, "unparseable lon"))?;

    let coordinate = Coordinate::new(latitude, longitude)?;
    Ok(Some(Candidate::new(coordinate, place.display_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> NominatimProvider {
        NominatimProvider::new(
            ProviderEndpoint::parse("https://nominatim.test", "test-agent/1.0").unwrap(),
        )
    }

    #[test]
    fn test_provider_id() {
        assert_eq!(provider().id(), "NOMINATIM");
    }

    #[test]
    fn test_build_request() {
        let client = Client::new();
        let request = provider()
            .build_request(&client, "Calle Granada 46, Málaga")
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/search");
        let query: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("q".to_string(), "Calle Granada 46, Málaga".to_string())));
        assert!(query.contains(&("format".to_string(), "json".to_string())));
        assert!(query.contains(&("limit".to_string(), "1".to_string())));
        assert_eq!(
            request.headers().get(USER_AGENT).unwrap(),
            "test-agent/1.0"
        );
    }

    #[test]
    fn test_parse_first_place_keeps_lat_lon_order() {
        let body = r#"[
            {"lat": "36.7220033", "lon": "-4.4189788", "display_name": "Calle Granada, Málaga"},
            {"lat": "1.0", "lon": "2.0", "display_name": "Somewhere else"}
        ]"#;
        let candidate = provider().parse_candidate(body).unwrap().unwrap();
        assert_eq!(candidate.coordinate.latitude(), 36.7220033);
        assert_eq!(candidate.coordinate.longitude(), -4.4189788);
        assert_eq!(
            candidate.display_name.as_deref(),
            Some("Calle Granada, Málaga")
        );
    }

    #[test]
    fn test_parse_ignores_later_places() {
        let body = r#"[{"lat": "10", "lon": "20"}, {"garbage": true}]"#;
        let candidate = provider().parse_candidate(body).unwrap().unwrap();
        assert_eq!(candidate.coordinate.as_lat_lon(), (10.0, 20.0));
        assert_eq!(candidate.display_name, None);
    }

    #[test]
    fn test_parse_numeric_degrees() {
        let body = r#"[{"lat": 48.8566, "lon": 2.3522}]"#;
        let candidate = provider().parse_candidate(body).unwrap().unwrap();
        assert_eq!(candidate.coordinate.as_lat_lon(), (48.8566, 2.3522));
    }

    #[test]
    fn test_parse_empty_list() {
        assert_eq!(provider().parse_candidate("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_not_an_array() {
        let err = provider()
            .parse_candidate(r#"{"error": "Unable to geocode"}"#)
            .unwrap_err();
        assert!(matches!(err, GeocodingError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_unparseable_lat() {
        let err = provider()
            .parse_candidate(r#"[{"lat": "north", "lon": "1.0"}]"#)
            .unwrap_err();
        assert!(matches!(err, GeocodingError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_out_of_range() {
        let err = provider()
            .parse_candidate(r#"[{"lat": "95.0", "lon": "1.0"}]"#)
            .unwrap_err();
        assert!(matches!(err, GeocodingError::InvalidCoordinate { .. }));
    }
}
