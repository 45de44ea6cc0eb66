//! Geocoding provider trait definitions.

use reqwest::{Client, RequestBuilder};

use crate::errors::GeocodingError;
use crate::models::Candidate;

/// Trait for geocoding providers.
///
/// A provider is a pair of strategies: how to build the HTTP request for
/// an address, and how to read the first candidate out of the response
/// body. Sending the request, checking the status and classifying
/// transport errors is shared by every provider (see
/// [`fetch_candidate`](super::fetch_candidate)).
///
/// # Example
///
/// ```ignore
/// struct MyProvider {
///     endpoint: ProviderEndpoint,
/// }
///
/// impl GeocodingProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn build_request(&self, client: &Client, address: &str) -> RequestBuilder {
///         client
///             .get(self.endpoint.url("geocode"))
///             .query(&[("text", address), ("size", "1")])
///             .header(USER_AGENT, self.endpoint.user_agent())
///     }
///
///     fn parse_candidate(&self, body: &str) -> Result<Option<Candidate>, GeocodingError> {
///         // ... decode the provider's JSON shape
///     }
/// }
/// ```
pub trait GeocodingProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "NOMINATIM", "PHOTON", etc.
    /// Used for logging and reported back in `GeocodedLocation::provider`.
    fn id(&self) -> &'static str;

    /// Build the GET request for `address`.
    ///
    /// Must carry the address, request at most one candidate where the
    /// provider supports it, and set the provider's `User-Agent`.
    /// `Accept: application/json` is added by the caller.
    fn build_request(&self, client: &Client, address: &str) -> RequestBuilder;

    /// Decode a 200 response body.
    ///
    /// Returns `Ok(None)` when the body is well formed but lists no
    /// candidates. Only the first candidate may be inspected, and its
    /// coordinate must come back in (latitude, longitude) order.
    fn parse_candidate(&self, body: &str) -> Result<Option<Candidate>, GeocodingError>;
}
