//! MiMapa Geocoding Crate
//!
//! Turns a free-text postal address into a (latitude, longitude) pair by
//! asking a prioritized list of public geocoding services.
//!
//! # Overview
//!
//! The geocoding crate supports:
//! - Multiple providers: Nominatim (primary), Photon (secondary) and
//!   geocode.maps.co (optional, keyed)
//! - Coordinate normalization, whatever order the provider answers in
//! - Bounded retries on timeouts, immediate fallback on anything else
//! - Environment-driven configuration
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  AddressResolver |  (inbound port)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  GeocodingEngine | --> |   RetryPolicy    |  (timeouts only)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! | GeocodingProvider|  (Nominatim, Photon, MapsCo)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | ResolutionOutcome|  (Found / NotFound / Failed)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Coordinate`] - Validated latitude/longitude pair in decimal degrees
//! - [`ResolutionOutcome`] - What a single `resolve` call produced
//! - [`GeocodedLocation`] - Coordinate plus the provider that supplied it
//! - [`GeocoderConfig`] - Provider order, endpoints, timeouts and retries
//!
//! # Example
//!
//! ```no_run
//! use mimapa_geocoding::{GeocoderConfig, GeocodingEngine, ResolutionOutcome};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeocoderConfig::from_env()?;
//! let engine = GeocodingEngine::from_config(&config)?;
//!
//! match engine.resolve("Calle Granada 46, Málaga, España").await {
//!     ResolutionOutcome::Found(location) => println!("{}", location.coordinate),
//!     ResolutionOutcome::NotFound => println!("not found"),
//!     ResolutionOutcome::Failed(reason) => println!("failed: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod provider;
pub mod transport;

// Re-export all public types from models
pub use models::{
    Candidate, Coordinate, FailureReason, GeocodedLocation, ProviderId, ResolutionOutcome,
};

// Re-export engine types
pub use engine::{AddressResolver, GeocodingEngine, RetryPolicy};

// Re-export provider types
pub use provider::mapsco::MapsCoProvider;
pub use provider::nominatim::NominatimProvider;
pub use provider::photon::PhotonProvider;
pub use provider::{GeocodingProvider, ProviderEndpoint};

pub use config::{GeocoderConfig, ProviderConfig};
pub use errors::{ConfigError, GeocodingError, RetryClass};
pub use transport::TransportConfig;
