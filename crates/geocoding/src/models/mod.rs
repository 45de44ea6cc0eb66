//! Geocoding models
//!
//! - `types` - Type aliases for identifiers (ProviderId)
//! - `coordinate` - Validated (latitude, longitude) pair
//! - `candidate` - First match a provider returned for an address
//! - `outcome` - Result of one resolution (ResolutionOutcome, GeocodedLocation)

mod candidate;
mod coordinate;
mod outcome;
mod types;

pub use candidate::Candidate;
pub use coordinate::Coordinate;
pub use outcome::{FailureReason, GeocodedLocation, ResolutionOutcome};
pub use types::ProviderId;
