use serde::Serialize;

use super::coordinate::Coordinate;
use super::types::ProviderId;

/// A successfully resolved address.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeocodedLocation {
    pub coordinate: Coordinate,

    /// Provider-formatted label of the match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Provider that answered (NOMINATIM, PHOTON, MAPSCO, etc.)
    pub provider: ProviderId,
}

/// Why a resolution could not be attempted at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The engine was built with an empty provider list.
    NoProvidersConfigured,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoProvidersConfigured => write!(f, "no geocoding providers configured"),
        }
    }
}

/// Result of one `resolve` call.
///
/// `NotFound` is an ordinary answer: every provider was tried and none
/// produced a usable candidate.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolutionOutcome {
    Found(GeocodedLocation),
    NotFound,
    Failed(FailureReason),
}

impl ResolutionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Coordinate of a `Found` outcome.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Found(location) => Some(location.coordinate),
            _ => None,
        }
    }

    pub fn into_location(self) -> Option<GeocodedLocation> {
        match self {
            Self::Found(location) => Some(location),
            _ => None,
        }
    }
}
