use serde::Serialize;

use crate::errors::GeocodingError;

/// Valid latitude range in degrees.
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A geographic position in canonical (latitude, longitude) order.
///
/// Can only be built through [`Coordinate::new`], so every value in
/// circulation is finite and inside the WGS84 degree ranges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validate and build a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::InvalidCoordinate`] when either value is
    /// NaN/infinite or outside its range.
    ///
    /// # Examples
    ///
    /// ```
    /// use mimapa_geocoding::Coordinate;
    ///
    /// let malaga = Coordinate::new(36.7220033, -4.4189788).unwrap();
    /// assert_eq!(malaga.latitude(), 36.7220033);
    ///
    /// assert!(Coordinate::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeocodingError> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !LATITUDE_RANGE.contains(&latitude)
            || !LONGITUDE_RANGE.contains(&longitude)
        {
            return Err(GeocodingError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The pair as `(latitude, longitude)`.
    pub fn as_lat_lon(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
