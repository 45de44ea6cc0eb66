//! Response shapes shared by Nominatim-compatible APIs.

use serde::Deserialize;

/// One element of the `/search?format=json` array.
#[derive(Debug, Deserialize)]
pub(crate) struct Place {
    pub lat: Degrees,
    pub lon: Degrees,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Nominatim sends degrees as decimal strings; some mirrors send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Text(text) => text.trim().parse().ok(),
            Self::Number(value) => Some(*value),
        }
    }
}
