use serde::Deserialize;
use serde_json::Value;

/// GeoJSON `FeatureCollection` returned by `/api/`.
#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    /// Left undecoded so only the first feature is ever inspected
    #[serde(default)]
    pub features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    /// GeoJSON position: `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Properties {
    pub name: Option<String>,
    pub street: Option<String>,
    pub housenumber: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Properties {
    /// "name, street housenumber, postcode city, country" with missing
    /// parts left out.
    pub fn display_name(&self) -> Option<String> {
        let street = join_words([self.street.as_deref(), self.housenumber.as_deref()]);
        let locality = join_words([self.postcode.as_deref(), self.city.as_deref()]);

        let mut parts: Vec<String> = Vec::new();
        for part in [
            self.name.clone(),
            street,
            locality,
            self.country.clone(),
        ]
        .into_iter()
        .flatten()
        {
            let part = part.trim().to_string();
            if !part.is_empty() && parts.last() != Some(&part) {
                parts.push(part);
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

fn join_words(words: [Option<&str>; 2]) -> Option<String> {
    let joined = words
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
