use super::coordinate::Coordinate;

/// The first match returned by a provider, already normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub coordinate: Coordinate,
    /// Human-readable label for the match, when the provider sends one.
    pub display_name: Option<String>,
}

impl Candidate {
    pub fn new(coordinate: Coordinate, display_name: Option<String>) -> Self {
        Self {
            coordinate,
            display_name: display_name.filter(|name| !name.trim().is_empty()),
        }
    }
}
