use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[schema(example = 23.780887)]
    pub latitude: f64,
    #[schema(example = 90.419470)]
    pub longitude: f64,
}

impl Location {
    /// Returns `None` when either coordinate is outside the valid range
    /// (|latitude| <= 90, |longitude| <= 180).
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}
