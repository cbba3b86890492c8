use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::model::location::Location;

/// Which edge of an attendance record an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    CheckIn,
    CheckOut,
}

/// Company-level geofence settings.
///
/// Whether the check runs at all (per direction) is a separate flag; once a
/// check runs, an unset reference or a non-positive radius is a
/// configuration error, never a silent pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceConfig {
    /// Point the distance is measured from, e.g. the company premises.
    pub reference: Option<Location>,
    /// Radius around the reference within which events are accepted.
    pub allowed_radius_meters: f64,
}
