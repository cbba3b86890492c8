use thiserror::Error;

use crate::model::geofence::{Direction, GeofenceConfig};
use crate::model::location::Location;
use crate::rules::ViolationKind;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters, via the haversine
/// formula.
pub fn haversine_meters(a: Location, b: Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Successful check, carrying the measured distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofencePass {
    pub distance_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeofenceViolation {
    #[error("Missing location for {0}. Please enable location services.")]
    MissingLocation(Direction),
    #[error("Company location is not set.")]
    ReferenceNotSet,
    #[error("Allowed distance is not configured.")]
    RadiusNotConfigured,
    #[error(
        "You are outside the allowed range for {direction}: {distance_meters:.2}m away, allowed {allowed_radius_meters:.2}m."
    )]
    OutsideRange {
        direction: Direction,
        distance_meters: f64,
        allowed_radius_meters: f64,
    },
}

impl GeofenceViolation {
    pub fn category(&self) -> &'static str {
        match self {
            GeofenceViolation::MissingLocation(_) => "missing_location",
            GeofenceViolation::ReferenceNotSet => "reference_not_set",
            GeofenceViolation::RadiusNotConfigured => "radius_not_configured",
            GeofenceViolation::OutsideRange { .. } => "too_far",
        }
    }

    pub fn kind(&self) -> ViolationKind {
        match self {
            GeofenceViolation::MissingLocation(_) => ViolationKind::MissingInput,
            GeofenceViolation::ReferenceNotSet | GeofenceViolation::RadiusNotConfigured => {
                ViolationKind::Configuration
            }
            GeofenceViolation::OutsideRange { .. } => ViolationKind::BusinessRule,
        }
    }
}

/// Checks one attendance event against the configured geofence.
///
/// Whether geofencing applies at all (per company and per direction) is the
/// caller's decision; once invoked, the check is unconditional and fails
/// closed on incomplete configuration. `event` is `None` when the device
/// had no GPS fix. The comparison uses the raw distance; rounding happens
/// only in the rendered message.
pub fn validate(
    event: Option<Location>,
    direction: Direction,
    config: &GeofenceConfig,
) -> Result<GeofencePass, GeofenceViolation> {
    let event = event.ok_or(GeofenceViolation::MissingLocation(direction))?;
    let reference = config.reference.ok_or(GeofenceViolation::ReferenceNotSet)?;

    if config.allowed_radius_meters <= 0.0 {
        return Err(GeofenceViolation::RadiusNotConfigured);
    }

    let distance_meters = haversine_meters(reference, event);
    if distance_meters <= config.allowed_radius_meters {
        Ok(GeofencePass { distance_meters })
    } else {
        Err(GeofenceViolation::OutsideRange {
            direction,
            distance_meters,
            allowed_radius_meters: config.allowed_radius_meters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
        }
    }

    fn config(reference: Option<Location>, allowed_radius_meters: f64) -> GeofenceConfig {
        GeofenceConfig {
            reference,
            allowed_radius_meters,
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let dhaka = loc(23.780887, 90.419470);
        assert_eq!(haversine_meters(dhaka, dhaka), 0.0);

        let pass = validate(Some(dhaka), Direction::CheckIn, &config(Some(dhaka), 100.0))
            .expect("same point is always in range");
        assert_eq!(pass.distance_meters, 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = loc(23.780887, 90.419470);
        let b = loc(23.750900, 90.393200);
        assert_eq!(haversine_meters(a, b), haversine_meters(b, a));
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = haversine_meters(loc(0.0, 0.0), loc(0.0, 1.0));
        let expected = 111_195.0;
        assert!(
            (d - expected).abs() / expected < 0.01,
            "expected ~{expected}m, got {d}m"
        );
    }

    #[test]
    fn distance_exactly_on_the_radius_passes() {
        let reference = loc(0.0, 0.0);
        let event = loc(0.0, 0.001);
        let d = haversine_meters(reference, event);

        let pass = validate(Some(event), Direction::CheckIn, &config(Some(reference), d))
            .expect("boundary distance is allowed");
        assert_eq!(pass.distance_meters, d);
    }

    #[test]
    fn event_beyond_the_radius_is_rejected_with_distances() {
        let reference = loc(0.0, 0.0);
        let event = loc(0.0, 0.01);

        match validate(Some(event), Direction::CheckOut, &config(Some(reference), 100.0)) {
            Err(GeofenceViolation::OutsideRange {
                direction,
                distance_meters,
                allowed_radius_meters,
            }) => {
                assert_eq!(direction, Direction::CheckOut);
                assert_eq!(allowed_radius_meters, 100.0);
                assert!(distance_meters > 1_000.0);
            }
            other => panic!("expected out-of-range rejection, got {other:?}"),
        }
    }

    #[test]
    fn missing_event_location_is_rejected() {
        let violation = validate(
            None,
            Direction::CheckIn,
            &config(Some(loc(0.0, 0.0)), 100.0),
        )
        .unwrap_err();
        assert_eq!(violation, GeofenceViolation::MissingLocation(Direction::CheckIn));
        assert_eq!(violation.kind(), ViolationKind::MissingInput);
        assert_eq!(
            violation.to_string(),
            "Missing location for check-in. Please enable location services."
        );
    }

    #[test]
    fn unset_reference_fails_closed() {
        let violation = validate(
            Some(loc(0.0, 0.0)),
            Direction::CheckIn,
            &config(None, 100.0),
        )
        .unwrap_err();
        assert_eq!(violation, GeofenceViolation::ReferenceNotSet);
        assert_eq!(violation.kind(), ViolationKind::Configuration);
    }

    #[test]
    fn non_positive_radius_is_a_configuration_error() {
        let reference = Some(loc(0.0, 0.0));
        for radius in [0.0, -5.0] {
            let violation = validate(
                Some(loc(0.0, 0.0)),
                Direction::CheckOut,
                &config(reference, radius),
            )
            .unwrap_err();
            assert_eq!(violation, GeofenceViolation::RadiusNotConfigured);
            assert_eq!(violation.kind(), ViolationKind::Configuration);
        }
    }

    #[test]
    fn rejection_message_rounds_to_two_decimals() {
        let violation = GeofenceViolation::OutsideRange {
            direction: Direction::CheckIn,
            distance_meters: 123.456789,
            allowed_radius_meters: 100.0,
        };
        assert_eq!(
            violation.to_string(),
            "You are outside the allowed range for check-in: 123.46m away, allowed 100.00m."
        );
    }
}
