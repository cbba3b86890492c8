use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::Config;
use crate::model::geofence::Direction;
use crate::model::location::Location;
use crate::rules::geofence::{self, GeofenceViolation};

#[derive(Deserialize, ToSchema)]
pub struct AttendanceEvent {
    #[schema(example = 1000)]
    pub employee_id: u64,
    /// Recorded device latitude; absent when there was no GPS fix.
    #[schema(example = 23.780887, nullable = true)]
    pub latitude: Option<f64>,
    #[schema(example = 90.419470, nullable = true)]
    pub longitude: Option<f64>,
}

impl AttendanceEvent {
    /// Both coordinates present and in range, or nothing.
    fn location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Location::new(latitude, longitude),
            _ => None,
        }
    }
}

/* =========================
Validate check-in
========================= */
/// Swagger doc for validate_check_in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in/validate",
    request_body(
        content = AttendanceEvent,
        description = "Recorded check-in event",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Event allowed",
         body = Object,
         example = json!({
            "allowed": true,
            "checked": true,
            "distance_meters": 42.37,
            "allowed_radius_meters": 100.0
         })
        ),
        (status = 400, description = "Event rejected", body = Object, example = json!({
            "allowed": false,
            "message": "You are outside the allowed range for check-in: 412.05m away, allowed 100.00m.",
            "category": "too_far",
            "kind": "business_rule",
            "distance_meters": 412.05143,
            "allowed_radius_meters": 100.0
        }))
    ),
    tag = "Attendance"
)]
pub async fn validate_check_in(
    config: web::Data<Config>,
    payload: web::Json<AttendanceEvent>,
) -> actix_web::Result<impl Responder> {
    Ok(validate_direction(Direction::CheckIn, &config, &payload))
}

/* =========================
Validate check-out
========================= */
/// Swagger doc for validate_check_out endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-out/validate",
    request_body(
        content = AttendanceEvent,
        description = "Recorded check-out event",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Event allowed", body = Object, example = json!({
            "allowed": true,
            "checked": false,
            "message": "Geo-fencing is disabled for check-out"
        })),
        (status = 400, description = "Event rejected", body = Object, example = json!({
            "allowed": false,
            "message": "Missing location for check-out. Please enable location services.",
            "category": "missing_location",
            "kind": "missing_input"
        }))
    ),
    tag = "Attendance"
)]
pub async fn validate_check_out(
    config: web::Data<Config>,
    payload: web::Json<AttendanceEvent>,
) -> actix_web::Result<impl Responder> {
    Ok(validate_direction(Direction::CheckOut, &config, &payload))
}

fn validate_direction(direction: Direction, config: &Config, event: &AttendanceEvent) -> HttpResponse {
    // Gating is per company and per direction; a disabled direction is an
    // explicit pass-through, not a silent skip.
    if !config.geofence_enabled(direction) {
        return HttpResponse::Ok().json(serde_json::json!({
            "allowed": true,
            "checked": false,
            "message": format!("Geo-fencing is disabled for {direction}")
        }));
    }

    match geofence::validate(event.location(), direction, &config.geofence) {
        Ok(pass) => {
            tracing::info!(
                employee_id = event.employee_id,
                %direction,
                distance_meters = pass.distance_meters,
                "Attendance event within allowed range"
            );
            HttpResponse::Ok().json(serde_json::json!({
                "allowed": true,
                "checked": true,
                "distance_meters": pass.distance_meters,
                "allowed_radius_meters": config.geofence.allowed_radius_meters
            }))
        }
        Err(violation) => {
            tracing::warn!(
                employee_id = event.employee_id,
                %direction,
                category = violation.category(),
                "Attendance event rejected"
            );
            let mut body = serde_json::json!({
                "allowed": false,
                "message": violation.to_string(),
                "category": violation.category(),
                "kind": violation.kind().to_string(),
            });
            if let GeofenceViolation::OutsideRange {
                distance_meters,
                allowed_radius_meters,
                ..
            } = violation
            {
                body["distance_meters"] = distance_meters.into();
                body["allowed_radius_meters"] = allowed_radius_meters.into();
            }
            HttpResponse::BadRequest().json(body)
        }
    }
}
