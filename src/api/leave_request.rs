use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::Config;
use crate::model::leave_request::LeaveRequest;
use crate::rules::leave;

#[derive(Deserialize, ToSchema)]
pub struct ValidateLeave {
    /// The new or modified request being validated.
    pub candidate: LeaveRequest,
    /// The employee's other leave requests, ordered by date_from ascending.
    pub history: Vec<LeaveRequest>,
}

/* =========================
Validate leave request
========================= */
/// Swagger doc for validate_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave/validate",
    request_body(
        content = ValidateLeave,
        description = "Candidate leave request plus the employee's leave history snapshot",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request passes all rules",
         body = Object,
         example = json!({
            "allowed": true,
            "message": "Leave request passes validation"
         })
        ),
        (status = 400, description = "Leave request rejected", body = Object, example = json!({
            "allowed": false,
            "message": "You can only take up to 5 Earned Leaves days per month. Your current request for the month of March 2026 exceeds this limit.",
            "category": "quota_exceeded",
            "kind": "business_rule"
        }))
    ),
    tag = "Leave"
)]
pub async fn validate_leave(
    config: web::Data<Config>,
    payload: web::Json<ValidateLeave>,
) -> actix_web::Result<impl Responder> {
    let ValidateLeave { candidate, history } = payload.into_inner();

    let verdict = leave::check_monthly_quota(&candidate, &history, &config.leave_rules).and_then(
        |_| leave::check_sick_leave_proximity(&candidate, &history, &config.leave_rules),
    );

    match verdict {
        Ok(()) => {
            tracing::info!(
                employee_id = candidate.employee_id,
                leave_id = candidate.id,
                "Leave request passes validation"
            );
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "allowed": true,
                "message": "Leave request passes validation"
            })))
        }
        Err(violation) => {
            tracing::warn!(
                employee_id = candidate.employee_id,
                leave_id = candidate.id,
                category = violation.category(),
                "Leave request rejected"
            );
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "allowed": false,
                "message": violation.to_string(),
                "category": violation.category(),
                "kind": violation.kind().to_string(),
            })))
        }
    }
}
