use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    Draft,
    Confirmed,
    Approved,
    Refused,
    Cancelled,
}

impl LeaveStatus {
    /// Refused and cancelled requests never count toward any rule.
    pub fn is_active(self) -> bool {
        !matches!(self, LeaveStatus::Refused | LeaveStatus::Cancelled)
    }
}

/// One leave request as fetched by the caller. The validators never mutate
/// it; they only advise accept/reject.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1000)]
    pub employee_id: u64,
    /// Category tag, matched by name against the configured leave types.
    #[schema(example = "Earned Leaves")]
    pub leave_type: String,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub date_from: NaiveDate,
    #[schema(example = "2026-03-04", format = "date", value_type = String)]
    pub date_to: NaiveDate,
    /// Business-calendar days covered, as computed by the caller.
    #[schema(example = 3.0)]
    pub number_of_days: f64,
    #[schema(example = "approved")]
    pub status: LeaveStatus,
}

impl LeaveRequest {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// True when the request's date range overlaps `[start, end]`.
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date_from <= end && self.date_to >= start
    }
}
