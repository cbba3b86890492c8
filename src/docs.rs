use crate::api::attendance::AttendanceEvent;
use crate::api::leave_request::ValidateLeave;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Validation Rules API",
        version = "1.0.0",
        description = r#"
## Attendance & Leave Validation Rules

This API validates HR events against company business rules. It holds no
data of its own: callers send a snapshot (an attendance event's
coordinates, or a candidate leave request plus the employee's leave
history) and receive a structured allow/reject verdict.

### 🔹 Key Features
- **Geofenced Attendance**
  - Check-in and check-out events are measured against the company
    location and the allowed radius (great-circle distance)
- **Leave Eligibility**
  - Monthly quota for Earned Leaves, including month-boundary rules
  - Minimum working-day gap around Sick Leave

### 📦 Response Format
- JSON-based RESTful responses
- Rejections carry a machine-readable `category` and `kind` alongside the
  user-facing message

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::validate_check_in,
        crate::api::attendance::validate_check_out,

        crate::api::leave_request::validate_leave
    ),
    components(
        schemas(
            AttendanceEvent,
            LeaveRequest,
            LeaveStatus,
            ValidateLeave
        )
    ),
    tags(
        (name = "Attendance", description = "Geofenced attendance validation APIs"),
        (name = "Leave", description = "Leave eligibility validation APIs"),
    )
)]
pub struct ApiDoc;
