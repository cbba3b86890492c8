use chrono::{Datelike, Days};
use thiserror::Error;

use crate::model::leave_request::LeaveRequest;
use crate::rules::ViolationKind;
use crate::rules::calendar::{month_window, working_days_between};

/// Thresholds and designated category names for the leave rules. Passed
/// explicitly into every check so there is no ambient settings state.
#[derive(Debug, Clone)]
pub struct LeaveRuleConfig {
    /// Category capped per calendar month.
    pub quota_leave_type: String,
    /// Category that requires breathing room around it.
    pub sick_leave_type: String,
    /// Maximum days of the capped category within one calendar month.
    pub monthly_cap_days: f64,
    /// Days scanned on each side of a candidate for neighbouring requests.
    pub proximity_window_days: u64,
    /// Gaps with fewer working days than this are rejected.
    pub min_gap_working_days: i64,
}

impl Default for LeaveRuleConfig {
    fn default() -> Self {
        Self {
            quota_leave_type: "Earned Leaves".to_string(),
            sick_leave_type: "Sick Leave".to_string(),
            monthly_cap_days: 5.0,
            proximity_window_days: 14,
            min_gap_working_days: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeaveViolation {
    #[error("date_from cannot be after date_to.")]
    InvalidDateRange,
    #[error(
        "You cannot take {leave_type} that span across two months. Please create separate leave requests for each month."
    )]
    MonthSpan { leave_type: String },
    #[error(
        "You can only take up to {cap_days} {leave_type} days per month. Your current request for the month of {month} exceeds this limit."
    )]
    QuotaExceeded {
        leave_type: String,
        cap_days: f64,
        total_days: f64,
        month: String,
    },
    #[error(
        "You cannot take {leave_type} that continue into the next month. Please create separate leave requests for each month."
    )]
    BoundaryContinuation { leave_type: String },
    #[error("There must be at least 1 working day between {sick_leave_type} and any other leave.")]
    InsufficientGap {
        sick_leave_type: String,
        working_days: i64,
    },
}

impl LeaveViolation {
    pub fn category(&self) -> &'static str {
        match self {
            LeaveViolation::InvalidDateRange => "invalid_date_range",
            LeaveViolation::MonthSpan { .. } => "month_span",
            LeaveViolation::QuotaExceeded { .. } => "quota_exceeded",
            LeaveViolation::BoundaryContinuation { .. } => "boundary_continuation",
            LeaveViolation::InsufficientGap { .. } => "insufficient_gap",
        }
    }

    pub fn kind(&self) -> ViolationKind {
        match self {
            LeaveViolation::InvalidDateRange => ViolationKind::MissingInput,
            _ => ViolationKind::BusinessRule,
        }
    }
}

fn check_date_range(candidate: &LeaveRequest) -> Result<(), LeaveViolation> {
    if candidate.date_from > candidate.date_to {
        return Err(LeaveViolation::InvalidDateRange);
    }
    Ok(())
}

/// Requests from the history that may influence a rule for `candidate`:
/// same employee, not the candidate itself, not refused or cancelled.
fn relevant<'h>(
    candidate: &'h LeaveRequest,
    history: &'h [LeaveRequest],
) -> impl Iterator<Item = &'h LeaveRequest> {
    history
        .iter()
        .filter(move |other| other.id != candidate.id)
        .filter(move |other| other.employee_id == candidate.employee_id)
        .filter(|other| other.is_active())
}

/// Caps the designated category at `monthly_cap_days` per calendar month.
///
/// A candidate of any other category passes untouched. A candidate of the
/// capped category is rejected when it spans two calendar months, when the
/// month's day total (existing requests inside the month window plus the
/// candidate) exceeds the cap, or when another request of the category
/// straddles the month boundary or starts on the first day of the next
/// month. A total exactly at the cap is allowed.
pub fn check_monthly_quota(
    candidate: &LeaveRequest,
    history: &[LeaveRequest],
    rules: &LeaveRuleConfig,
) -> Result<(), LeaveViolation> {
    check_date_range(candidate)?;

    if candidate.leave_type != rules.quota_leave_type {
        return Ok(());
    }

    let from = candidate.date_from;
    let to = candidate.date_to;
    if (from.year(), from.month()) != (to.year(), to.month()) {
        return Err(LeaveViolation::MonthSpan {
            leave_type: rules.quota_leave_type.clone(),
        });
    }

    let (first_day, last_day) = month_window(from);
    let next_month_start = last_day + Days::new(1);

    let total_days: f64 = relevant(candidate, history)
        .filter(|other| other.leave_type == rules.quota_leave_type)
        .filter(|other| other.date_from >= first_day && other.date_to <= last_day)
        .map(|other| other.number_of_days)
        .sum::<f64>()
        + candidate.number_of_days;

    if total_days > rules.monthly_cap_days {
        return Err(LeaveViolation::QuotaExceeded {
            leave_type: rules.quota_leave_type.clone(),
            cap_days: rules.monthly_cap_days,
            total_days,
            month: from.format("%B %Y").to_string(),
        });
    }

    let continues_across_boundary = relevant(candidate, history)
        .filter(|other| other.leave_type == rules.quota_leave_type)
        .any(|other| {
            (other.date_from <= last_day && other.date_to >= next_month_start)
                || other.date_from == next_month_start
        });

    if continues_across_boundary {
        return Err(LeaveViolation::BoundaryContinuation {
            leave_type: rules.quota_leave_type.clone(),
        });
    }

    Ok(())
}

/// Requires working-day breathing room around the sensitive category.
///
/// All active requests whose range intersects the candidate's dates padded
/// by `proximity_window_days` are sorted by `date_from` together with the
/// candidate; only the candidate's immediate neighbours are examined. A
/// pair is rejected when one of the two carries the sensitive category and
/// the gap between them has too few working days.
pub fn check_sick_leave_proximity(
    candidate: &LeaveRequest,
    history: &[LeaveRequest],
    rules: &LeaveRuleConfig,
) -> Result<(), LeaveViolation> {
    check_date_range(candidate)?;

    let window_start = candidate.date_from - Days::new(rules.proximity_window_days);
    let window_end = candidate.date_to + Days::new(rules.proximity_window_days);

    let mut nearby: Vec<&LeaveRequest> = relevant(candidate, history)
        .filter(|other| other.intersects(window_start, window_end))
        .collect();
    nearby.push(candidate);
    nearby.sort_by_key(|request| request.date_from);

    let position = nearby
        .iter()
        .position(|request| request.id == candidate.id)
        .expect("candidate was added to the window above");

    if position > 0 {
        check_gap(nearby[position - 1], candidate, rules)?;
    }
    if position + 1 < nearby.len() {
        check_gap(candidate, nearby[position + 1], rules)?;
    }

    Ok(())
}

fn check_gap(
    earlier: &LeaveRequest,
    later: &LeaveRequest,
    rules: &LeaveRuleConfig,
) -> Result<(), LeaveViolation> {
    // Inclusive working-day count over [earlier end, later start], less one
    // so the boundary day itself does not count as gap.
    let working_days = working_days_between(earlier.date_to, later.date_from) - 1;

    if working_days < rules.min_gap_working_days
        && (earlier.leave_type == rules.sick_leave_type
            || later.leave_type == rules.sick_leave_type)
    {
        return Err(LeaveViolation::InsufficientGap {
            sick_leave_type: rules.sick_leave_type.clone(),
            working_days,
        });
    }

    Ok(())
}
