use chrono::{Datelike, Months, NaiveDate};

/// First and last day of the calendar month containing `day`.
pub fn month_window(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).expect("day 1 exists in every month");
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .expect("month end within supported date range");
    (first, last)
}

/// Inclusive count of Mon-Fri days in `[start, end]`. Zero when
/// `start > end`. Public holidays are not modeled.
pub fn working_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if start > end {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| day.weekday().number_from_monday() <= 5)
        .count() as i64
}
