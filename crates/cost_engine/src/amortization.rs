//! Amortization window arithmetic.
//!
//! A capital expense is spread evenly over `duration_months` calendar months
//! starting on its date. The window is `[date, date + duration_months]`, both
//! ends inclusive, with month addition clamped to the end of shorter months.
//!
//! Overlap with a reporting period is counted in whole months, but any overlap
//! at all counts as at least one month: a period touching a single day of the
//! window is charged a full month of amortization.

use chrono::NaiveDate;

use crate::{
    Expense, ReportingPeriod,
    util::{add_months, whole_months_between},
};

/// Constant monthly rate for `amount` spread over `duration_months`.
///
/// Returns 0 for a non-positive duration. The result is not rounded.
#[must_use]
pub fn monthly_rate(amount: f64, duration_months: i32) -> f64 {
    if duration_months <= 0 {
        return 0.0;
    }
    amount / f64::from(duration_months)
}

/// Last day of the amortization window of `expense`.
///
/// With a non-positive duration the window collapses to the expense date.
#[must_use]
pub fn amortization_end_date(expense: &Expense, duration_months: i32) -> NaiveDate {
    add_months(expense.date, u32::try_from(duration_months).unwrap_or(0))
}

/// Returns `true` when the amortization window of `expense` shares at least one
/// day with `period`.
#[must_use]
pub fn window_overlaps(expense: &Expense, period: &ReportingPeriod, duration_months: i32) -> bool {
    expense.date <= period.end() && amortization_end_date(expense, duration_months) >= period.start()
}

/// Number of amortization months of `expense` charged to `period`.
///
/// 0 for a non-positive duration or without overlap; otherwise the whole
/// months between `max(date, period.start)` and `min(window_end, period.end)`,
/// floored at 1.
#[must_use]
pub fn active_months_in_period(
    expense: &Expense,
    period: &ReportingPeriod,
    duration_months: i32,
) -> u32 {
    if duration_months <= 0 || !window_overlaps(expense, period, duration_months) {
        return 0;
    }

    let effective_start = expense.date.max(period.start());
    let effective_end = amortization_end_date(expense, duration_months).min(period.end());

    whole_months_between(effective_start, effective_end).max(1)
}
