//! Internal helpers for calendar arithmetic and key normalization.
//!
//! These utilities are **not** part of the public API.

use chrono::{Datelike, Months, NaiveDate};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalize a free-form category name into a lookup key.
///
/// Trims, strips diacritics, lower-cases and maps spaces/dashes to `_`, so
/// `"Équipement lourd"` becomes `"equipement_lourd"`.
pub(crate) fn normalize_category_key(value: &str) -> String {
    value
        .trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Calendar month addition, clamped to the end of shorter months
/// (`2024-01-31 + 1 month = 2024-02-29`). Saturates at `NaiveDate::MAX`.
pub(crate) fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Calendar month subtraction, clamped like [`add_months`]. Saturates at
/// `NaiveDate::MIN`.
pub(crate) fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Number of whole calendar months from `start` to `end`: the largest `n` with
/// `start + n months <= end`. Returns 0 when `end <= start`.
pub(crate) fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut months = u32::try_from(span).unwrap_or(0);
    if months > 0 && add_months(start, months) > end {
        months -= 1;
    }
    months
}

/// First day of the month containing `date`.
pub(crate) fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub(crate) fn month_end(date: NaiveDate) -> NaiveDate {
    add_months(month_start(date), 1)
        .pred_opt()
        .unwrap_or(NaiveDate::MAX)
}
