//! Reporting periods.
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    EngineError, ResultEngine,
    util::{month_end, month_start, sub_months},
};

/// A date range `[start, end]`, inclusive on both ends, over which costs are
/// aggregated.
///
/// The constructors guarantee `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ReportingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportingPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if start > end {
            return Err(EngineError::InvalidPeriod(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The calendar month `month` (1-12) of `year`.
    pub fn month(year: i32, month: u32) -> ResultEngine<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| EngineError::InvalidPeriod(format!("no such month {year}-{month:02}")))?;
        Ok(Self::month_containing(first))
    }

    /// The calendar month containing `date`.
    #[must_use]
    pub fn month_containing(date: NaiveDate) -> Self {
        Self {
            start: month_start(date),
            end: month_end(date),
        }
    }

    /// The calendar year `year`.
    pub fn year(year: i32) -> ResultEngine<Self> {
        let bounds = NaiveDate::from_ymd_opt(year, 1, 1).zip(NaiveDate::from_ymd_opt(year, 12, 31));
        let (start, end) =
            bounds.ok_or_else(|| EngineError::InvalidPeriod(format!("no such year {year}")))?;
        Ok(Self { start, end })
    }

    /// Period covering both dates, whatever their order.
    pub(crate) fn spanning(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The calendar month before the one containing `start`.
    #[must_use]
    pub fn previous_month(&self) -> Self {
        Self::month_containing(sub_months(month_start(self.start), 1))
    }

    /// The calendar month `months` months before the one containing `start`.
    #[must_use]
    pub(crate) fn months_back(&self, months: u32) -> Self {
        Self::month_containing(sub_months(month_start(self.start), months))
    }

    /// Returns `true` when the period is exactly one calendar month.
    #[must_use]
    pub fn is_calendar_month(&self) -> bool {
        *self == Self::month_containing(self.start)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_calendar_month() {
            write!(f, "{}-{:02}", self.start.year(), self.start.month())
        } else {
            write!(f, "{}..={}", self.start, self.end)
        }
    }
}
