// Window selection over a daily series
use crate::domain::consumption::DailyReading;
use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;

/// The two reporting windows the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WindowKind {
    /// The 7 days ending on the reference date, both ends inclusive
    #[serde(rename = "weekly")]
    Trailing7,
    /// The calendar month containing the reference date
    #[serde(rename = "monthly")]
    CalendarMonth,
}

impl WindowKind {
    /// Nominal day count of the window. Daily averages divide by this even
    /// when fewer readings are present, matching the weekly-total / 7
    /// relationship the dashboard reports.
    pub fn nominal_days(&self, reference: NaiveDate) -> u32 {
        match self {
            WindowKind::Trailing7 => 7,
            WindowKind::CalendarMonth => month_bounds(reference).1.day(),
        }
    }
}

/// Returns the readings falling inside the window, in series order. An
/// empty intersection yields an empty slice, never an error.
pub fn select_window(
    series: &[DailyReading],
    kind: WindowKind,
    reference: NaiveDate,
) -> &[DailyReading] {
    let (start, end) = match kind {
        WindowKind::Trailing7 => (
            reference.checked_sub_days(Days::new(6)).unwrap_or(reference),
            reference,
        ),
        WindowKind::CalendarMonth => month_bounds(reference),
    };
    select_span(series, start, end)
}

/// Inclusive date-range slice of an ascending series.
pub fn select_span(series: &[DailyReading], start: NaiveDate, end: NaiveDate) -> &[DailyReading] {
    let lo = series.partition_point(|reading| reading.date < start);
    let hi = series.partition_point(|reading| reading.date <= end);
    &series[lo..hi]
}

fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = reference.with_day(1).unwrap_or(reference);
    let next_month = if reference.month() == 12 {
        NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(reference.year(), reference.month() + 1, 1)
    };
    let last = next_month
        .and_then(|day| day.checked_sub_days(Days::new(1)))
        .unwrap_or(reference);
    (first, last)
}
