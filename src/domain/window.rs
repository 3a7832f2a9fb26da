//! Time window domain types.
//!
//! All mailbox counts are bucketed into three nested windows (day, month,
//! year), each anchored to the same reference date. A window maps to its
//! inclusive boundary date: the reference day itself, the first day of
//! that month, or January 1 of that year.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A counting window anchored to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// The reference day itself.
    Day,
    /// The calendar month containing the reference day.
    Month,
    /// The calendar year containing the reference day.
    Year,
}

impl TimeWindow {
    /// Returns the inclusive boundary date of this window for the given
    /// reference date.
    ///
    /// Pure calendar math, independent of the caller's timezone.
    pub fn boundary(self, reference: NaiveDate) -> NaiveDate {
        match self {
            TimeWindow::Day => reference,
            TimeWindow::Month => reference
                .with_day(1)
                .expect("day 1 exists in every month"),
            TimeWindow::Year => NaiveDate::from_ymd_opt(reference.year(), 1, 1)
                .expect("January 1 exists in every year"),
        }
    }
}

/// The three boundary dates derived from one reference date.
///
/// Invariant: `year <= month <= day`, and `day` equals the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    /// Boundary of the day window (the reference date).
    pub day: NaiveDate,
    /// Boundary of the month window (first of the month).
    pub month: NaiveDate,
    /// Boundary of the year window (January 1).
    pub year: NaiveDate,
}

impl WindowBounds {
    /// Computes all three window boundaries for a reference date.
    pub fn for_date(reference: NaiveDate) -> Self {
        Self {
            day: TimeWindow::Day.boundary(reference),
            month: TimeWindow::Month.boundary(reference),
            year: TimeWindow::Year.boundary(reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_for_mid_month_date() {
        let bounds = WindowBounds::for_date(date(2024, 3, 15));

        assert_eq!(bounds.day, date(2024, 3, 15));
        assert_eq!(bounds.month, date(2024, 3, 1));
        assert_eq!(bounds.year, date(2024, 1, 1));
    }

    #[test]
    fn bounds_on_january_first_collapse() {
        // Month-start and year-start coincide with the day itself.
        let bounds = WindowBounds::for_date(date(2025, 1, 1));

        assert_eq!(bounds.day, date(2025, 1, 1));
        assert_eq!(bounds.month, date(2025, 1, 1));
        assert_eq!(bounds.year, date(2025, 1, 1));
    }

    #[test]
    fn bounds_on_december_thirty_first() {
        let bounds = WindowBounds::for_date(date(2023, 12, 31));

        assert_eq!(bounds.day, date(2023, 12, 31));
        assert_eq!(bounds.month, date(2023, 12, 1));
        assert_eq!(bounds.year, date(2023, 1, 1));
    }

    #[test]
    fn bounds_handle_leap_day() {
        let bounds = WindowBounds::for_date(date(2024, 2, 29));

        assert_eq!(bounds.day, date(2024, 2, 29));
        assert_eq!(bounds.month, date(2024, 2, 1));
        assert_eq!(bounds.year, date(2024, 1, 1));
    }

    #[test]
    fn bounds_are_chronologically_ordered() {
        // year <= month <= day must hold for arbitrary dates.
        let samples = [
            date(2024, 1, 1),
            date(2024, 1, 31),
            date(2024, 2, 29),
            date(2024, 6, 15),
            date(2024, 12, 31),
            date(1999, 7, 4),
            date(2038, 11, 30),
        ];

        for reference in samples {
            let bounds = WindowBounds::for_date(reference);
            assert!(bounds.year <= bounds.month, "year > month for {reference}");
            assert!(bounds.month <= bounds.day, "month > day for {reference}");
            assert_eq!(bounds.day, reference);
        }
    }

    #[test]
    fn window_serialization() {
        assert_eq!(serde_json::to_string(&TimeWindow::Day).unwrap(), "\"day\"");
        assert_eq!(
            serde_json::to_string(&TimeWindow::Month).unwrap(),
            "\"month\""
        );
        assert_eq!(
            serde_json::to_string(&TimeWindow::Year).unwrap(),
            "\"year\""
        );
    }
}
