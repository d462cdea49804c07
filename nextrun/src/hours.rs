//! Expansion of an hour range into the instants it yields on one calendar date.

use jiff::civil::{Date, DateTime};
use jiff::{Span, ToSpan};

use crate::error::ScheduleError;
use crate::values::HourTimeRange;

/// Lazy iterator over the instants of `range` anchored on `date`.
///
/// Same-day ranges step from `start` through `end`. Midnight-crossing ranges
/// step from `start` to the end of `date`, then keep the same stride into the
/// following day up to `end`. Single-instant ranges yield `start` only.
#[derive(Debug, Clone)]
pub struct HourSteps {
    range: HourTimeRange,
    date: Date,
    next_date: Option<Date>,
    step: Span,
    cursor: Option<DateTime>,
}

impl HourSteps {
    pub fn new(date: Date, range: HourTimeRange) -> Self {
        Self::build(date, range, range.interval())
    }

    /// Expand with an explicit hourly stride in place of the range's own.
    pub fn with_interval(
        date: Date,
        range: HourTimeRange,
        interval_hours: i32,
    ) -> Result<Self, ScheduleError> {
        if interval_hours <= 0 {
            return Err(ScheduleError::interval(format!(
                "hourly interval must be positive, got {interval_hours}"
            )));
        }
        Ok(Self::build(date, range, interval_hours))
    }

    fn build(date: Date, range: HourTimeRange, interval_hours: i32) -> Self {
        // A stride of a day or more never reaches a second instant.
        let hours = i64::from(interval_hours.clamp(1, 24));
        Self {
            range,
            date,
            next_date: date.tomorrow().ok(),
            step: hours.hours(),
            cursor: Some(date.to_datetime(range.start())),
        }
    }

    fn accepts(&self, instant: DateTime) -> bool {
        if instant.date() == self.date {
            return self.range.crosses_midnight() || instant.time() <= self.range.end();
        }
        self.range.crosses_midnight()
            && Some(instant.date()) == self.next_date
            && instant.time() <= self.range.end()
    }
}

impl Iterator for HourSteps {
    type Item = DateTime;

    fn next(&mut self) -> Option<DateTime> {
        let current = self.cursor.take()?;
        if self.range.is_single_instant() {
            return Some(current);
        }
        if !self.accepts(current) {
            return None;
        }
        self.cursor = current.checked_add(self.step).ok();
        Some(current)
    }
}

/// Ordered instants of `range` on `date`, at most `max_count` of them.
pub fn expand_hours(date: Date, range: &HourTimeRange, max_count: usize) -> Vec<DateTime> {
    HourSteps::new(date, *range).take(max_count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::FrequencyMode;
    use jiff::civil::{date, time, Time};

    fn range(start: (i8, i8), end: (i8, i8), every: i32) -> HourTimeRange {
        HourTimeRange::every(
            time(start.0, start.1, 0, 0),
            time(end.0, end.1, 0, 0),
            every,
        )
        .unwrap()
    }

    #[test]
    fn same_day_range_is_inclusive() {
        let day = date(2024, 1, 1);
        let got = expand_hours(day, &range((9, 0), (17, 0), 2), 100);
        let hours: Vec<i8> = got.iter().map(|dt| dt.hour()).collect();
        assert_eq!(hours, vec![9, 11, 13, 15, 17]);
        assert!(got.iter().all(|dt| dt.date() == day));
    }

    #[test]
    fn stride_that_overshoots_stops_at_end() {
        let got = expand_hours(date(2024, 1, 1), &range((9, 0), (12, 0), 5), 100);
        assert_eq!(got, vec![date(2024, 1, 1).at(9, 0, 0, 0)]);
    }

    #[test]
    fn same_day_never_spills_into_tomorrow() {
        let got = expand_hours(date(2024, 1, 1), &range((9, 0), (23, 59), 5), 100);
        let hours: Vec<i8> = got.iter().map(|dt| dt.hour()).collect();
        assert_eq!(hours, vec![9, 14, 19]);
    }

    #[test]
    fn midnight_crossing_keeps_stride() {
        let day = date(2024, 3, 10);
        let got = expand_hours(day, &range((23, 0), (2, 0), 1), 100);
        assert_eq!(
            got,
            vec![
                day.at(23, 0, 0, 0),
                date(2024, 3, 11).at(0, 0, 0, 0),
                date(2024, 3, 11).at(1, 0, 0, 0),
                date(2024, 3, 11).at(2, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn midnight_crossing_with_wide_stride() {
        let day = date(2024, 1, 1);
        let got = expand_hours(day, &range((22, 0), (5, 0), 3), 100);
        assert_eq!(
            got,
            vec![
                day.at(22, 0, 0, 0),
                date(2024, 1, 2).at(1, 0, 0, 0),
                date(2024, 1, 2).at(4, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn midnight_crossing_over_year_end() {
        let got = expand_hours(date(2024, 12, 31), &range((23, 30), (0, 30), 1), 100);
        assert_eq!(
            got,
            vec![
                date(2024, 12, 31).at(23, 30, 0, 0),
                date(2025, 1, 1).at(0, 30, 0, 0),
            ]
        );
    }

    #[test]
    fn once_mode_yields_start_only() {
        let r = HourTimeRange::new(
            time(8, 15, 0, 0),
            time(20, 0, 0, 0),
            1,
            FrequencyMode::Once,
        )
        .unwrap();
        assert_eq!(
            expand_hours(date(2024, 1, 1), &r, 100),
            vec![date(2024, 1, 1).at(8, 15, 0, 0)]
        );
        assert_eq!(
            expand_hours(date(2024, 1, 1), &HourTimeRange::at(Time::midnight()), 5),
            vec![date(2024, 1, 1).at(0, 0, 0, 0)]
        );
    }

    #[test]
    fn max_count_truncates() {
        let got = expand_hours(date(2024, 1, 1), &range((0, 0), (23, 0), 1), 3);
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn explicit_stride_must_be_positive() {
        let err =
            HourSteps::with_interval(date(2024, 1, 1), range((9, 0), (17, 0), 1), 0).unwrap_err();
        assert_eq!(err.kind(), "invalid_interval");
        let steps: Vec<_> =
            HourSteps::with_interval(date(2024, 1, 1), range((9, 0), (17, 0), 1), 4)
                .unwrap()
                .collect();
        assert_eq!(steps.len(), 3);
    }
}
