//! Immutable value objects: the hour-of-day window and the validity interval.

use jiff::civil::{DateTime, Time};

use crate::error::ScheduleError;

/// Whether an hour range yields a single instant or a stepped sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FrequencyMode {
    Once,
    #[default]
    Recurrent,
}

/// Time-of-day window expanded into concrete instants on each matching day.
///
/// `end` may be earlier than `start`: the window then continues past midnight
/// into the next calendar day. An `end` of `00:00` marks a single-instant
/// range, as does [`FrequencyMode::Once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "HourTimeRangeDoc", into = "HourTimeRangeDoc")
)]
pub struct HourTimeRange {
    start: Time,
    end: Time,
    interval: i32,
    mode: FrequencyMode,
}

impl HourTimeRange {
    /// Build a range. Fails with `InvalidInterval` unless `interval_hours > 0`.
    pub fn new(
        start: Time,
        end: Time,
        interval_hours: i32,
        mode: FrequencyMode,
    ) -> Result<Self, ScheduleError> {
        if interval_hours <= 0 {
            return Err(ScheduleError::interval(format!(
                "hourly interval must be positive, got {interval_hours}"
            )));
        }
        Ok(Self {
            start,
            end,
            interval: interval_hours,
            mode,
        })
    }

    /// Recurrent range from `start` to `end` every `interval_hours`.
    pub fn every(start: Time, end: Time, interval_hours: i32) -> Result<Self, ScheduleError> {
        Self::new(start, end, interval_hours, FrequencyMode::Recurrent)
    }

    /// Single instant at `start`.
    pub fn at(start: Time) -> Self {
        Self {
            start,
            end: Time::midnight(),
            interval: 1,
            mode: FrequencyMode::Once,
        }
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn interval(&self) -> i32 {
        self.interval
    }

    pub fn mode(&self) -> FrequencyMode {
        self.mode
    }

    pub fn is_single_instant(&self) -> bool {
        self.mode == FrequencyMode::Once || self.end == Time::midnight()
    }

    pub fn crosses_midnight(&self) -> bool {
        !self.is_single_instant() && self.end < self.start
    }
}

/// Inclusive validity window; an absent `end` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "LimitsIntervalDoc", into = "LimitsIntervalDoc")
)]
pub struct LimitsInterval {
    start: DateTime,
    end: Option<DateTime>,
}

impl LimitsInterval {
    /// Fails with `InvalidRange` when `end < start`.
    pub fn new(start: DateTime, end: Option<DateTime>) -> Result<Self, ScheduleError> {
        if let Some(end) = end {
            if end < start {
                return Err(ScheduleError::range(format!(
                    "limits end {end} precedes start {start}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn bounded(start: DateTime, end: DateTime) -> Result<Self, ScheduleError> {
        Self::new(start, Some(end))
    }

    pub fn unbounded(start: DateTime) -> Self {
        Self { start, end: None }
    }

    pub fn start(&self) -> DateTime {
        self.start
    }

    pub fn end(&self) -> Option<DateTime> {
        self.end
    }

    pub fn contains(&self, instant: DateTime) -> bool {
        instant >= self.start && self.end.is_none_or(|end| instant <= end)
    }

    /// True once `instant` is past the end of the window.
    pub fn is_past(&self, instant: DateTime) -> bool {
        self.end.is_some_and(|end| instant > end)
    }
}

// --- Document shapes: deserialization goes through the validating constructors ---

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct HourTimeRangeDoc {
    start_hour: Time,
    #[serde(default = "Time::midnight")]
    end_hour: Time,
    #[serde(default = "default_interval")]
    hourly_interval: i32,
    #[serde(default)]
    frequency: FrequencyMode,
}

#[cfg(feature = "serde")]
fn default_interval() -> i32 {
    1
}

#[cfg(feature = "serde")]
impl TryFrom<HourTimeRangeDoc> for HourTimeRange {
    type Error = ScheduleError;

    fn try_from(doc: HourTimeRangeDoc) -> Result<Self, Self::Error> {
        Self::new(
            doc.start_hour,
            doc.end_hour,
            doc.hourly_interval,
            doc.frequency,
        )
    }
}

#[cfg(feature = "serde")]
impl From<HourTimeRange> for HourTimeRangeDoc {
    fn from(range: HourTimeRange) -> Self {
        Self {
            start_hour: range.start,
            end_hour: range.end,
            hourly_interval: range.interval,
            frequency: range.mode,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct LimitsIntervalDoc {
    start: DateTime,
    #[serde(default)]
    end: Option<DateTime>,
}

#[cfg(feature = "serde")]
impl TryFrom<LimitsIntervalDoc> for LimitsInterval {
    type Error = ScheduleError;

    fn try_from(doc: LimitsIntervalDoc) -> Result<Self, Self::Error> {
        Self::new(doc.start, doc.end)
    }
}

#[cfg(feature = "serde")]
impl From<LimitsInterval> for LimitsIntervalDoc {
    fn from(limits: LimitsInterval) -> Self {
        Self {
            start: limits.start,
            end: limits.end,
        }
    }
}
