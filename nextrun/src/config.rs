//! Schedule configuration model: one variant per frequency family.

use jiff::civil::{DateTime, Time};
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::locale::Locale;
use crate::values::{HourTimeRange, LimitsInterval};

/// A caller-owned schedule configuration. The engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Configuration {
    pub enabled: bool,
    /// Anchor from which generation begins.
    pub current_date: DateTime,
    pub limits: LimitsInterval,
    #[cfg_attr(feature = "serde", serde(default))]
    pub locale: Locale,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub frequency: Frequency,
}

impl Configuration {
    pub fn new(current_date: DateTime, limits: LimitsInterval, frequency: Frequency) -> Self {
        Self {
            enabled: true,
            current_date,
            limits,
            locale: Locale::default(),
            frequency,
        }
    }

    pub fn once(current_date: DateTime, target: DateTime, limits: LimitsInterval) -> Self {
        Self::new(current_date, limits, Frequency::Once(OnceSchedule { target }))
    }

    pub fn daily(current_date: DateTime, limits: LimitsInterval, daily: DailySchedule) -> Self {
        Self::new(current_date, limits, Frequency::Daily(daily))
    }

    pub fn weekly(current_date: DateTime, limits: LimitsInterval, weekly: WeeklySchedule) -> Self {
        Self::new(current_date, limits, Frequency::Weekly(weekly))
    }

    pub fn monthly_ordinal(
        current_date: DateTime,
        limits: LimitsInterval,
        monthly: MonthlyOrdinalSchedule,
    ) -> Self {
        Self::new(current_date, limits, Frequency::MonthlyOrdinal(monthly))
    }

    pub fn monthly_day(
        current_date: DateTime,
        limits: LimitsInterval,
        monthly: MonthlyDaySchedule,
    ) -> Self {
        Self::new(current_date, limits, Frequency::MonthlyDay(monthly))
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Decode a JSON configuration document.
    #[cfg(feature = "serde")]
    pub fn from_json(input: &str) -> Result<Self, crate::ScheduleError> {
        serde_json::from_str(input).map_err(crate::ScheduleError::document)
    }

    /// Encode as a pretty-printed JSON document.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, crate::ScheduleError> {
        serde_json::to_string_pretty(self).map_err(crate::ScheduleError::document)
    }
}

/// The closed set of schedule variants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Frequency {
    Once(OnceSchedule),
    Daily(DailySchedule),
    Weekly(WeeklySchedule),
    MonthlyOrdinal(MonthlyOrdinalSchedule),
    MonthlyDay(MonthlyDaySchedule),
}

impl Frequency {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Once(_) => "once",
            Self::Daily(_) => "daily",
            Self::Weekly(_) => "weekly",
            Self::MonthlyOrdinal(_) => "monthly_ordinal",
            Self::MonthlyDay(_) => "monthly_day",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::Once(_))
    }

    /// Hour window of a recurring variant.
    pub fn hour_range(&self) -> Option<&HourTimeRange> {
        match self {
            Self::Once(_) => None,
            Self::Daily(s) => s.hour_range.as_ref(),
            Self::Weekly(s) => s.hour_range.as_ref(),
            Self::MonthlyOrdinal(s) => s.hour_range.as_ref(),
            Self::MonthlyDay(s) => s.hour_range.as_ref(),
        }
    }

    /// Stride override of a recurring variant.
    pub fn hourly_interval(&self) -> Option<i32> {
        match self {
            Self::Once(_) => None,
            Self::Daily(s) => s.hourly_interval,
            Self::Weekly(s) => s.hourly_interval,
            Self::MonthlyOrdinal(s) => s.hourly_interval,
            Self::MonthlyDay(s) => s.hourly_interval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OnceSchedule {
    #[cfg_attr(feature = "serde", serde(rename = "targetDateTime"))]
    pub target: DateTime,
}

/// Every day, either once at `once_at` or across `hour_range`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DailySchedule {
    #[cfg_attr(feature = "serde", serde(default))]
    pub hour_range: Option<HourTimeRange>,
    /// Overrides the range's stride when present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hourly_interval: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub occurs_once: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub once_at: Option<Time>,
}

impl DailySchedule {
    pub fn once_at(time: Time) -> Self {
        Self {
            occurs_once: true,
            once_at: Some(time),
            ..Self::default()
        }
    }

    pub fn across(hour_range: HourTimeRange) -> Self {
        Self {
            hour_range: Some(hour_range),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeeklySchedule {
    #[cfg_attr(feature = "serde", serde(default))]
    pub hour_range: Option<HourTimeRange>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hourly_interval: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub days_of_week: Vec<Weekday>,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub week_interval: u32,
}

impl WeeklySchedule {
    pub fn new(days_of_week: Vec<Weekday>, week_interval: u32, hour_range: HourTimeRange) -> Self {
        Self {
            hour_range: Some(hour_range),
            hourly_interval: None,
            days_of_week,
            week_interval,
        }
    }

    /// Distinct days in Monday-first order.
    pub fn sorted_days(&self) -> Vec<Weekday> {
        let mut days = self.days_of_week.clone();
        days.sort();
        days.dedup();
        days
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MonthlyOrdinalSchedule {
    #[cfg_attr(feature = "serde", serde(default))]
    pub hour_range: Option<HourTimeRange>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hourly_interval: Option<i32>,
    pub ordinal: Ordinal,
    pub week_option: WeekOption,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub month_interval: u32,
}

impl MonthlyOrdinalSchedule {
    pub fn new(
        ordinal: Ordinal,
        week_option: WeekOption,
        month_interval: u32,
        hour_range: HourTimeRange,
    ) -> Self {
        Self {
            hour_range: Some(hour_range),
            hourly_interval: None,
            ordinal,
            week_option,
            month_interval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MonthlyDaySchedule {
    #[cfg_attr(feature = "serde", serde(default))]
    pub hour_range: Option<HourTimeRange>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hourly_interval: Option<i32>,
    pub day_of_month: u8,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub month_interval: u32,
}

impl MonthlyDaySchedule {
    pub fn new(day_of_month: u8, month_interval: u32, hour_range: HourTimeRange) -> Self {
        Self {
            hour_range: Some(hour_range),
            hourly_interval: None,
            day_of_month,
            month_interval,
        }
    }
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn to_jiff(self) -> jiff::civil::Weekday {
        match self {
            Self::Monday => jiff::civil::Weekday::Monday,
            Self::Tuesday => jiff::civil::Weekday::Tuesday,
            Self::Wednesday => jiff::civil::Weekday::Wednesday,
            Self::Thursday => jiff::civil::Weekday::Thursday,
            Self::Friday => jiff::civil::Weekday::Friday,
            Self::Saturday => jiff::civil::Weekday::Saturday,
            Self::Sunday => jiff::civil::Weekday::Sunday,
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
            jiff::civil::Weekday::Sunday => Self::Sunday,
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Monday),
        "tuesday" | "tue" => Some(Weekday::Tuesday),
        "wednesday" | "wed" => Some(Weekday::Wednesday),
        "thursday" | "thu" => Some(Weekday::Thursday),
        "friday" | "fri" => Some(Weekday::Friday),
        "saturday" | "sat" => Some(Weekday::Saturday),
        "sunday" | "sun" => Some(Weekday::Sunday),
        _ => None,
    }
}

#[cfg(feature = "serde")]
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_weekday(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown weekday: {s}")))
    }
}

/// Which occurrence within the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinal {
    /// 1-based position, `None` for `Last`.
    pub fn position(self) -> Option<u8> {
        match self {
            Self::First => Some(1),
            Self::Second => Some(2),
            Self::Third => Some(3),
            Self::Fourth => Some(4),
            Self::Last => None,
        }
    }
}

/// Day predicate used by ordinal monthly schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekOption {
    Day(Weekday),
    /// Monday through Friday.
    Weekday,
    /// Saturday or Sunday.
    WeekendDay,
    AnyDay,
}

impl WeekOption {
    pub fn matches(self, wd: Weekday) -> bool {
        match self {
            Self::Day(day) => day == wd,
            Self::Weekday => !wd.is_weekend(),
            Self::WeekendDay => wd.is_weekend(),
            Self::AnyDay => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day(day) => day.as_str(),
            Self::Weekday => "weekday",
            Self::WeekendDay => "weekend_day",
            Self::AnyDay => "any_day",
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for WeekOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for WeekOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "weekday" => Ok(Self::Weekday),
            "weekend_day" | "weekendday" => Ok(Self::WeekendDay),
            "any_day" | "anyday" | "day" => Ok(Self::AnyDay),
            other => parse_weekday(other)
                .map(Self::Day)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown week option: {s}"))),
        }
    }
}
