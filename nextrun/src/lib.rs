//! nextrun: execution times for job schedules.
//!
//! Computes when a once, daily, weekly or monthly job would run, bounded by a
//! validity window and a result cap, and labels each instant with a localized
//! description. Pure computation: the anchor date is part of the input and no
//! clock is read.
//!
//! # Examples
//!
//! ```
//! use jiff::civil::{date, time};
//! use nextrun::{create_schedule, Configuration, DailySchedule, HourTimeRange, LimitsInterval};
//!
//! let anchor = date(2024, 1, 1).at(0, 0, 0, 0);
//! let config = Configuration::daily(
//!     anchor,
//!     LimitsInterval::bounded(anchor, date(2024, 1, 1).at(23, 59, 59, 0)).unwrap(),
//!     DailySchedule::across(HourTimeRange::every(time(9, 0, 0, 0), time(11, 0, 0, 0), 1).unwrap()),
//! );
//! let runs = create_schedule(&config).unwrap();
//! assert_eq!(runs.len(), 3);
//! assert_eq!(runs[0].execution_time, date(2024, 1, 1).at(9, 0, 0, 0));
//! ```

pub mod config;
pub mod describe;
pub mod error;
pub mod eval;
pub mod generator;
pub mod hours;
pub mod locale;
pub mod schedule;
pub mod values;

pub use config::{
    Configuration, DailySchedule, Frequency, MonthlyDaySchedule, MonthlyOrdinalSchedule,
    OnceSchedule, Ordinal, WeekOption, Weekday, WeeklySchedule,
};
pub use describe::describe;
pub use error::ScheduleError;
pub use eval::next_weekday_on_or_after;
pub use generator::{generate_executions, validate, Engine, DEFAULT_MAX_RESULTS};
pub use hours::{expand_hours, HourSteps};
pub use locale::{Catalog, Locale, MessageKey};
pub use schedule::{create_schedule, create_schedule_with, ScheduleOutput, ScheduleType};
pub use values::{FrequencyMode, HourTimeRange, LimitsInterval};
