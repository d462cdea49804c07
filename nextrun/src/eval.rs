//! Date calculators: one per frequency family.
//!
//! Every calculator returns ascending instants, restricted to the
//! configuration's validity interval and capped at `max`.

use jiff::civil::{Date, DateTime};
use jiff::ToSpan;
use tracing::trace;

use crate::config::*;
use crate::error::ScheduleError;
use crate::hours::HourSteps;
use crate::values::{HourTimeRange, LimitsInterval};

/// Consecutive months without a candidate day after which a monthly search
/// gives up. Every day-of-month and ordinal recurs within this horizon unless
/// it can never occur for the chosen month interval.
const MAX_MONTH_MISSES: usize = 12;

/// Accumulates accepted instants up to the cap.
struct Collector {
    limits: LimitsInterval,
    max: usize,
    out: Vec<DateTime>,
}

impl Collector {
    fn new(limits: LimitsInterval, max: usize) -> Self {
        Self {
            limits,
            max,
            out: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.out.len() >= self.max
    }

    /// True when the walk has moved past the last day of the window.
    fn is_past_day(&self, day: Date) -> bool {
        self.limits.end().is_some_and(|end| day > end.date())
    }

    fn offer(&mut self, instants: impl IntoIterator<Item = DateTime>) {
        for instant in instants {
            if self.is_full() || self.limits.is_past(instant) {
                break;
            }
            if self.limits.contains(instant) {
                self.out.push(instant);
            }
        }
    }

    fn finish(self) -> Vec<DateTime> {
        self.out
    }
}

/// Hour window and stride of a recurring schedule.
fn resolve_hours(frequency: &Frequency) -> Result<(HourTimeRange, i32), ScheduleError> {
    let range = frequency.hour_range().ok_or_else(|| {
        ScheduleError::argument(format!(
            "an hour range is required for {} schedules",
            frequency.name()
        ))
    })?;
    let interval = frequency.hourly_interval().unwrap_or(range.interval());
    if interval <= 0 {
        return Err(ScheduleError::interval(format!(
            "hourly interval must be positive, got {interval}"
        )));
    }
    Ok((*range, interval))
}

/// The next day, or `None` past the last supported date.
fn tomorrow(day: Date) -> Option<Date> {
    day.tomorrow().ok()
}

fn check_interval(name: &str, value: u32) -> Result<(), ScheduleError> {
    if value == 0 {
        return Err(ScheduleError::interval(format!(
            "{name} must be at least 1, got 0"
        )));
    }
    Ok(())
}

// --- Calendar helpers ---

/// The first date on or after `date` that falls on `weekday`.
pub fn next_weekday_on_or_after(date: Date, weekday: Weekday) -> Result<Date, ScheduleError> {
    if date.weekday() == weekday.to_jiff() {
        return Ok(date);
    }
    date.nth_weekday(1, weekday.to_jiff())
        .map_err(ScheduleError::out_of_range)
}

/// The day matching `option` at position `ordinal` within the month of `date`.
///
/// Returns `None` when the month has fewer matching days than the ordinal asks for.
pub fn ordinal_day_of_month(date: Date, ordinal: Ordinal, option: WeekOption) -> Option<Date> {
    let first = date.first_of_month();
    let month = first.month();
    match (ordinal.position(), option) {
        (Some(n), WeekOption::Day(wd)) => {
            let d = next_weekday_on_or_after(first, wd)
                .ok()?
                .checked_add((7 * (i64::from(n) - 1)).days())
                .ok()?;
            (d.month() == month).then_some(d)
        }
        (Some(n), _) => first
            .series(1.day())
            .take_while(|d| d.month() == month)
            .filter(|d| option.matches(Weekday::from_jiff(d.weekday())))
            .nth(usize::from(n) - 1),
        (None, _) => first
            .last_of_month()
            .series((-1).day())
            .take_while(|d| d.month() == month)
            .find(|d| option.matches(Weekday::from_jiff(d.weekday()))),
    }
}

/// `day` within the month of `date`, or `None` when the month is too short.
pub fn day_of_month(date: Date, day: u8) -> Option<Date> {
    let day = i8::try_from(day).ok()?;
    (day >= 1 && day <= date.days_in_month())
        .then(|| Date::new(date.year(), date.month(), day).ok())
        .flatten()
}

// --- Calculators ---

/// The target alone, or nothing when it falls outside the limits.
pub fn once_times(
    config: &Configuration,
    once: &OnceSchedule,
    max: usize,
) -> Result<Vec<DateTime>, ScheduleError> {
    if once.target < config.current_date {
        return Err(ScheduleError::ConfigurationInPast {
            target: once.target,
            current: config.current_date,
        });
    }
    let mut collector = Collector::new(config.limits, max.min(1));
    collector.offer([once.target]);
    Ok(collector.finish())
}

/// Every day from the current date, each expanded over the hour range or the single time.
pub fn daily_times(
    config: &Configuration,
    daily: &DailySchedule,
    max: usize,
) -> Result<Vec<DateTime>, ScheduleError> {
    let mut collector = Collector::new(config.limits, max);

    if daily.occurs_once {
        let at = daily.once_at.ok_or_else(|| {
            ScheduleError::argument("a time of day is required when a daily schedule occurs once")
        })?;
        let mut day = config.current_date.date();
        while !collector.is_full() && !collector.is_past_day(day) {
            collector.offer([day.to_datetime(at)]);
            let Some(next) = tomorrow(day) else { break };
            day = next;
        }
        return Ok(collector.finish());
    }

    let (range, interval) = resolve_hours(&config.frequency)?;
    let mut day = config.current_date.date();
    while !collector.is_full() && !collector.is_past_day(day) {
        trace!(%day, "daily: expanding hours");
        collector.offer(HourSteps::with_interval(day, range, interval)?);
        let Some(next) = tomorrow(day) else { break };
        day = next;
    }
    Ok(collector.finish())
}

/// Matching weekdays, skipping `week_interval - 1` weeks each time the walk reaches a Monday.
pub fn weekly_times(
    config: &Configuration,
    weekly: &WeeklySchedule,
    max: usize,
) -> Result<Vec<DateTime>, ScheduleError> {
    let days = weekly.sorted_days();
    if days.is_empty() {
        return Ok(Vec::new());
    }
    check_interval("week interval", weekly.week_interval)?;
    let (range, interval) = resolve_hours(&config.frequency)?;
    let skip = (7 * (i64::from(weekly.week_interval) - 1)).days();

    let mut collector = Collector::new(config.limits, max);
    let mut day = config.current_date.date();
    while !collector.is_full() && !collector.is_past_day(day) {
        if days.contains(&Weekday::from_jiff(day.weekday())) {
            trace!(%day, "weekly: matched day");
            collector.offer(HourSteps::with_interval(day, range, interval)?);
        }
        let Some(mut next) = tomorrow(day) else { break };
        if next.weekday() == jiff::civil::Weekday::Monday && weekly.week_interval > 1 {
            match next.checked_add(skip) {
                Ok(skipped) => next = skipped,
                Err(_) => break,
            }
        }
        day = next;
    }
    Ok(collector.finish())
}

/// The ordinal weekday (or day, weekday, weekend day) of every `month_interval`-th month.
pub fn monthly_ordinal_times(
    config: &Configuration,
    monthly: &MonthlyOrdinalSchedule,
    max: usize,
) -> Result<Vec<DateTime>, ScheduleError> {
    monthly_walk(config, monthly.month_interval, max, |month| {
        ordinal_day_of_month(month, monthly.ordinal, monthly.week_option)
    })
}

/// A fixed day of every `month_interval`-th month; months too short for it are skipped.
pub fn monthly_day_times(
    config: &Configuration,
    monthly: &MonthlyDaySchedule,
    max: usize,
) -> Result<Vec<DateTime>, ScheduleError> {
    if !(1..=31).contains(&monthly.day_of_month) {
        return Err(ScheduleError::argument(format!(
            "day of month must be between 1 and 31, got {}",
            monthly.day_of_month
        )));
    }
    monthly_walk(config, monthly.month_interval, max, |month| {
        day_of_month(month, monthly.day_of_month)
    })
}

/// Visit one month every `month_interval` months, starting with the month of
/// the current date, and expand the day `pick` selects in each. Months where
/// `pick` finds nothing are skipped. The walk ends quietly at the last
/// supported month.
fn monthly_walk(
    config: &Configuration,
    month_interval: u32,
    max: usize,
    pick: impl Fn(Date) -> Option<Date>,
) -> Result<Vec<DateTime>, ScheduleError> {
    check_interval("month interval", month_interval)?;
    let (range, interval) = resolve_hours(&config.frequency)?;
    let step = i64::from(month_interval).months();

    let first_day = config.current_date.date();
    let mut collector = Collector::new(config.limits, max);
    let mut month = first_day.first_of_month();
    let mut misses = 0;
    while !collector.is_full() && !collector.is_past_day(month) && misses < MAX_MONTH_MISSES {
        match pick(month) {
            // Already behind the current date in the starting month.
            Some(day) if day < first_day => {}
            Some(day) => {
                trace!(%day, "monthly: candidate");
                misses = 0;
                collector.offer(HourSteps::with_interval(day, range, interval)?);
            }
            None => misses += 1,
        }
        match month.checked_add(step) {
            Ok(following) => month = following,
            Err(_) => break,
        }
    }
    Ok(collector.finish())
}
