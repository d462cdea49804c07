//! Orchestration: validate, dispatch by variant, cap and order the results.

use jiff::civil::DateTime;
use tracing::debug;

use crate::config::{Configuration, Frequency};
use crate::error::ScheduleError;
use crate::eval;
use crate::locale::Catalog;

/// Results returned per call unless configured otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 12;

/// Upper bound on a configured result cap.
pub const MAX_RESULTS_CEILING: usize = 1000;

/// Engine-wide settings: the result cap and the message catalog.
#[derive(Debug, Clone)]
pub struct Engine {
    max_results: usize,
    catalog: Catalog,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            catalog: Catalog::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result cap, clamped to `1..=MAX_RESULTS_CEILING`.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max.clamp(1, MAX_RESULTS_CEILING);
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Execution instants for `config`, ascending and deduplicated.
    ///
    /// A disabled configuration yields an empty list.
    pub fn generate_executions(
        &self,
        config: &Configuration,
    ) -> Result<Vec<DateTime>, ScheduleError> {
        if !config.enabled {
            debug!("configuration disabled, nothing to generate");
            return Ok(Vec::new());
        }
        let max = self.max_results;
        let mut times = match &config.frequency {
            Frequency::Once(once) => eval::once_times(config, once, max)?,
            Frequency::Daily(daily) => eval::daily_times(config, daily, max)?,
            Frequency::Weekly(weekly) => eval::weekly_times(config, weekly, max)?,
            Frequency::MonthlyOrdinal(monthly) => {
                eval::monthly_ordinal_times(config, monthly, max)?
            }
            Frequency::MonthlyDay(monthly) => eval::monthly_day_times(config, monthly, max)?,
        };
        times.sort();
        times.dedup();
        times.truncate(max);
        debug!(
            frequency = config.frequency.name(),
            count = times.len(),
            "generated execution times"
        );
        Ok(times)
    }
}

/// Fails with `ConfigurationDisabled` unless the configuration is enabled.
pub fn validate(config: &Configuration) -> Result<(), ScheduleError> {
    if !config.enabled {
        return Err(ScheduleError::ConfigurationDisabled);
    }
    Ok(())
}

/// [`Engine::generate_executions`] with default settings.
pub fn generate_executions(config: &Configuration) -> Result<Vec<DateTime>, ScheduleError> {
    Engine::default().generate_executions(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DailySchedule, WeeklySchedule, Weekday};
    use crate::values::{HourTimeRange, LimitsInterval};
    use jiff::civil::{date, time};

    fn every_hour_daily() -> Configuration {
        Configuration::daily(
            date(2024, 1, 1).at(0, 0, 0, 0),
            LimitsInterval::unbounded(date(2024, 1, 1).at(0, 0, 0, 0)),
            DailySchedule::across(
                HourTimeRange::every(time(0, 0, 0, 0), time(23, 0, 0, 0), 1).unwrap(),
            ),
        )
    }

    #[test]
    fn disabled_yields_nothing() {
        let config = every_hour_daily().with_enabled(false);
        assert!(generate_executions(&config).unwrap().is_empty());
        assert_eq!(
            validate(&config).unwrap_err(),
            ScheduleError::ConfigurationDisabled
        );
    }

    #[test]
    fn default_cap_is_twelve() {
        let times = generate_executions(&every_hour_daily()).unwrap();
        assert_eq!(times.len(), DEFAULT_MAX_RESULTS);
        assert_eq!(times.last().unwrap(), &date(2024, 1, 1).at(11, 0, 0, 0));
    }

    #[test]
    fn configured_cap_is_clamped() {
        assert_eq!(Engine::new().with_max_results(0).max_results(), 1);
        assert_eq!(
            Engine::new().with_max_results(usize::MAX).max_results(),
            MAX_RESULTS_CEILING
        );
        let engine = Engine::new().with_max_results(3);
        assert_eq!(
            engine.generate_executions(&every_hour_daily()).unwrap().len(),
            3
        );
    }

    #[test]
    fn unbounded_weekly_over_years_is_capped() {
        let config = Configuration::weekly(
            date(2024, 1, 1).at(0, 0, 0, 0),
            LimitsInterval::bounded(
                date(2024, 1, 1).at(0, 0, 0, 0),
                date(2034, 1, 1).at(0, 0, 0, 0),
            )
            .unwrap(),
            WeeklySchedule::new(vec![Weekday::Sunday], 1, HourTimeRange::at(time(7, 0, 0, 0))),
        );
        let times = generate_executions(&config).unwrap();
        assert_eq!(times.len(), 12);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn generation_is_repeatable() {
        let config = every_hour_daily();
        assert_eq!(
            generate_executions(&config).unwrap(),
            generate_executions(&config).unwrap()
        );
    }
}
