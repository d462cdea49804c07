//! Schedule-type facade: pairs a calculator family with the describer and
//! returns `{description, executionTime}` entries.

use jiff::civil::DateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Configuration, Frequency};
use crate::describe::describe;
use crate::error::ScheduleError;
use crate::generator::{self, Engine};

/// One computed execution and its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleOutput {
    pub description: String,
    pub execution_time: DateTime,
}

/// Handler family selected for a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleType {
    Once,
    Recurring,
}

impl ScheduleType {
    /// The handler responsible for `config`'s frequency.
    pub fn for_configuration(config: &Configuration) -> Self {
        if config.frequency.is_recurring() {
            Self::Recurring
        } else {
            Self::Once
        }
    }

    pub fn handles(self, frequency: &Frequency) -> bool {
        match self {
            Self::Once => matches!(frequency, Frequency::Once(_)),
            Self::Recurring => frequency.is_recurring(),
        }
    }

    /// Validate, generate and describe.
    ///
    /// Unlike [`Engine::generate_executions`], a disabled configuration is an
    /// error here.
    pub fn next_execution_times(
        self,
        engine: &Engine,
        config: &Configuration,
    ) -> Result<Vec<ScheduleOutput>, ScheduleError> {
        generator::validate(config)?;
        if !self.handles(&config.frequency) {
            return Err(ScheduleError::unsupported(format!(
                "{self:?} handler cannot process {} configurations",
                config.frequency.name()
            )));
        }
        let times = engine.generate_executions(config)?;
        debug!(handler = ?self, count = times.len(), "describing executions");
        times
            .into_iter()
            .map(|execution_time| {
                Ok(ScheduleOutput {
                    description: describe(
                        engine.catalog(),
                        config.locale,
                        config,
                        execution_time,
                    )?,
                    execution_time,
                })
            })
            .collect()
    }
}

/// Pick the handler for `config` and run it with `engine`.
pub fn create_schedule_with(
    engine: &Engine,
    config: &Configuration,
) -> Result<Vec<ScheduleOutput>, ScheduleError> {
    ScheduleType::for_configuration(config).next_execution_times(engine, config)
}

/// [`create_schedule_with`] using default engine settings.
pub fn create_schedule(config: &Configuration) -> Result<Vec<ScheduleOutput>, ScheduleError> {
    create_schedule_with(&Engine::default(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DailySchedule;
    use crate::locale::Locale;
    use crate::values::{HourTimeRange, LimitsInterval};
    use jiff::civil::{date, time};

    fn anchor() -> DateTime {
        date(2024, 1, 1).at(0, 0, 0, 0)
    }

    fn once_config() -> Configuration {
        Configuration::once(
            anchor(),
            date(2024, 1, 8).at(14, 0, 0, 0),
            LimitsInterval::unbounded(anchor()),
        )
    }

    #[test]
    fn selects_handler_by_variant() {
        assert_eq!(
            ScheduleType::for_configuration(&once_config()),
            ScheduleType::Once
        );
        let daily = Configuration::daily(
            anchor(),
            LimitsInterval::unbounded(anchor()),
            DailySchedule::once_at(time(8, 0, 0, 0)),
        );
        assert_eq!(
            ScheduleType::for_configuration(&daily),
            ScheduleType::Recurring
        );
    }

    #[test]
    fn once_yields_single_described_entry() {
        let out = create_schedule(&once_config()).unwrap();
        assert_eq!(
            out,
            vec![ScheduleOutput {
                description: "Occurs once. Schedule will be used on 1/8/2024 at 2:00 PM \
                              starting on 1/1/2024."
                    .to_string(),
                execution_time: date(2024, 1, 8).at(14, 0, 0, 0),
            }]
        );
    }

    #[test]
    fn disabled_is_an_error_here() {
        let config = once_config().with_enabled(false);
        assert_eq!(
            create_schedule(&config).unwrap_err(),
            ScheduleError::ConfigurationDisabled
        );
    }

    #[test]
    fn mismatched_handler_is_unsupported() {
        let err = ScheduleType::Recurring
            .next_execution_times(&Engine::default(), &once_config())
            .unwrap_err();
        assert_eq!(err.kind(), "unsupported_configuration");
    }

    #[test]
    fn past_target_propagates() {
        let config = Configuration::once(
            anchor(),
            date(2023, 12, 31).at(9, 0, 0, 0),
            LimitsInterval::unbounded(date(2023, 1, 1).at(0, 0, 0, 0)),
        );
        assert_eq!(
            create_schedule(&config).unwrap_err().kind(),
            "configuration_in_past"
        );
    }

    #[test]
    fn descriptions_follow_configuration_locale() {
        let config = Configuration::daily(
            anchor(),
            LimitsInterval::bounded(anchor(), date(2024, 1, 1).at(23, 59, 59, 0)).unwrap(),
            DailySchedule::across(
                HourTimeRange::every(time(9, 0, 0, 0), time(10, 0, 0, 0), 1).unwrap(),
            ),
        )
        .with_locale(Locale::EsEs);
        let out = create_schedule(&config).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[1]
            .description
            .starts_with("Ocurre todos los días desde las 9:00 hasta las 10:00."));
        assert!(out[1].description.contains("a las 10:00"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn output_json_shape() {
        let out = ScheduleOutput {
            description: "x".into(),
            execution_time: date(2024, 1, 8).at(14, 0, 0, 0),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["executionTime"], "2024-01-08T14:00:00");
        assert_eq!(json["description"], "x");
    }
}
