//! Human-readable descriptions of a schedule at a given execution instant.

use jiff::civil::DateTime;

use crate::config::{Configuration, Frequency};
use crate::error::ScheduleError;
use crate::locale::{self, Catalog, Locale, MessageKey};

/// Describe `config` as executed at `instant`, in `locale`.
pub fn describe(
    catalog: &Catalog,
    locale: Locale,
    config: &Configuration,
    instant: DateTime,
) -> Result<String, ScheduleError> {
    let summary = summarize(catalog, locale, &config.frequency)?;
    let date = catalog.format_date(locale, instant.date())?;
    let time = catalog.format_time(locale, instant.time())?;
    let anchor = catalog.format_date(locale, config.current_date.date())?;
    let usage = catalog.render(
        locale,
        MessageKey::Usage,
        &[
            ("date", date.as_str()),
            ("time", time.as_str()),
            ("anchor", anchor.as_str()),
        ],
    );
    Ok(format!("{summary} {usage}"))
}

/// The frequency-specific first sentence.
fn summarize(
    catalog: &Catalog,
    locale: Locale,
    frequency: &Frequency,
) -> Result<String, ScheduleError> {
    let required_range = || {
        frequency.hour_range().ok_or_else(|| {
            ScheduleError::argument(format!(
                "an hour range is required to describe {} schedules",
                frequency.name()
            ))
        })
    };

    let text = match frequency {
        Frequency::Once(_) => catalog.render(locale, MessageKey::Once, &[]),
        Frequency::Daily(daily) if daily.occurs_once => {
            let at = daily.once_at.ok_or_else(|| {
                ScheduleError::argument("a time of day is required when a daily schedule occurs once")
            })?;
            let start = catalog.format_time(locale, at)?;
            catalog.render(locale, MessageKey::DailyOnce, &[("start", start.as_str())])
        }
        Frequency::Daily(_) => {
            let range = required_range()?;
            let start = catalog.format_time(locale, range.start())?;
            if range.is_single_instant() {
                catalog.render(locale, MessageKey::DailyOnce, &[("start", start.as_str())])
            } else {
                let end = catalog.format_time(locale, range.end())?;
                catalog.render(
                    locale,
                    MessageKey::DailyRange,
                    &[("start", start.as_str()), ("end", end.as_str())],
                )
            }
        }
        Frequency::Weekly(weekly) => {
            required_range()?;
            let days = weekly.sorted_days();
            if days.is_empty() {
                return Err(ScheduleError::argument(
                    "days of week are required to describe weekly schedules",
                ));
            }
            let names: Vec<&str> = days
                .iter()
                .map(|wd| locale::weekday_name(locale, *wd))
                .collect();
            catalog.render(
                locale,
                MessageKey::Weekly,
                &[
                    ("interval", weekly.week_interval.to_string().as_str()),
                    ("days", names.join(", ").as_str()),
                ],
            )
        }
        Frequency::MonthlyOrdinal(monthly) => {
            required_range()?;
            catalog.render(
                locale,
                MessageKey::MonthlyOrdinal,
                &[
                    ("ordinal", locale::ordinal_word(locale, monthly.ordinal)),
                    (
                        "weekday",
                        locale::week_option_word(locale, monthly.week_option),
                    ),
                    ("interval", monthly.month_interval.to_string().as_str()),
                ],
            )
        }
        Frequency::MonthlyDay(monthly) => {
            required_range()?;
            catalog.render(
                locale,
                MessageKey::MonthlyDay,
                &[
                    ("day", monthly.day_of_month.to_string().as_str()),
                    ("interval", monthly.month_interval.to_string().as_str()),
                ],
            )
        }
    };
    Ok(text)
}
