//! Localization: per-locale message templates, date/time patterns and words.
//!
//! Templates use `{name}` placeholders. Lookups fall back to [`Locale::EnUs`]
//! when a locale has no entry for a key.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use jiff::civil::{Date, Time};

use crate::config::{Ordinal, WeekOption, Weekday};
use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    EnUs,
    EnGb,
    EsEs,
}

impl Locale {
    pub const FALLBACK: Locale = Locale::EnUs;

    pub fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::EsEs => "es-ES",
        }
    }

    fn is_spanish(self) -> bool {
        self == Self::EsEs
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(Self::EnUs),
            "en-gb" => Ok(Self::EnGb),
            "es-es" | "es" => Ok(Self::EsEs),
            _ => Err(ScheduleError::argument(format!("unsupported locale: {s}"))),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Locale {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Locale {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Template keys in the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Once,
    DailyOnce,
    DailyRange,
    Weekly,
    MonthlyDay,
    MonthlyOrdinal,
    /// Sentence appended to every description: when and from which anchor.
    Usage,
    /// `strftime` pattern for dates.
    DateFormat,
    /// `strftime` pattern for times of day.
    TimeFormat,
}

/// Key → template table per locale, with caller overrides.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    overrides: HashMap<(Locale, MessageKey), String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one template for one locale.
    pub fn with_template(
        mut self,
        locale: Locale,
        key: MessageKey,
        template: impl Into<String>,
    ) -> Self {
        self.overrides.insert((locale, key), template.into());
        self
    }

    pub fn template(&self, locale: Locale, key: MessageKey) -> &str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::FALLBACK, key))
            .unwrap_or_default()
    }

    fn lookup(&self, locale: Locale, key: MessageKey) -> Option<&str> {
        self.overrides
            .get(&(locale, key))
            .map(String::as_str)
            .or_else(|| builtin(locale, key))
    }

    /// Render `key` substituting `{name}` placeholders from `args`.
    pub fn render(&self, locale: Locale, key: MessageKey, args: &[(&str, &str)]) -> String {
        fill(self.template(locale, key), args)
    }

    pub fn format_date(&self, locale: Locale, date: Date) -> Result<String, ScheduleError> {
        jiff::fmt::strtime::format(self.template(locale, MessageKey::DateFormat), date)
            .map_err(|e| ScheduleError::argument(format!("cannot format date {date}: {e}")))
    }

    pub fn format_time(&self, locale: Locale, time: Time) -> Result<String, ScheduleError> {
        jiff::fmt::strtime::format(self.template(locale, MessageKey::TimeFormat), time)
            .map_err(|e| ScheduleError::argument(format!("cannot format time {time}: {e}")))
    }
}

fn builtin(locale: Locale, key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    match (locale, key) {
        (Locale::EnUs, Once) => Some("Occurs once."),
        (Locale::EnUs, DailyOnce) => Some("Occurs once at {start}."),
        (Locale::EnUs, DailyRange) => Some("Occurs every day from {start} to {end}."),
        (Locale::EnUs, Weekly) => Some("Occurs every {interval} week(s) on {days}."),
        (Locale::EnUs, MonthlyDay) => Some("Occurs on day {day} of every {interval} month(s)."),
        (Locale::EnUs, MonthlyOrdinal) => {
            Some("Occurs on the {ordinal} {weekday} of every {interval} month(s).")
        }
        (Locale::EnUs, Usage) => {
            Some("Schedule will be used on {date} at {time} starting on {anchor}.")
        }
        (Locale::EnUs, DateFormat) => Some("%-m/%-d/%Y"),
        (Locale::EnUs, TimeFormat) => Some("%-I:%M %p"),

        // British English shares the sentences; only the patterns differ.
        (Locale::EnGb, DateFormat) => Some("%d/%m/%Y"),
        (Locale::EnGb, TimeFormat) => Some("%H:%M"),
        (Locale::EnGb, _) => None,

        (Locale::EsEs, Once) => Some("Ocurre una vez."),
        (Locale::EsEs, DailyOnce) => Some("Ocurre una vez a las {start}."),
        (Locale::EsEs, DailyRange) => {
            Some("Ocurre todos los días desde las {start} hasta las {end}.")
        }
        (Locale::EsEs, Weekly) => Some("Ocurre cada {interval} semana(s) los {days}."),
        (Locale::EsEs, MonthlyDay) => Some("Ocurre el día {day} de cada {interval} mes(es)."),
        (Locale::EsEs, MonthlyOrdinal) => {
            Some("Ocurre el {ordinal} {weekday} de cada {interval} mes(es).")
        }
        (Locale::EsEs, Usage) => {
            Some("El programador se usará el {date} a las {time} empezando el {anchor}.")
        }
        (Locale::EsEs, DateFormat) => Some("%d/%m/%Y"),
        (Locale::EsEs, TimeFormat) => Some("%-H:%M"),
    }
}

/// Substitute `{name}` placeholders in one pass; substituted text is never rescanned.
/// Unknown or unterminated placeholders are kept as written.
fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        let name = &tail[1..close];
        match args.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

pub fn weekday_name(locale: Locale, wd: Weekday) -> &'static str {
    if locale.is_spanish() {
        match wd {
            Weekday::Monday => "lunes",
            Weekday::Tuesday => "martes",
            Weekday::Wednesday => "miércoles",
            Weekday::Thursday => "jueves",
            Weekday::Friday => "viernes",
            Weekday::Saturday => "sábado",
            Weekday::Sunday => "domingo",
        }
    } else {
        match wd {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

pub fn ordinal_word(locale: Locale, ordinal: Ordinal) -> &'static str {
    match (locale.is_spanish(), ordinal) {
        (false, Ordinal::First) => "first",
        (false, Ordinal::Second) => "second",
        (false, Ordinal::Third) => "third",
        (false, Ordinal::Fourth) => "fourth",
        (false, Ordinal::Last) => "last",
        (true, Ordinal::First) => "primer",
        (true, Ordinal::Second) => "segundo",
        (true, Ordinal::Third) => "tercer",
        (true, Ordinal::Fourth) => "cuarto",
        (true, Ordinal::Last) => "último",
    }
}

pub fn week_option_word(locale: Locale, option: WeekOption) -> &'static str {
    match (locale.is_spanish(), option) {
        (_, WeekOption::Day(wd)) => weekday_name(locale, wd),
        (false, WeekOption::Weekday) => "weekday",
        (false, WeekOption::WeekendDay) => "weekend day",
        (false, WeekOption::AnyDay) => "day",
        (true, WeekOption::Weekday) => "día laborable",
        (true, WeekOption::WeekendDay) => "día de fin de semana",
        (true, WeekOption::AnyDay) => "día",
    }
}
