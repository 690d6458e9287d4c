//! Host calendar capability: time zone and week-start lookup.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Weekday};
use chrono_tz::Tz;

use crate::calculus::{add_days, start_of_day};
use crate::error::CalendarError;

/// Calendar-system knowledge the week carousel delegates to.
pub trait WeekCalendar: Send + Sync {
    /// Zone in which calendar days are reckoned.
    fn time_zone(&self) -> Tz;

    /// Start of the first day of the week containing `date`, where weeks
    /// begin on `first_weekday`.
    fn start_of_week(&self, date: &DateTime<Tz>, first_weekday: Weekday) -> DateTime<Tz>;
}

/// Proleptic Gregorian calendar in a fixed IANA time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GregorianCalendar {
    time_zone: Tz,
}

impl GregorianCalendar {
    pub fn new(time_zone: Tz) -> Self {
        Self { time_zone }
    }

    /// Looks up the zone by IANA name, e.g. `"Europe/Warsaw"`.
    pub fn from_name(name: &str) -> Result<Self, CalendarError> {
        let time_zone = name
            .parse::<Tz>()
            .map_err(|_| CalendarError::InvalidTimeZone(name.to_string()))?;
        Ok(Self::new(time_zone))
    }
}

impl Default for GregorianCalendar {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl WeekCalendar for GregorianCalendar {
    fn time_zone(&self) -> Tz {
        self.time_zone
    }

    fn start_of_week(&self, date: &DateTime<Tz>, first_weekday: Weekday) -> DateTime<Tz> {
        let local = date.with_timezone(&self.time_zone);
        let offset = days_since(local.weekday(), first_weekday);
        start_of_day(&add_days(&start_of_day(&local), -offset))
    }
}

/// Parses an English weekday name such as `"monday"` or `"Mon"`.
pub fn parse_weekday(name: &str) -> Result<Weekday, CalendarError> {
    Weekday::from_str(name.trim()).map_err(|_| CalendarError::InvalidWeekday(name.to_string()))
}

fn days_since(day: Weekday, first_weekday: Weekday) -> i64 {
    let day = i64::from(day.num_days_from_monday());
    let first = i64::from(first_weekday.num_days_from_monday());
    (day - first).rem_euclid(7)
}
