//! Closed intervals of instants.

use chrono::{DateTime, TimeZone};

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRange<Tz: TimeZone> {
    min: DateTime<Tz>,
    max: DateTime<Tz>,
}

impl<Tz: TimeZone> DayRange<Tz> {
    /// Builds a range from two endpoints given in either order.
    pub fn new(a: DateTime<Tz>, b: DateTime<Tz>) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn min(&self) -> &DateTime<Tz> {
        &self.min
    }

    pub fn max(&self) -> &DateTime<Tz> {
        &self.max
    }

    /// Inclusive membership: `min <= instant <= max`.
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.min <= *instant && *instant <= self.max
    }

    pub fn into_bounds(self) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.min, self.max)
    }
}

/// Inclusive membership test, see [`DayRange::contains`].
pub fn contains<Tz: TimeZone>(range: &DayRange<Tz>, instant: &DateTime<Tz>) -> bool {
    range.contains(instant)
}
