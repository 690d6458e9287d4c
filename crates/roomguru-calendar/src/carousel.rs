//! Week carousel: a sliding window of days centred on a pivot week.
//!
//! The window holds `2 * span_weeks * 7` consecutive local midnights, starting
//! `span_weeks` weeks before the first day of the pivot's week. It is rebuilt
//! wholesale by [`WeekCarousel::recenter`]; there is no incremental scrolling.
//!
//! # Concurrency
//!
//! `recenter` takes `&mut self`, so within one thread the borrow checker keeps
//! it apart from readers. To share a carousel between threads use
//! [`SharedWeekCarousel`] and hold the write lock while re-centering; a reader
//! that bypassed the lock could otherwise see a half-built window.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Weekday};
use chrono_tz::Tz;
use parking_lot::RwLock;
use serde::Serialize;

use crate::calculus::{add_days, day_bounds, is_same_day};
use crate::calendar::WeekCalendar;
use crate::clock::Clock;
use crate::error::CalendarError;
use crate::format::DayFormatter;
use crate::range::DayRange;

pub const DEFAULT_SPAN_WEEKS: u32 = 4;
pub const DAYS_IN_WEEK: u32 = 7;

/// Carousel shared across threads.
pub type SharedWeekCarousel = Arc<RwLock<WeekCarousel>>;

/// Window shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    /// Weeks shown on each side of the pivot week's first day.
    pub span_weeks: u32,
    /// First day of the week.
    pub week_start: Weekday,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            span_weeks: DEFAULT_SPAN_WEEKS,
            week_start: Weekday::Mon,
        }
    }
}

impl CarouselSettings {
    /// Days on each side of the pivot week start.
    pub fn span_days(&self) -> i64 {
        i64::from(self.span_weeks) * i64::from(DAYS_IN_WEEK)
    }

    /// Number of days in a full window.
    pub fn window_len(&self) -> usize {
        2 * self.span_weeks as usize * DAYS_IN_WEEK as usize
    }
}

/// One carousel cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub date: DateTime<Tz>,
    pub label: String,
    pub is_today: bool,
}

pub struct WeekCarousel {
    settings: CarouselSettings,
    calendar: Arc<dyn WeekCalendar>,
    formatter: Arc<dyn DayFormatter>,
    clock: Arc<dyn Clock>,
    days: Vec<DateTime<Tz>>,
}

impl WeekCarousel {
    /// Creates a carousel centred on the clock's current day.
    pub fn new(
        settings: CarouselSettings,
        calendar: Arc<dyn WeekCalendar>,
        formatter: Arc<dyn DayFormatter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut carousel = Self {
            settings,
            calendar,
            formatter,
            clock,
            days: Vec::with_capacity(settings.window_len()),
        };
        let now = carousel.clock.now();
        carousel.recenter(&now);
        carousel
    }

    /// Rebuilds the window around the week containing `pivot`.
    ///
    /// Pivots on the same local day always produce an identical window.
    pub fn recenter<T: TimeZone>(&mut self, pivot: &DateTime<T>) {
        let pivot = pivot.with_timezone(&self.calendar.time_zone());
        let week_start = self
            .calendar
            .start_of_week(&pivot, self.settings.week_start);
        let span = self.settings.span_days();
        let start = add_days(&week_start, -span);

        self.days.clear();
        self.days
            .extend((0..2 * span).map(|offset| add_days(&start, offset)));

        tracing::debug!(
            "Recentered week carousel on {} ({} days from {})",
            pivot,
            self.days.len(),
            start
        );
    }

    /// Entry at `index` with its short label and today flag.
    pub fn get(&self, index: usize) -> Result<DayEntry, CalendarError> {
        let date = self.day(index)?;
        let now = self.clock.now().with_timezone(&date.timezone());
        Ok(DayEntry {
            date: *date,
            label: self.formatter.short_label(date),
            is_today: is_same_day(date, &now),
        })
    }

    /// Full date label for the day at `index`, formatted on demand.
    pub fn label_for_range(&self, index: usize) -> Result<String, CalendarError> {
        self.day(index).map(|date| self.formatter.full_label(date))
    }

    /// Position of the day containing `date`, if it is in the window.
    pub fn index_of<T: TimeZone>(&self, date: &DateTime<T>) -> Option<usize> {
        let date = date.with_timezone(&self.calendar.time_zone());
        let found = self.days.iter().position(|day| is_same_day(day, &date));
        if found.is_none() {
            tracing::trace!("{} is outside the week carousel", date);
        }
        found
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Read-only view of the window.
    pub fn days(&self) -> &[DateTime<Tz>] {
        &self.days
    }

    /// Index of the first day of the pivot week.
    pub fn pivot_index(&self) -> usize {
        self.settings.span_weeks as usize * DAYS_IN_WEEK as usize
    }

    /// Span from the start of the first day to the end of the last day.
    pub fn window_range(&self) -> Option<DayRange<Tz>> {
        let first = self.days.first()?;
        let last = self.days.last()?;
        let (start, _) = day_bounds(first).into_bounds();
        let (_, end) = day_bounds(last).into_bounds();
        Some(DayRange::new(start, end))
    }

    pub fn settings(&self) -> CarouselSettings {
        self.settings
    }

    pub fn into_shared(self) -> SharedWeekCarousel {
        Arc::new(RwLock::new(self))
    }

    fn day(&self, index: usize) -> Result<&DateTime<Tz>, CalendarError> {
        self.days.get(index).ok_or_else(|| {
            tracing::debug!(
                "Carousel index {} out of range ({} days)",
                index,
                self.days.len()
            );
            CalendarError::IndexOutOfRange {
                index,
                len: self.days.len(),
            }
        })
    }
}

impl std::fmt::Debug for WeekCarousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeekCarousel")
            .field("settings", &self.settings)
            .field("time_zone", &self.calendar.time_zone())
            .field("first", &self.days.first())
            .field("len", &self.days.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::GregorianCalendar;
    use crate::clock::FixedClock;
    use crate::format::PatternFormatter;
    use chrono::{Datelike, Utc};
    use chrono_tz::Europe::Warsaw;

    fn carousel_at(now: DateTime<Utc>, settings: CarouselSettings) -> WeekCarousel {
        WeekCarousel::new(
            settings,
            Arc::new(GregorianCalendar::new(Warsaw)),
            Arc::new(PatternFormatter::default()),
            Arc::new(FixedClock::new(now)),
        )
    }

    fn wednesday_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 4, 29, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_new_centres_on_now() {
        let carousel = carousel_at(wednesday_noon(), CarouselSettings::default());
        assert_eq!(carousel.len(), 56);
        assert_eq!(
            carousel.days()[carousel.pivot_index()],
            Warsaw.with_ymd_and_hms(2015, 4, 27, 0, 0, 0).unwrap()
        );
        assert_eq!(
            carousel.days()[0],
            Warsaw.with_ymd_and_hms(2015, 3, 30, 0, 0, 0).unwrap()
        );
        assert_eq!(
            carousel.days()[55],
            Warsaw.with_ymd_and_hms(2015, 5, 24, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_get_marks_today() {
        let carousel = carousel_at(wednesday_noon(), CarouselSettings::default());
        let today = carousel.index_of(&wednesday_noon()).unwrap();
        assert_eq!(today, 30);

        let entry = carousel.get(today).unwrap();
        assert!(entry.is_today);
        assert_eq!(entry.label, "29");
        assert!(!carousel.get(today + 1).unwrap().is_today);
        assert!(!carousel.get(today - 1).unwrap().is_today);
    }

    #[test]
    fn test_get_out_of_range() {
        let carousel = carousel_at(wednesday_noon(), CarouselSettings::default());
        assert_eq!(
            carousel.get(56),
            Err(CalendarError::IndexOutOfRange { index: 56, len: 56 })
        );
        assert!(carousel.label_for_range(1000).is_err());
    }

    #[test]
    fn test_label_for_range() {
        let carousel = carousel_at(wednesday_noon(), CarouselSettings::default());
        assert_eq!(
            carousel.label_for_range(30).unwrap(),
            "Wednesday, 29 April 2015"
        );
    }

    #[test]
    fn test_custom_span_and_week_start() {
        let settings = CarouselSettings {
            span_weeks: 1,
            week_start: Weekday::Sun,
        };
        let carousel = carousel_at(wednesday_noon(), settings);
        assert_eq!(carousel.len(), 14);
        assert_eq!(carousel.days()[7].weekday(), Weekday::Sun);
        assert_eq!(carousel.days()[7].day(), 26);
    }

    #[test]
    fn test_zero_span_is_empty() {
        let settings = CarouselSettings {
            span_weeks: 0,
            ..CarouselSettings::default()
        };
        let carousel = carousel_at(wednesday_noon(), settings);
        assert!(carousel.is_empty());
        assert!(carousel.window_range().is_none());
        assert!(carousel.index_of(&wednesday_noon()).is_none());
    }

    #[test]
    fn test_window_range() {
        let carousel = carousel_at(wednesday_noon(), CarouselSettings::default());
        let range = carousel.window_range().unwrap();
        assert_eq!(
            *range.min(),
            Warsaw.with_ymd_and_hms(2015, 3, 30, 0, 0, 0).unwrap()
        );
        assert_eq!(
            *range.max(),
            Warsaw.with_ymd_and_hms(2015, 5, 24, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_shared_carousel() {
        let shared = carousel_at(wednesday_noon(), CarouselSettings::default()).into_shared();
        let pivot = Utc.with_ymd_and_hms(2015, 12, 24, 12, 0, 0).unwrap();
        shared.write().recenter(&pivot);
        assert_eq!(shared.read().index_of(&pivot), Some(31));
    }

    #[test]
    fn test_day_entry_serializes() {
        let carousel = carousel_at(wednesday_noon(), CarouselSettings::default());
        let json = serde_json::to_value(carousel.get(30).unwrap()).unwrap();
        assert_eq!(json["label"], "29");
        assert_eq!(json["is_today"], true);
        assert_eq!(json["date"], "2015-04-29T00:00:00+02:00");
    }
}
