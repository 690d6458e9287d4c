//! Date calculus and week carousel for Roomguru.
//!
//! Provides pure date arithmetic (rounding, boundary stepping, day ranges)
//! and the sliding window of days behind the booking screen's day picker.

pub mod calculus;
pub mod calendar;
pub mod carousel;
pub mod clock;
pub mod error;
pub mod format;
pub mod granularity;
pub mod range;

pub use calculus::{
    add_days, day_bounds, is_before, is_earlier_than_now, is_same_day, is_today, next_boundary,
    next_day, previous_boundary, previous_day, round_to, seconds_between, start_of_day,
};
pub use calendar::{parse_weekday, GregorianCalendar, WeekCalendar};
pub use carousel::{CarouselSettings, DayEntry, SharedWeekCarousel, WeekCarousel};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CalendarError;
pub use format::{DayFormatter, PatternFormatter};
pub use granularity::{Granularity, Interpolation};
pub use range::{contains, DayRange};

pub use chrono::Weekday;
pub use chrono_tz::Tz;
