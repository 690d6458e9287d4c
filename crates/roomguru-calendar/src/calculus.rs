//! Stateless date arithmetic.
//!
//! Every function takes instants by reference and returns new values; none of
//! them reads the system clock. Functions that need "now" take a [`Clock`].
//!
//! Boundary arithmetic is measured from the Unix epoch. Day-granular results
//! are therefore aligned to UTC midnight; use [`start_of_day`] and
//! [`day_bounds`] for local calendar days.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::clock::Clock;
use crate::granularity::{Granularity, Interpolation};
use crate::range::DayRange;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

// Far beyond the representable range, small enough that step arithmetic
// cannot overflow i128.
const MAX_STEP_NANOS: f64 = 1e30;

/// Rounds `instant` to a multiple of `granularity` using `interpolation`.
///
/// `Interpolation::None` returns the instant unchanged.
pub fn round_to<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    granularity: Granularity,
    interpolation: Interpolation,
) -> DateTime<Tz> {
    if interpolation == Interpolation::None {
        return instant.clone();
    }
    let unit = i128::from(granularity.duration_seconds()) * NANOS_PER_SECOND;
    let rounded = interpolation.round_multiple(epoch_nanos(instant), unit);
    from_epoch_nanos(rounded, &instant.timezone())
}

/// First `granularity * multiplier` boundary strictly after `instant`.
///
/// An instant already on a boundary moves to the following one. A step that
/// is not positive, or shorter than a nanosecond, leaves the instant as is.
pub fn next_boundary<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    granularity: Granularity,
    multiplier: f64,
) -> DateTime<Tz> {
    let Some(step) = step_nanos(granularity, multiplier) else {
        return instant.clone();
    };
    let timestamp = epoch_nanos(instant);
    let next = timestamp - timestamp.rem_euclid(step) + step;
    from_epoch_nanos(next, &instant.timezone())
}

/// Last `granularity * multiplier` boundary strictly before `instant`.
///
/// An instant exactly on a boundary never returns itself: it steps back one
/// more full period.
pub fn previous_boundary<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    granularity: Granularity,
    multiplier: f64,
) -> DateTime<Tz> {
    let Some(step) = step_nanos(granularity, multiplier) else {
        return instant.clone();
    };
    let timestamp = epoch_nanos(instant);
    let remainder = timestamp.rem_euclid(step);
    let mut previous = timestamp - remainder;
    if remainder == 0 {
        previous -= step;
    }
    from_epoch_nanos(previous, &instant.timezone())
}

/// Whether both instants fall on the same calendar date in `a`'s time zone.
///
/// `b` is converted into `a`'s zone first, so the relation is only symmetric
/// when both carry the same zone. Convert into one zone before comparing
/// instants from different zones.
pub fn is_same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.date_naive() == b.with_timezone(&a.timezone()).date_naive()
}

pub fn is_before<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a < b
}

pub fn is_earlier_than_now<Tz: TimeZone>(instant: &DateTime<Tz>, clock: &dyn Clock) -> bool {
    instant.with_timezone(&Utc) < clock.now()
}

/// Whether `instant` lies on the clock's current day, judged in the
/// instant's own time zone.
pub fn is_today<Tz: TimeZone>(instant: &DateTime<Tz>, clock: &dyn Clock) -> bool {
    let now = clock.now().with_timezone(&instant.timezone());
    is_same_day(instant, &now)
}

/// Whole seconds from `start` to `end`, rounded up.
///
/// Any positive sub-second gap counts as one second.
pub fn seconds_between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> i64 {
    let elapsed = end.naive_utc() - start.naive_utc();
    let whole = elapsed.num_seconds();
    if elapsed - Duration::seconds(whole) > Duration::zero() {
        whole + 1
    } else {
        whole
    }
}

/// First instant of the local calendar day containing `instant`.
pub fn start_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = instant.timezone();
    let midnight = instant.date_naive().and_time(NaiveTime::MIN);

    // Some zones jump over midnight; the day then starts when the gap ends.
    (0..=6)
        .map(|half_hours| midnight + Duration::minutes(30 * half_hours))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .unwrap_or_else(|| instant.clone())
}

/// Start and end of the local calendar day containing `instant`.
///
/// The end is the last whole second of the day.
pub fn day_bounds<Tz: TimeZone>(instant: &DateTime<Tz>) -> DayRange<Tz> {
    let start = start_of_day(instant);
    let next = start_of_day(&add_days(&start, 1));
    DayRange::new(start, next - Duration::seconds(1))
}

/// Moves `instant` by whole calendar days, keeping the local wall-clock time.
///
/// When the target wall-clock time does not exist (DST gap) the shift falls
/// back to `days * 24h`.
pub fn add_days<Tz: TimeZone>(instant: &DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let tz = instant.timezone();
    Duration::try_days(days)
        .and_then(|delta| {
            let shifted = instant.naive_local().checked_add_signed(delta)?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .or_else(|| instant.clone().checked_add_signed(delta))
        })
        .unwrap_or_else(|| saturated(days < 0, &tz))
}

pub fn next_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    add_days(instant, 1)
}

pub fn previous_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    add_days(instant, -1)
}

fn step_nanos(granularity: Granularity, multiplier: f64) -> Option<i128> {
    let seconds = granularity.duration_seconds() as f64 * multiplier;
    let nanos = (seconds * 1e9).round();
    (nanos.is_finite() && nanos >= 1.0).then(|| nanos.min(MAX_STEP_NANOS) as i128)
}

fn epoch_nanos<Tz: TimeZone>(instant: &DateTime<Tz>) -> i128 {
    i128::from(instant.timestamp()) * NANOS_PER_SECOND
        + i128::from(instant.timestamp_subsec_nanos())
}

fn from_epoch_nanos<Tz: TimeZone>(nanos: i128, tz: &Tz) -> DateTime<Tz> {
    let seconds = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok();
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    match seconds.and_then(|seconds| DateTime::from_timestamp(seconds, subsec)) {
        Some(utc) => utc.with_timezone(tz),
        None => saturated(nanos < 0, tz),
    }
}

fn saturated<Tz: TimeZone>(low: bool, tz: &Tz) -> DateTime<Tz> {
    let bound = if low {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };
    bound.with_timezone(tz)
}
