use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Europe::Warsaw;
use chrono_tz::Tz;
use roomguru_calendar::{day_bounds, is_same_day, start_of_day};

/// Hourly instants in Warsaw starting at local midnight of `year-month-day`.
fn hourly(year: i32, month: u32, day: u32, hours: i64) -> Vec<DateTime<Tz>> {
    let start = Warsaw.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap();
    (0..hours)
        .map(|h| (start.with_timezone(&Utc) + Duration::hours(h)).with_timezone(&Warsaw))
        .collect()
}

/// Sizes of the runs of consecutive instants that share a day.
fn class_sizes(instants: &[DateTime<Tz>]) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut run = 0;
    for (i, instant) in instants.iter().enumerate() {
        if i > 0 && !is_same_day(&instants[i - 1], instant) {
            sizes.push(run);
            run = 0;
        }
        run += 1;
    }
    if run > 0 {
        sizes.push(run);
    }
    sizes
}

#[test]
fn same_day_partitions_spring_forward() {
    // 2015-03-29 has 23 hours in Warsaw.
    let instants = hourly(2015, 3, 28, 24 + 23 + 24);
    assert_eq!(class_sizes(&instants), vec![24, 23, 24]);
}

#[test]
fn same_day_partitions_fall_back() {
    // 2015-10-25 has 25 hours in Warsaw.
    let instants = hourly(2015, 10, 24, 24 + 25 + 24);
    assert_eq!(class_sizes(&instants), vec![24, 25, 24]);
}

#[test]
fn same_day_is_reflexive_and_symmetric() {
    let instants = hourly(2015, 10, 24, 72);
    for a in &instants {
        assert!(is_same_day(a, a));
        for b in &instants {
            assert_eq!(is_same_day(a, b), is_same_day(b, a));
        }
    }
}

#[test]
fn classes_agree_with_day_bounds() {
    for instant in hourly(2015, 3, 28, 72).iter().chain(hourly(2015, 10, 24, 73).iter()) {
        let bounds = day_bounds(instant);
        assert!(bounds.contains(instant));
        assert!(is_same_day(bounds.min(), instant));
        assert!(is_same_day(bounds.max(), instant));
        assert_eq!(start_of_day(instant), *bounds.min());
        assert!(!is_same_day(&(*bounds.max() + Duration::seconds(1)), instant));
    }
}
