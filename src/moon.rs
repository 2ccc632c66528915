use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Mean length of a lunation in days.
const SYNODIC_MONTH: f64 = 29.530_588_67;

/// Days since the new moon of 2000-01-06 18:14 UTC, modulo one synodic
/// month. Accurate to a few hours, which is plenty for a report line.
pub fn moon_age(date: DateTime<FixedOffset>) -> f64 {
    let base = Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap();
    let elapsed = date.with_timezone(&Utc) - base;
    let days = elapsed.num_seconds() as f64 / 86_400.0;
    days.rem_euclid(SYNODIC_MONTH)
}

#[test]
fn test_moon_age() {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    let new_moon = jst.with_ymd_and_hms(2000, 1, 7, 3, 14, 0).unwrap();
    assert!(moon_age(new_moon) < 1e-9);

    let ten_days = new_moon + chrono::Duration::days(10);
    assert!((moon_age(ten_days) - 10.0).abs() < 1e-9);

    let next_cycle = new_moon + chrono::Duration::days(30);
    assert!((moon_age(next_cycle) - (30.0 - SYNODIC_MONTH)).abs() < 1e-6);
}
