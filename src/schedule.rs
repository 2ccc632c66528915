use chrono::{DateTime, Duration, FixedOffset, Timelike};

/// One notification in the morning, between 06:30 and 07:29.
pub fn is_morning_window(now: DateTime<FixedOffset>) -> bool {
    (now.hour() == 6 && now.minute() >= 30) || (now.hour() == 7 && now.minute() < 30)
}

/// One notification in the half-hour block starting one hour before sunset,
/// rounded down to the nearest half hour. Fires only on the exact opening
/// minute of the block, so a cron running every few minutes sends once.
pub fn is_sunset_block(now: DateTime<FixedOffset>, sunset: DateTime<FixedOffset>) -> bool {
    let ahead = sunset - Duration::hours(1);
    let block_minute = if ahead.minute() < 30 { 0 } else { 30 };
    let target = truncate_to_minute(ahead).with_minute(block_minute).unwrap();
    now < sunset && truncate_to_minute(now) == target
}

pub fn should_notify(now: DateTime<FixedOffset>, sunset: DateTime<FixedOffset>, force: bool) -> bool {
    force || is_morning_window(now) || is_sunset_block(now, sunset)
}

fn truncate_to_minute(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    t.with_second(0).unwrap().with_nanosecond(0).unwrap()
}
