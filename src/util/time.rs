//! Human-facing timestamp formatting.

use time::{Duration, OffsetDateTime, format_description::FormatItem, macros::format_description};

pub const DAY_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

/// `DD/MM/YYYY HH:mm` in the timestamp's own offset.
pub fn format_day_time(when: OffsetDateTime) -> String {
    when.format(DAY_TIME_FORMAT).unwrap_or_default()
}

/// Coarse relative phrase such as "3 hours ago" or "in a minute".
///
/// Buckets follow the usual "from now" thresholds: under 45 seconds is "a few
/// seconds", under 90 seconds "a minute", then rounded minutes up to 44,
/// hours up to 21, days up to 25, months up to 10, then years.
pub fn relative_time(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let delta = now - then;
    let phrase = describe(delta.abs());
    if delta.is_negative() {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn describe(delta: Duration) -> String {
    let seconds = delta.whole_seconds();
    let minutes = round_div(seconds, 60);
    let hours = round_div(seconds, 3_600);
    let days = round_div(seconds, 86_400);

    if seconds < 45 {
        "a few seconds".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{hours} hours")
    } else if hours < 36 {
        "a day".to_string()
    } else if days < 26 {
        format!("{days} days")
    } else if days < 46 {
        "a month".to_string()
    } else if days < 320 {
        format!("{} months", round_div(days * 100, 3_044).max(2))
    } else if days < 548 {
        "a year".to_string()
    } else {
        format!("{} years", round_div(days * 100, 36_525).max(2))
    }
}

fn round_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}
