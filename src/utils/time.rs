//! Schedule time helpers
//!
//! Schedule documents are hand-written, so times arrive either as `HH:MM` or
//! as `H:MMAM` / `H:MM PM`. Everything is normalised to 24-hour `HH:MM`
//! before comparing, at minute granularity.

use chrono::{Local, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static TWELVE_HOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*([AaPp])[Mm]\s*$").expect("valid 12-hour time pattern")
});

static MERIDIEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[ap]m").expect("valid meridiem pattern"));

/// Convert `H:MMAM`/`H:MMPM` to zero-padded 24-hour `HH:MM`.
///
/// Strings without an AM/PM marker are returned as-is. Strings with a marker
/// that do not parse as a valid clock time are also returned unchanged.
pub fn convert_to_24_hour(time: &str) -> String {
    if !MERIDIEM.is_match(time) {
        return time.to_string();
    }

    let Some(caps) = TWELVE_HOUR.captures(time) else {
        tracing::debug!("Unparseable 12-hour time: {:?}", time);
        return time.to_string();
    };

    let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        return time.to_string();
    };
    if !(1..=12).contains(&hour) || minute > 59 {
        tracing::debug!("Out of range 12-hour time: {:?}", time);
        return time.to_string();
    }

    let pm = caps[3].eq_ignore_ascii_case("p");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    format!("{:02}:{:02}", hour, minute)
}

/// Minutes since midnight for a schedule time, if it parses
fn minute_of_day(time: &str) -> Option<u32> {
    let normalized = convert_to_24_hour(time.trim());
    let (hour, minute) = normalized.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    (hour < 24 && minute < 60).then_some(hour * 60 + minute)
}

/// Whether `now` lies within `[arrival, departure]`, both ends inclusive.
///
/// Unparseable bounds, or a departure before the arrival, never match.
pub fn is_time_in_range(now: NaiveTime, arrival: &str, departure: &str) -> bool {
    let (Some(start), Some(end)) = (minute_of_day(arrival), minute_of_day(departure)) else {
        return false;
    };
    let current = now.hour() * 60 + now.minute();
    start <= current && current <= end
}

/// [`is_time_in_range`] against the local wall clock
pub fn is_current_time_in_range(arrival: &str, departure: &str) -> bool {
    is_time_in_range(Local::now().time(), arrival, departure)
}
