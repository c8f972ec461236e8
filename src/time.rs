use chrono::{Duration, NaiveTime};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Largest hour or minute field accepted when parsing a clock string
const MAX_CLOCK_FIELD: i64 = 9_999;

/// Ceiling on a single travel estimate, one year of running
const MAX_TRAVEL_MINUTES: i64 = 366 * MINUTES_PER_DAY;

/// Convert a clock string to minutes since midnight
///
/// Accepts either a combined date-time (`2024-01-01T06:15:00`, only the part
/// after the first `T` is read) or a bare `HH:MM[...]` string. Seconds,
/// fractions and offsets after the minute digits are ignored.
///
/// Anything unparseable yields `0`, as do negative fields and fields above
/// 9999. Callers treat that as a real midnight
/// departure, not as "unknown".
#[must_use]
pub fn parse_clock_minutes(s: &str) -> i64 {
    try_parse_clock_minutes(s).unwrap_or(0)
}

fn try_parse_clock_minutes(s: &str) -> Option<i64> {
    let clock = match s.split_once('T') {
        Some((_, clock)) => clock,
        None => s,
    };
    let (hour, rest) = clock.split_once(':')?;
    let hour: i64 = hour.trim().parse().ok()?;

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let minute: i64 = rest[..digits_end].parse().ok()?;

    let in_range = |field: i64| (0..=MAX_CLOCK_FIELD).contains(&field);
    if !in_range(hour) || !in_range(minute) {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Format minutes since midnight as `HH:MM`, wrapping into a single day
#[must_use]
pub fn format_clock(minutes: i64) -> String {
    let wrapped = Duration::minutes(minutes.rem_euclid(MINUTES_PER_DAY));
    (NaiveTime::MIN + wrapped).format("%H:%M").to_string()
}

/// Shift a departure string by `delay_minutes`, returning the new `HH:MM` value
///
/// The current value is re-read on every call, so repeated shifts compound.
#[must_use]
pub fn shift_departure(departure: &str, delay_minutes: i64) -> String {
    format_clock(parse_clock_minutes(departure).saturating_add(delay_minutes))
}

/// Estimated whole minutes to cover `length_km` at `speed_kmph`, never below `floor_minutes`
///
/// Non-positive (or NaN) speeds return the floor directly. Estimates are
/// capped at one year so arrival arithmetic stays well inside `i64`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn travel_minutes(speed_kmph: f64, length_km: f64, floor_minutes: i64) -> i64 {
    if speed_kmph.is_nan() || speed_kmph <= 0.0 {
        return floor_minutes;
    }
    let minutes = (length_km / speed_kmph * 60.0).trunc();
    if minutes.is_nan() {
        return floor_minutes;
    }
    (minutes.min(MAX_TRAVEL_MINUTES as f64) as i64).max(floor_minutes)
}
