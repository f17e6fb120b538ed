//! Elapsed-time formatting
//!
//! Renders `1d 1h 1m 1s` style strings. Days, hours and minutes are hidden
//! when not positive; seconds are always shown, so a negative interval comes
//! out as e.g. `-5s`.

use chrono::{DateTime, Utc};

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_MINUTE: i64 = 60;

/// Format the time between `start` and `end`
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let millis = (end - start).num_milliseconds();
    format_seconds(millis.div_euclid(1000))
}

/// Format a whole number of seconds
pub fn format_seconds(total: i64) -> String {
    // Truncating division keeps every unit of a negative total at <= 0,
    // which hides the leading units and leaves only the seconds.
    let days = total / SECS_PER_DAY;
    let rest = total - days * SECS_PER_DAY;
    let hours = (rest / SECS_PER_HOUR) % 24;
    let rest = rest - hours * SECS_PER_HOUR;
    let minutes = (rest / SECS_PER_MINUTE) % 60;
    let seconds = rest - minutes * SECS_PER_MINUTE;

    let mut out = String::new();
    for (value, unit) in [(days, 'd'), (hours, 'h'), (minutes, 'm')] {
        if value > 0 {
            out.push_str(&format!("{}{} ", value, unit));
        }
    }
    out.push_str(&format!("{}s", seconds));
    out.trim_end().to_string()
}
