use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Renders a timestamp in the class time zone, falling back to UTC for an
/// unknown zone name.
pub fn format_in_zone(timestamp: &DateTime<Utc>, time_zone: &str) -> String {
    match time_zone.parse::<Tz>() {
        Ok(tz) => timestamp
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}

pub fn format_last_attendance(timestamp: Option<&DateTime<Utc>>, time_zone: &str) -> String {
    timestamp
        .map(|ts| format_in_zone(ts, time_zone))
        .unwrap_or_else(|| "Never".to_string())
}
