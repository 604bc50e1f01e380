use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns today's date in the configured timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

/// Calendar date of a stored timestamp in the configured timezone.
pub fn local_date(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// First instant of `date` in `tz`, expressed in UTC.
///
/// When local midnight falls into a DST gap the day starts at the first
/// valid local time after it.
pub fn start_of_day_utc(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = midnight + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
        }
    }
}

/// Half-open UTC range `[start, end)` covering `date` in `tz`.
pub fn day_bounds_utc(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.succ_opt().unwrap_or(date);
    (start_of_day_utc(date, tz), start_of_day_utc(next, tz))
}

/// Parses a `YYYY-MM-DD` query value, falling back to today when absent.
pub fn parse_date_or_today(raw: Option<&str>, tz: &Tz) -> Result<NaiveDate, String> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", value)),
        None => Ok(today_local(tz)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn now_in_timezone_returns_datetime_in_tz() {
        let tz = chrono_tz::Asia::Yangon;
        let result = now_in_timezone(&tz);
        assert_eq!(result.timezone(), tz);
    }

    #[test]
    fn local_date_shifts_late_utc_timestamps_forward() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap();
        assert_eq!(local_date(&ts, &chrono_tz::UTC), date(2025, 3, 1));
        assert_eq!(local_date(&ts, &chrono_tz::Asia::Yangon), date(2025, 3, 2));
    }

    #[test]
    fn day_bounds_cover_local_calendar_day() {
        let (start, end) = day_bounds_utc(date(2025, 3, 2), &chrono_tz::Asia::Yangon);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 1, 17, 30, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 2, 17, 30, 0).unwrap());
    }

    #[test]
    fn day_bounds_handle_dst_gap_at_midnight() {
        // Havana skipped 00:00-01:00 local on 2024-03-10.
        let (start, end) = day_bounds_utc(date(2024, 3, 10), &chrono_tz::America::Havana);
        assert!(start < end);
        assert_eq!((end - start).num_hours(), 23);
    }

    #[test]
    fn parse_date_or_today_validates_format() {
        let tz = chrono_tz::UTC;
        assert_eq!(
            parse_date_or_today(Some("2025-03-01"), &tz).unwrap(),
            date(2025, 3, 1)
        );
        assert_eq!(parse_date_or_today(None, &tz).unwrap(), today_local(&tz));
        assert_eq!(parse_date_or_today(Some(" "), &tz).unwrap(), today_local(&tz));
        assert!(parse_date_or_today(Some("01/03/2025"), &tz).is_err());
    }
}
