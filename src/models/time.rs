//! Calendar and wall-clock helpers for campaign scheduling.
//!
//! All scheduling decisions are made on local wall-clock dates and hours in
//! the campaign's timezone, then resolved to absolute instants at the edges.
//! Resolution must survive daylight-saving transitions: a local time that
//! falls in a spring-forward gap is rolled forward, and an ambiguous time at
//! the end of daylight saving takes the earlier of the two instants.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Weekday,
};
use chrono_tz::Tz;

/// Snap a date to the next weekday: Saturday and Sunday advance to Monday,
/// Monday through Friday are returned unchanged.
pub fn next_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// Snap a date to the next Monday-to-Thursday day. Friday, Saturday and
/// Sunday all advance to the following Monday.
pub fn next_monday_to_thursday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Fri => date + Duration::days(3),
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// Move a date to the given weekday within its own Sunday-started week.
///
/// The result can be earlier than the input: a Saturday asked for the
/// week's Wednesday moves three days back. Callers must not assume
/// forward motion.
pub fn weekday_in_same_week(date: NaiveDate, target: Weekday) -> NaiveDate {
    let delta =
        target.num_days_from_sunday() as i64 - date.weekday().num_days_from_sunday() as i64;
    date + Duration::days(delta)
}

/// Add `days` business days to a date, skipping Saturdays and Sundays.
/// The starting date itself is never counted.
pub fn add_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = days;
    while remaining > 0 {
        current += Duration::days(1);
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            remaining -= 1;
        }
    }
    current
}

/// Convert a fractional hour-of-day (e.g. `18.5`) to a wall-clock time.
///
/// Scheduling hours are quarter-hour multiples, so the minute component is
/// exact. Out-of-range input falls back to midnight rather than panicking.
pub fn hour_to_time(hour: f64) -> NaiveTime {
    let mut h = hour.floor() as u32;
    let mut m = ((hour - hour.floor()) * 60.0).round() as u32;
    if m >= 60 {
        h += 1;
        m = 0;
    }
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

/// Resolve a naive local date-time to an instant in `tz`.
///
/// Daylight-saving handling:
/// - an ambiguous time (clocks rolled back) resolves to the earlier instant;
/// - a non-existent time (clocks rolled forward) is probed forward in
///   half-hour steps until it lands on a representable local time.
pub fn resolve_local_datetime(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..48 {
                probe += Duration::minutes(30);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(dt) => return dt,
                    LocalResult::Ambiguous(earliest, _) => return earliest,
                    LocalResult::None => continue,
                }
            }
            // Unreachable for real tz data; interpret as UTC rather than loop.
            tz.from_utc_datetime(&naive)
        }
    }
}

/// Resolve a local calendar date and fractional hour to an instant in `tz`.
pub fn resolve_local(tz: Tz, date: NaiveDate, hour: f64) -> DateTime<Tz> {
    resolve_local_datetime(tz, date.and_time(hour_to_time(hour)))
}

/// Shift an instant by whole days while preserving its local wall-clock
/// time. Crossing a daylight-saving boundary changes the absolute distance
/// (23 or 25 hours per crossed transition) but keeps the clock reading.
pub fn shift_days_clock_preserved(dt: DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let naive = dt.naive_local() + Duration::days(days);
    resolve_local_datetime(dt.timezone(), naive)
}
