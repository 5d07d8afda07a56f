use chrono::{Local, NaiveDateTime, TimeZone, Utc};

/// Resolves a wall-clock date time against the current local time zone
/// and returns the corresponding epoch millisecond timestamp.
///
/// The zone lookup happens exactly once, at the moment of the call. A
/// wall-clock time that does not exist locally (DST gap) falls back to
/// a UTC interpretation.
pub fn to_epoch_millis(date_time: &NaiveDateTime) -> i64 {
    match Local.from_local_datetime(date_time).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => date_time.and_utc().timestamp_millis(),
    }
}

/// Converts an epoch millisecond timestamp back to a wall-clock date
/// time in the current local time zone.
pub fn from_epoch_millis(millis: i64) -> NaiveDateTime {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.naive_local(),
        None => Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.naive_utc())
            .unwrap_or_default(),
    }
}
