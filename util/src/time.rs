use chrono::Utc;

/// Current time in whole milliseconds since the epoch, the unit every
/// monotonic timestamp in this crate is expressed in.
pub fn now_millis() -> i64 { Utc::now().timestamp_millis() }
