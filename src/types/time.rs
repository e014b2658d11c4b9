//! Timestamps for order creation and update times.
//!
//! Timestamps are plain milliseconds since the Unix epoch. The book only
//! reads the wall clock when a caller omits the timestamp.

use chrono::{DateTime, Utc};

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Current wall-clock time in milliseconds.
///
/// Clocks set before 1970 read as 0.
pub fn now() -> Timestamp {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Render a timestamp in a ctime-like layout, e.g. `Thu Jan  1 00:00:10 1970` (UTC).
///
/// Values outside chrono's representable range render as the raw number.
pub fn format_timestamp(ts: Timestamp) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| ts.to_string())
}
