//! Time and timestamp helpers.
//!
//! Two clocks exist in the system: a **monotonic** millisecond counter that
//! drives every animation and deadline, and the **wall-clock** timestamp
//! embedded in sensor readings (milliseconds since the Unix epoch) which is
//! only ever used for the night-time gate.

use chrono::{NaiveTime, Timelike};

/// Monotonic milliseconds since an arbitrary origin (usually process start).
pub type Millis = u64;

/// Milliseconds in one day.
pub const DAY_MS: i64 = 86_400_000;

/// Milliseconds elapsed since midnight for the given time of day.
#[must_use]
pub fn millis_of_day(time: NaiveTime) -> i64 {
    // Leap seconds report nanoseconds >= 1e9; fold them into the last millisecond.
    let millis = (time.nanosecond() / 1_000_000).min(999);
    i64::from(time.num_seconds_from_midnight()) * 1000 + i64::from(millis)
}

/// Convert milliseconds since midnight back into a [`NaiveTime`].
///
/// Out-of-range values are reduced modulo one day first.
#[must_use]
pub fn time_of_day(millis_of_day: i64) -> NaiveTime {
    let millis = millis_of_day.rem_euclid(DAY_MS);
    let secs = u32::try_from(millis / 1000).unwrap_or_default();
    let nanos = u32::try_from(millis % 1000).unwrap_or_default() * 1_000_000;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).unwrap_or(NaiveTime::MIN)
}
