//! Night window — the daily time range during which motion turns the light on.

use chrono::NaiveTime;

use crate::time::{DAY_MS, millis_of_day};

/// Daily window expressed in milliseconds since midnight.
///
/// When `start` is later than `end` the window wraps across midnight
/// (e.g. 16:00 → 08:00), which is the usual configuration. A window with
/// `start <= end` is treated as a same-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    start_ms: i64,
    end_ms: i64,
    utc_offset_ms: i64,
}

impl NightWindow {
    /// Window between two times of day, evaluated in UTC.
    #[must_use]
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start_ms: millis_of_day(start),
            end_ms: millis_of_day(end),
            utc_offset_ms: 0,
        }
    }

    /// Evaluate timestamps shifted by a fixed UTC offset.
    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_ms = i64::from(minutes) * 60_000;
        self
    }

    /// Milliseconds since local midnight for an epoch timestamp.
    ///
    /// Any input, negative included, reduces to a value in `0..DAY_MS`.
    #[must_use]
    pub fn time_of_day_ms(&self, timestamp_ms: i64) -> i64 {
        timestamp_ms
            .saturating_add(self.utc_offset_ms)
            .rem_euclid(DAY_MS)
    }

    /// Whether `timestamp_ms` (milliseconds since the Unix epoch) falls at night.
    #[must_use]
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        let now = self.time_of_day_ms(timestamp_ms);
        if self.start_ms > self.end_ms {
            now > self.start_ms || now < self.end_ms
        } else {
            now > self.start_ms && now < self.end_ms
        }
    }
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start_ms: 16 * 3_600_000,
            end_ms: 8 * 3_600_000,
            utc_offset_ms: 0,
        }
    }
}
