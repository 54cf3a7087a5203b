//! Clock port — the monotonic time source behind every animation and deadline.

use std::sync::Arc;

use nightglow_domain::time::Millis;

/// Monotonically non-decreasing millisecond clock.
pub trait Clock {
    /// Milliseconds since the clock's origin.
    fn now_ms(&self) -> Millis;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}
