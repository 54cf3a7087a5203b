//! Process clock backed by tokio's monotonic [`Instant`].
//!
//! Going through tokio's clock means paused test time (`start_paused`)
//! drives the whole core deterministically.

use tokio::time::Instant;

use nightglow_domain::time::Millis;

use crate::ports::Clock;

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        Millis::try_from(self.origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn should_start_at_zero() {
        let clock = MonotonicClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn should_follow_tokio_time() {
        let clock = MonotonicClock::new();
        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(clock.now_ms(), 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn should_never_go_backwards() {
        let clock = MonotonicClock::new();
        let mut previous = clock.now_ms();
        for _ in 0..10 {
            tokio::time::advance(Duration::from_millis(7)).await;
            let now = clock.now_ms();
            assert!(now >= previous);
            previous = now;
        }
    }
}
