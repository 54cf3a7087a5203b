//! Tween — a time-indexed linear interpolation between two brightness values.
//!
//! A [`Tween`] is a descriptor: its endpoints and timing are fixed at
//! construction and never edited afterwards. Changing the animation means
//! building a new tween with [`Tween::redirect`], which seeds the new start
//! value from what the outgoing tween renders at that instant.
//!
//! All math works on absolute timestamps. A caller that samples late simply
//! gets the value for the later instant; nothing accumulates per call.

use crate::time::Millis;

/// A transition from `start_value` to `end_value` over `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tween {
    start_value: i32,
    end_value: i32,
    /// Unsigned, so a negative duration cannot be constructed.
    duration_ms: u64,
    start_time_ms: Millis,
    step_interval_ms: u64,
    /// Time of the last sample handed out by [`perform_step`](Self::perform_step).
    last_step_ms: Millis,
}

impl Tween {
    /// Create a tween starting at `now_ms`.
    ///
    /// A zero `duration_ms` is legal and resolves to `end_value` on the
    /// next sample.
    #[must_use]
    pub fn new(
        start_value: i32,
        end_value: i32,
        duration_ms: u64,
        now_ms: Millis,
        step_interval_ms: u64,
    ) -> Self {
        Self {
            start_value,
            end_value,
            duration_ms,
            start_time_ms: now_ms,
            step_interval_ms,
            last_step_ms: now_ms,
        }
    }

    /// A finished tween resting at `value`.
    #[must_use]
    pub fn idle(value: i32, step_interval_ms: u64) -> Self {
        Self::new(value, value, 0, 0, step_interval_ms)
    }

    /// Build the tween that replaces `self` at `now_ms`, heading to `end_value`.
    ///
    /// The new start value is the value `self` renders at `now_ms`, so the
    /// hand-over never produces a visible jump.
    #[must_use]
    pub fn redirect(&self, end_value: i32, duration_ms: u64, now_ms: Millis) -> Self {
        Self::new(
            self.sample(now_ms),
            end_value,
            duration_ms,
            now_ms,
            self.step_interval_ms,
        )
    }

    #[must_use]
    pub fn start_value(&self) -> i32 {
        self.start_value
    }

    #[must_use]
    pub fn end_value(&self) -> i32 {
        self.end_value
    }

    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub fn start_time_ms(&self) -> Millis {
        self.start_time_ms
    }

    #[must_use]
    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms
    }

    #[must_use]
    pub fn end_time_ms(&self) -> Millis {
        self.start_time_ms.saturating_add(self.duration_ms)
    }

    /// Whether the tween has reached its end value at `now_ms`.
    #[must_use]
    pub fn is_done(&self, now_ms: Millis) -> bool {
        now_ms >= self.end_time_ms()
    }

    /// Interpolated value at `now_ms`.
    ///
    /// Rounds half up (toward positive infinity) and clamps to the range
    /// spanned by the two endpoints, so repeated calls with the same `now_ms`
    /// return the same value and the result never overshoots.
    #[must_use]
    pub fn sample(&self, now_ms: Millis) -> i32 {
        if self.duration_ms == 0 || self.is_done(now_ms) {
            return self.end_value;
        }

        let elapsed = i128::from(now_ms.saturating_sub(self.start_time_ms));
        let duration = i128::from(self.duration_ms);
        let delta = i128::from(self.end_value) - i128::from(self.start_value);

        let value = i128::from(self.start_value) + round_half_up(delta * elapsed, duration);
        let low = i128::from(self.start_value.min(self.end_value));
        let high = i128::from(self.start_value.max(self.end_value));

        // Clamped between two i32 endpoints, so the conversion cannot fail.
        i32::try_from(value.clamp(low, high)).unwrap_or(self.end_value)
    }

    /// Produce a sample only if a full step interval has passed since the
    /// previous one.
    ///
    /// Returns `None` once the tween is done, and `None` between steps.
    pub fn perform_step(&mut self, now_ms: Millis) -> Option<i32> {
        if self.is_done(now_ms) {
            return None;
        }
        if now_ms.saturating_sub(self.last_step_ms) < self.step_interval_ms {
            return None;
        }
        self.last_step_ms = now_ms;
        Some(self.sample(now_ms))
    }
}

/// `numerator / denominator` rounded half up; `denominator` must be positive.
fn round_half_up(numerator: i128, denominator: i128) -> i128 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: u64 = 33;

    #[test]
    fn should_start_at_start_value() {
        let tween = Tween::new(0, 64, 2000, 1000, STEP);
        assert_eq!(tween.sample(1000), 0);
        assert!(!tween.is_done(1000));
    }

    #[test]
    fn should_reach_end_value_exactly_when_done() {
        let tween = Tween::new(0, 64, 2000, 1000, STEP);
        assert_eq!(tween.end_time_ms(), 3000);
        for now in [3000, 3001, 10_000, u64::MAX] {
            assert!(tween.is_done(now));
            assert_eq!(tween.sample(now), 64);
        }
    }

    #[test]
    fn should_sample_midpoint_halfway() {
        let tween = Tween::new(0, 64, 2000, 0, STEP);
        assert_eq!(tween.sample(1000), 32);

        let down = Tween::new(64, 0, 2000, 0, STEP);
        assert_eq!(down.sample(1000), 32);
    }

    #[test]
    fn should_round_half_up() {
        let up = Tween::new(0, 10, 4, 0, 1);
        assert_eq!(up.sample(1), 3); // 2.5

        let down = Tween::new(10, 0, 4, 0, 1);
        assert_eq!(down.sample(1), 8); // 7.5

        let tween = Tween::new(64, 0, 2000, 0, STEP);
        assert_eq!(tween.sample(16), 63); // 63.488
    }

    #[test]
    fn should_be_idempotent_for_identical_now() {
        let tween = Tween::new(3, 250, 1234, 17, STEP);
        for now in (17..1300).step_by(7) {
            assert_eq!(tween.sample(now), tween.sample(now));
        }
    }

    #[test]
    fn should_increase_monotonically_for_rising_tween() {
        let tween = Tween::new(5, 64, 2000, 100, STEP);
        let mut previous = tween.sample(100);
        for now in 100..=2100 {
            let value = tween.sample(now);
            assert!(value >= previous, "dropped at {now}: {previous} -> {value}");
            assert!((5..=64).contains(&value));
            previous = value;
        }
    }

    #[test]
    fn should_decrease_monotonically_for_falling_tween() {
        let tween = Tween::new(64, 0, 2000, 0, STEP);
        let mut previous = tween.sample(0);
        for now in 0..=2000 {
            let value = tween.sample(now);
            assert!(value <= previous, "rose at {now}: {previous} -> {value}");
            assert!((0..=64).contains(&value));
            previous = value;
        }
    }

    #[test]
    fn should_clamp_to_start_before_start_time() {
        let tween = Tween::new(10, 20, 100, 500, STEP);
        assert_eq!(tween.sample(0), 10);
    }

    #[test]
    fn should_snap_to_end_value_when_duration_is_zero() {
        let tween = Tween::new(0, 64, 0, 500, STEP);
        assert!(tween.is_done(500));
        assert_eq!(tween.sample(500), 64);
        assert_eq!(tween.sample(0), 64);
    }

    #[test]
    fn should_handle_extreme_values_without_overflow() {
        let tween = Tween::new(i32::MIN, i32::MAX, u64::MAX / 2, 0, STEP);
        let value = tween.sample(u64::MAX / 4);
        assert!((-2..=2).contains(&value));
    }

    #[test]
    fn should_only_step_after_a_full_interval() {
        let mut tween = Tween::new(0, 64, 2000, 0, STEP);
        assert_eq!(tween.perform_step(0), None);
        assert_eq!(tween.perform_step(32), None);
        assert_eq!(tween.perform_step(33), Some(tween.sample(33)));
        assert_eq!(tween.perform_step(34), None);
        assert_eq!(tween.perform_step(65), None);
        assert!(tween.perform_step(66).is_some());
    }

    #[test]
    fn should_not_step_once_done() {
        let mut tween = Tween::new(0, 64, 100, 0, STEP);
        assert_eq!(tween.perform_step(100), None);
        assert_eq!(tween.perform_step(5000), None);
        assert_eq!(Tween::idle(0, STEP).perform_step(1_000_000), None);
    }

    #[test]
    fn should_emit_single_sample_after_a_stalled_loop() {
        let mut tween = Tween::new(0, 64, 2000, 0, STEP);
        // A long gap yields one sample at the current position, not a burst.
        assert_eq!(tween.perform_step(1000), Some(32));
        assert_eq!(tween.perform_step(1001), None);
        assert_eq!(tween.perform_step(1033), Some(tween.sample(1033)));
    }

    #[test]
    fn should_seed_redirect_from_rendered_value() {
        let on = Tween::new(0, 64, 2000, 0, STEP);
        let off = on.redirect(0, 2000, 500);
        assert_eq!(off.start_value(), on.sample(500));
        assert_eq!(off.start_value(), 16);
        assert_eq!(off.end_value(), 0);
        assert_eq!(off.start_time_ms(), 500);
        assert_eq!(off.step_interval_ms(), STEP);
        assert_eq!(off.sample(500), 16);
    }

    #[test]
    fn should_rest_at_value_when_idle() {
        let tween = Tween::idle(0, STEP);
        assert!(tween.is_done(0));
        assert_eq!(tween.sample(123), 0);
    }
}
