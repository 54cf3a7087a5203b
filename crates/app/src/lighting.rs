//! Lighting state machine — decides when the fixture fades on or off.
//!
//! The controller owns exactly two pieces of mutable state: the current
//! [`Tween`] and the pending auto-off deadline. The visible phase
//! ([`LightPhase`]) is never stored; it is derived from the tween and the
//! current time on demand.

use std::fmt;

use nightglow_domain::night::NightWindow;
use nightglow_domain::time::{Millis, time_of_day};
use nightglow_domain::tween::Tween;

use crate::config::LightingConfig;

/// Observable phase of the fixture at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightPhase {
    Off,
    AnimatingOn,
    On,
    AnimatingOff,
}

impl fmt::Display for LightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::AnimatingOn => f.write_str("animating_on"),
            Self::On => f.write_str("on"),
            Self::AnimatingOff => f.write_str("animating_off"),
        }
    }
}

/// Motion- and command-driven brightness controller.
#[derive(Debug, Clone)]
pub struct LightingController {
    max_brightness: i32,
    animation_duration_ms: u64,
    follow_up_ms: u64,
    night: NightWindow,
    tween: Tween,
    off_deadline: Option<Millis>,
}

impl LightingController {
    /// Create a controller resting at brightness 0.
    #[must_use]
    pub fn new(config: &LightingConfig) -> Self {
        Self {
            max_brightness: i32::from(config.max_brightness),
            animation_duration_ms: config.animation_duration_ms,
            follow_up_ms: config.follow_up_ms(),
            night: config.night_window(),
            tween: Tween::idle(0, config.animation_step_ms),
            off_deadline: None,
        }
    }

    /// Fade from the currently rendered brightness to the maximum.
    ///
    /// Clears any pending auto-off deadline.
    pub fn start_on_animation(&mut self, now: Millis) {
        self.retarget(self.max_brightness, now);
        tracing::info!(
            from = self.tween.start_value(),
            to = self.max_brightness,
            "turning lights on"
        );
    }

    /// Fade from the currently rendered brightness to 0.
    ///
    /// Clears any pending auto-off deadline.
    pub fn start_off_animation(&mut self, now: Millis) {
        self.retarget(0, now);
        tracing::info!(from = self.tween.start_value(), "turning lights off");
    }

    fn retarget(&mut self, target: i32, now: Millis) {
        self.tween = self.tween.redirect(target, self.animation_duration_ms, now);
        self.off_deadline = None;
    }

    /// React to a motion sensor reading.
    ///
    /// Motion turns the light on only at night but always cancels a pending
    /// auto-off. The end of motion (re)arms the auto-off deadline.
    pub fn on_motion_event(&mut self, active: bool, timestamp_ms: i64, now: Millis) {
        if active {
            if self.is_night(timestamp_ms) {
                self.start_on_animation(now);
            }
            self.off_deadline = None;
        } else {
            let deadline = now.saturating_add(self.follow_up_ms);
            self.off_deadline = Some(deadline);
            tracing::debug!(
                deadline_ms = deadline,
                minutes_after_start = deadline / 60_000,
                "auto-off scheduled"
            );
        }
    }

    /// React to an explicit on/off command.
    ///
    /// Commands are authoritative: no night-time gate applies.
    pub fn on_remote_command(&mut self, turn_on: bool, now: Millis) {
        if turn_on {
            self.start_on_animation(now);
        } else {
            self.start_off_animation(now);
        }
    }

    /// Start the off fade once the pending deadline has passed.
    ///
    /// Returns `true` when an off fade was started by this call.
    pub fn tick(&mut self, now: Millis) -> bool {
        match self.off_deadline {
            Some(deadline) if now > deadline => {
                tracing::debug!(deadline_ms = deadline, now_ms = now, "auto-off deadline passed");
                self.start_off_animation(now);
                true
            }
            _ => false,
        }
    }

    /// Whether a wall-clock timestamp falls inside the night window.
    #[must_use]
    pub fn is_night(&self, timestamp_ms: i64) -> bool {
        let night = self.night.contains(timestamp_ms);
        tracing::debug!(
            time_of_day = %time_of_day(self.night.time_of_day_ms(timestamp_ms)),
            night,
            "night-time check"
        );
        night
    }

    /// Next animation frame, if one is due.
    pub fn perform_step(&mut self, now: Millis) -> Option<i32> {
        self.tween.perform_step(now)
    }

    /// Phase of the fixture at `now`, derived from the current tween.
    #[must_use]
    pub fn phase(&self, now: Millis) -> LightPhase {
        let heading_on = self.tween.end_value() > 0;
        match (heading_on, self.tween.is_done(now)) {
            (true, true) => LightPhase::On,
            (true, false) => LightPhase::AnimatingOn,
            (false, true) => LightPhase::Off,
            (false, false) => LightPhase::AnimatingOff,
        }
    }

    /// Brightness the fixture shows at `now`.
    #[must_use]
    pub fn current_brightness(&self, now: Millis) -> i32 {
        self.tween.sample(now)
    }

    #[must_use]
    pub fn pending_off_deadline(&self) -> Option<Millis> {
        self.off_deadline
    }

    #[must_use]
    pub fn tween(&self) -> &Tween {
        &self.tween
    }
}
