//! Lighting configuration — every value the core depends on.

use chrono::NaiveTime;
use serde::Deserialize;

use nightglow_domain::color::HexColor;
use nightglow_domain::error::ValidationError;
use nightglow_domain::night::NightWindow;

/// Actuator kind used by on/off switches.
pub const ON_OFF_ACTUATOR: &str = "TURN_ON_OFF";

/// Configuration for the fixture and the lighting behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Number of addressable pixels on the strip.
    pub pixel_count: u16,
    /// Hue shown at every brightness level.
    pub base_color: HexColor,
    /// Brightness of the fully-on state (0-255).
    pub max_brightness: u8,
    /// Apply the strip gamma curve after dimming.
    pub gamma_correction: bool,
    /// Length of on and off fades, in milliseconds.
    pub animation_duration_ms: u64,
    /// Minimum time between two frames written during a fade, in milliseconds.
    pub animation_step_ms: u64,
    /// Delay between the end of motion and the start of the off fade, in seconds.
    pub follow_up_secs: u64,
    /// Time of day after which motion turns the light on.
    pub night_start: NaiveTime,
    /// Time of day before which motion turns the light on.
    pub night_end: NaiveTime,
    /// Offset applied to sensor timestamps before the night check, in minutes.
    pub utc_offset_minutes: i32,
    /// `deviceId` of the motion sensor this fixture follows.
    pub device_id: String,
    /// Device segment of actuator command topics addressed to this fixture.
    pub actuator_device_id: String,
    /// Actuator kind segment accepted for on/off commands.
    pub actuator_kind: String,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            pixel_count: 60,
            base_color: HexColor::new(0xFF, 0x99, 0x00),
            max_brightness: 64,
            gamma_correction: false,
            animation_duration_ms: 2000,
            animation_step_ms: 33,
            follow_up_secs: 7 * 60,
            night_start: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
            night_end: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            utc_offset_minutes: 0,
            device_id: "nightglow".to_string(),
            actuator_device_id: "nightglow".to_string(),
            actuator_kind: ON_OFF_ACTUATOR.to_string(),
        }
    }
}

impl LightingConfig {
    /// Night window built from the configured thresholds.
    #[must_use]
    pub fn night_window(&self) -> NightWindow {
        NightWindow::new(self.night_start, self.night_end)
            .with_utc_offset_minutes(self.utc_offset_minutes)
    }

    /// Follow-up interval in milliseconds.
    #[must_use]
    pub fn follow_up_ms(&self) -> u64 {
        self.follow_up_secs.saturating_mul(1000)
    }

    /// Check the values the core cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a zero pixel count or a zero
    /// maximum brightness.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pixel_count == 0 {
            return Err(ValidationError::ZeroPixelCount);
        }
        if self.max_brightness == 0 {
            return Err(ValidationError::ZeroBrightness);
        }
        Ok(())
    }
}
