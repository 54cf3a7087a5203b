//! Colors and brightness dimming.
//!
//! Dimming scales each channel by `(brightness + 1) / 256`, the same integer
//! math LED strip libraries use, which maps brightness 0 to exact black.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 8-bit RGB color as written to the strip.
pub type Rgb = smart_leds::RGB8;

/// All channels off.
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Dim `color` by `brightness` (0 = off, 255 = full).
#[must_use]
pub fn dim(color: Rgb, brightness: u8) -> Rgb {
    smart_leds::brightness(std::iter::once(color), brightness)
        .next()
        .unwrap_or(BLACK)
}

/// Apply the strip's gamma curve so perceived brightness tracks the value linearly.
#[must_use]
pub fn gamma_correct(color: Rgb) -> Rgb {
    smart_leds::gamma(std::iter::once(color))
        .next()
        .unwrap_or(color)
}

/// A color written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(Rgb);

impl HexColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Rgb { r, g, b })
    }

    #[must_use]
    pub const fn rgb(self) -> Rgb {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidHexColor(s.to_string());
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.r, self.0.g, self.0.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORANGE: Rgb = Rgb {
        r: 0xFF,
        g: 0x99,
        b: 0x00,
    };

    #[test]
    fn should_dim_to_exact_black_at_zero() {
        assert_eq!(dim(ORANGE, 0), BLACK);
        assert_eq!(dim(Rgb { r: 255, g: 255, b: 255 }, 0), BLACK);
    }

    #[test]
    fn should_keep_full_color_at_max_brightness() {
        assert_eq!(dim(ORANGE, 255), ORANGE);
    }

    #[test]
    fn should_scale_channels_by_brightness() {
        // 255 * 65 / 256 = 64, 153 * 65 / 256 = 38
        assert_eq!(dim(ORANGE, 64), Rgb { r: 64, g: 38, b: 0 });
    }

    #[test]
    fn should_keep_black_black_after_gamma() {
        assert_eq!(gamma_correct(BLACK), BLACK);
        assert_eq!(gamma_correct(Rgb { r: 255, g: 255, b: 255 }).r, 255);
    }

    #[test]
    fn should_parse_hex_color_with_and_without_hash() {
        assert_eq!("#ff9900".parse::<HexColor>().unwrap().rgb(), ORANGE);
        assert_eq!("FF9900".parse::<HexColor>().unwrap().rgb(), ORANGE);
    }

    #[test]
    fn should_reject_malformed_hex_color() {
        for input in ["", "#ff99", "#ff99000", "#gg9900", "orange"] {
            assert_eq!(
                input.parse::<HexColor>(),
                Err(ValidationError::InvalidHexColor(input.to_string()))
            );
        }
    }

    #[test]
    fn should_display_as_lowercase_hex() {
        assert_eq!(HexColor::new(0xFF, 0xBF, 0x00).to_string(), "#ffbf00");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let color = HexColor::new(1, 2, 3);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#010203\"");
        let parsed: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, color);
    }

    #[test]
    fn should_fail_deserializing_invalid_color() {
        let result = serde_json::from_str::<HexColor>("\"nope\"");
        assert!(result.is_err());
    }
}
