//! Color renderer — turns a brightness value into a frame on the strip.

use nightglow_domain::color::{Rgb, dim, gamma_correct};

use crate::ports::PixelDriver;

/// Dims a fixed base color and writes it to every pixel.
pub struct ColorRenderer<D> {
    driver: D,
    base: Rgb,
    gamma_correction: bool,
}

impl<D: PixelDriver> ColorRenderer<D> {
    /// Create a renderer writing `base` (dimmed) through `driver`.
    pub fn new(driver: D, base: Rgb) -> Self {
        Self {
            driver,
            base,
            gamma_correction: false,
        }
    }

    /// Enable or disable gamma correction after dimming.
    #[must_use]
    pub fn with_gamma_correction(mut self, enabled: bool) -> Self {
        self.gamma_correction = enabled;
        self
    }

    /// Color shown for `brightness`, clamped into `0..=255`.
    #[must_use]
    pub fn color_for(&self, brightness: i32) -> Rgb {
        let level = u8::try_from(brightness.clamp(0, 255)).unwrap_or(u8::MAX);
        let color = dim(self.base, level);
        if self.gamma_correction {
            gamma_correct(color)
        } else {
            color
        }
    }

    /// Write the color for `brightness` to the whole fixture.
    pub fn render(&mut self, brightness: i32) {
        let color = self.color_for(brightness);
        tracing::trace!(
            brightness,
            r = color.r,
            g = color.g,
            b = color.b,
            "rendering frame"
        );
        self.driver.set_all(color);
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
