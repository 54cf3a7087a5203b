//! Pixel driver port — pushes one color to every element of the fixture.

use nightglow_domain::color::Rgb;

/// Writes a frame to the physical strip.
///
/// Implementations are synchronous and expected to eventually succeed; the
/// core consumes no status from them.
pub trait PixelDriver {
    /// Set every pixel to `color` and commit the frame.
    fn set_all(&mut self, color: Rgb);
}

impl<T: PixelDriver + ?Sized> PixelDriver for Box<T> {
    fn set_all(&mut self, color: Rgb) {
        (**self).set_all(color);
    }
}
