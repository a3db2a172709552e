//! Pixel buffer and the strip hardware abstraction.
//!
//! Provides [`PixelBuffer`], the fixed-length frame every animation draws
//! into, and the [`StripDriver`] trait it flushes through.

use crate::BLACK;
use crate::colors;
use crate::types::Pixel;

/// Trait for abstracting LED strip hardware.
///
/// Implement this for your strip driver (RMT, SPI, bit-banged GPIO, etc.) to
/// let the engine push frames to it.
pub trait StripDriver {
    /// Transmits one complete frame, pixel 0 first.
    ///
    /// The strip data line has no failure signaling, so this cannot fail.
    /// Drivers that can detect errors should handle them internally.
    fn write(&mut self, pixels: &[Pixel]);
}

impl<T: StripDriver + ?Sized> StripDriver for &mut T {
    fn write(&mut self, pixels: &[Pixel]) {
        (**self).write(pixels);
    }
}

/// A fixed-length frame of `N` pixels and the driver it is flushed to.
///
/// All drawing mutates the in-memory frame only; nothing reaches the strip
/// until [`show`](Self::show) is called.
///
/// # Type Parameters
/// * `L` - Strip driver implementation
/// * `N` - Number of pixels on the strip
pub struct PixelBuffer<L: StripDriver, const N: usize> {
    pixels: [Pixel; N],
    driver: L,
}

impl<L: StripDriver, const N: usize> PixelBuffer<L, N> {
    /// Creates an all-black buffer. Nothing is flushed.
    pub fn new(driver: L) -> Self {
        Self {
            pixels: [BLACK; N],
            driver,
        }
    }

    /// Number of pixels.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true for a zero-length strip.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns the pixel at `index`.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    #[inline]
    pub fn get(&self, index: usize) -> Pixel {
        self.pixels[index]
    }

    /// Stores `color` at `index` without flushing.
    ///
    /// # Panics
    /// Panics if `index >= N`. Animations compute their indices so this
    /// never happens; clamping here would silently change the picture.
    #[inline]
    pub fn set(&mut self, index: usize, color: Pixel) {
        self.pixels[index] = color;
    }

    /// Sets every pixel to `color` without flushing.
    pub fn fill(&mut self, color: Pixel) {
        self.pixels.fill(color);
    }

    /// Pushes the whole frame to the strip.
    pub fn show(&mut self) {
        self.driver.write(&self.pixels);
    }

    /// Dims the pixel at `index` toward black by `amount / 255`.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    #[inline]
    pub fn fade_to_black_by(&mut self, index: usize, amount: u8) {
        self.pixels[index] = colors::fade_to_black_by(self.pixels[index], amount);
    }

    /// Returns the current frame.
    pub fn pixels(&self) -> &[Pixel; N] {
        &self.pixels
    }

    /// Returns a reference to the driver.
    pub fn driver(&self) -> &L {
        &self.driver
    }

    /// Returns a mutable reference to the driver.
    pub fn driver_mut(&mut self) -> &mut L {
        &mut self.driver
    }

    /// Consumes the buffer, returning the driver.
    pub fn into_driver(self) -> L {
        self.driver
    }
}
