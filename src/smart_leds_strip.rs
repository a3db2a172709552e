//! [`StripDriver`] adapter for `smart-leds` drivers.

use smart_leds::{RGB8, SmartLedsWrite};

use crate::strip::StripDriver;
use crate::types::Pixel;

/// Wraps any [`SmartLedsWrite`] driver (WS2812 over RMT or SPI, APA102, ...)
/// so a [`PixelBuffer`](crate::PixelBuffer) can flush to it.
///
/// Write errors are dropped: a lost frame is replaced by the next one.
pub struct SmartLedsStrip<W> {
    writer: W,
}

impl<W> SmartLedsStrip<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the adapter, returning the wrapped driver.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> StripDriver for SmartLedsStrip<W>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    fn write(&mut self, pixels: &[Pixel]) {
        let colors = pixels
            .iter()
            .map(|pixel| RGB8::new(pixel.red, pixel.green, pixel.blue));

        if self.writer.write(colors).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("smart-leds: frame write failed");
        }
    }
}
