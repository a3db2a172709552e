//! 8-bit color math.
//!
//! Every function here is pure. Dimming of any kind (brightness, palette blend
//! weights, fades, ramps) goes through [`scale_channel`], which truncates:
//! `scale_channel(v, f) == floor(v * f / 255)`. That keeps `f = 255` an exact
//! identity and `f = 0` an exact black, and never rounds a channel upward.

use crate::palettes::{Palette, PALETTE_SIZE};
use crate::types::{ConfigError, Pixel};
use palette::Srgb;

/// Width of one hue wheel sector.
const WHEEL_SECTOR: u8 = 85;

/// Scales a channel by `fraction / 255`, truncating.
#[inline]
pub const fn scale_channel(value: u8, fraction: u8) -> u8 {
    ((value as u16 * fraction as u16) / 255) as u8
}

/// Scales every channel of a pixel by `fraction / 255`.
#[inline]
pub const fn scale(color: Pixel, fraction: u8) -> Pixel {
    Srgb::new(
        scale_channel(color.red, fraction),
        scale_channel(color.green, fraction),
        scale_channel(color.blue, fraction),
    )
}

/// Dims a pixel toward black by `amount / 255` of its current value.
///
/// An amount of 0 leaves the pixel untouched, 255 turns it off. No channel
/// ever increases.
#[inline]
pub const fn fade_to_black_by(color: Pixel, amount: u8) -> Pixel {
    scale(color, 255 - amount)
}

/// One tenth of a color, used for the dim flanks of sweeping eyes.
#[inline]
pub const fn tenth(color: Pixel) -> Pixel {
    Srgb::new(color.red / 10, color.green / 10, color.blue / 10)
}

/// Blends two colors.
///
/// `amount_of_b` of 0 yields `a`, 255 yields `b`. Each channel is the
/// weighted sum truncated once, so blending a color with itself returns it
/// unchanged.
#[inline]
pub const fn blend(a: Pixel, b: Pixel, amount_of_b: u8) -> Pixel {
    Srgb::new(
        blend_channel(a.red, b.red, amount_of_b),
        blend_channel(a.green, b.green, amount_of_b),
        blend_channel(a.blue, b.blue, amount_of_b),
    )
}

#[inline]
const fn blend_channel(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let amount_of_a = 255 - amount_of_b as u16;
    ((a as u16 * amount_of_a + b as u16 * amount_of_b as u16) / 255) as u8
}

/// Maps a cyclic position onto a hue ramp.
///
/// Three 85-wide sectors: red fades into green, green into blue, blue back
/// into red. The active channels always sum to 255, the third is 0, and
/// position 255 lands back on pure red like position 0.
pub const fn color_wheel(position: u8) -> Pixel {
    if position < WHEEL_SECTOR {
        let up = position * 3;
        Srgb::new(255 - up, up, 0)
    } else if position < WHEEL_SECTOR * 2 {
        let up = (position - WHEEL_SECTOR) * 3;
        Srgb::new(0, 255 - up, up)
    } else {
        let up = (position - WHEEL_SECTOR * 2) * 3;
        Srgb::new(up, 0, 255 - up)
    }
}

/// Maps a heat value onto the fire ramp: black, red, yellow, white.
pub const fn heat_color(temperature: u8) -> Pixel {
    // Rescale 0..=255 to 0..=191 with rounding, three bands of 64
    let t192 = ((temperature as u16 * 191 + 127) / 255) as u8;
    let ramp = (t192 & 0x3F) << 2;

    if t192 & 0x80 != 0 {
        Srgb::new(255, 255, ramp)
    } else if t192 & 0x40 != 0 {
        Srgb::new(255, ramp, 0)
    } else {
        Srgb::new(ramp, 0, 0)
    }
}

/// Samples a palette at an 8-bit position.
///
/// The index selects one of 16 segments (`index >> 4`). With `blend` on, the
/// low nibble weights a linear mix toward the next stop, wrapping from stop 15
/// to stop 0. With `blend` off the lower stop is returned as is. The result is
/// scaled by `brightness / 255`.
pub fn palette_lookup(palette: &Palette, index: u8, brightness: u8, blend_enabled: bool) -> Pixel {
    let stops = palette.stops();
    let segment = usize::from(index >> 4);
    let fraction = index & 0x0F;

    let lower = stops[segment];
    let color = if blend_enabled && fraction != 0 {
        let upper = stops[(segment + 1) % PALETTE_SIZE];
        blend(lower, upper, fraction << 4)
    } else {
        lower
    };

    scale(color, brightness)
}

/// Builds a pixel from a packed `0xRRGGBB` value. Bits above 24 are ignored.
#[inline]
pub const fn from_u32(code: u32) -> Pixel {
    Srgb::new(
        ((code >> 16) & 0xFF) as u8,
        ((code >> 8) & 0xFF) as u8,
        (code & 0xFF) as u8,
    )
}

/// Packs a pixel into `0xRRGGBB`.
#[inline]
pub const fn to_u32(color: Pixel) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32
}

/// Parses a hex color such as `0xFF00E4`, `#FF00E4` or `ff00e4`.
///
/// Accepts one to six hex digits after an optional `0x`/`#` prefix; shorter
/// codes are zero-extended on the left like any hex number.
pub fn parse_hex(text: &str) -> Result<Pixel, ConfigError> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('#'))
        .unwrap_or(text);

    if digits.is_empty() || digits.len() > 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor);
    }

    u32::from_str_radix(digits, 16)
        .map(from_u32)
        .map_err(|_| ConfigError::InvalidColor)
}
