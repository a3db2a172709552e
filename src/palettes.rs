//! 16-stop gradient palettes and the built-in palette catalog.

use crate::colors::{from_u32, palette_lookup, parse_hex};
use crate::types::{ConfigError, Pixel};

/// Number of color stops in every palette.
pub const PALETTE_SIZE: usize = 16;

/// A gradient of 16 evenly spaced color stops.
///
/// Stops are fixed once constructed; replacing a palette means building a new
/// value, never editing one in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    stops: [Pixel; PALETTE_SIZE],
}

impl Palette {
    /// Creates a palette from 16 stops.
    pub const fn new(stops: [Pixel; PALETTE_SIZE]) -> Self {
        Self { stops }
    }

    /// Creates a palette with every stop set to one color.
    pub const fn solid(color: Pixel) -> Self {
        Self {
            stops: [color; PALETTE_SIZE],
        }
    }

    /// Creates a palette from packed `0xRRGGBB` codes.
    pub const fn from_codes(codes: [u32; PALETTE_SIZE]) -> Self {
        let mut stops = [from_u32(0); PALETTE_SIZE];
        let mut i = 0;
        while i < PALETTE_SIZE {
            stops[i] = from_u32(codes[i]);
            i += 1;
        }
        Self { stops }
    }

    /// Creates a palette from a slice of stops.
    ///
    /// # Errors
    /// * `PaletteStopCount` - The slice does not hold exactly 16 stops
    pub fn try_from_slice(stops: &[Pixel]) -> Result<Self, ConfigError> {
        let stops: [Pixel; PALETTE_SIZE] = stops
            .try_into()
            .map_err(|_| ConfigError::PaletteStopCount(stops.len()))?;
        Ok(Self { stops })
    }

    /// Creates a palette from hex color strings such as `"0xFF0000"`.
    ///
    /// # Errors
    /// * `PaletteStopCount` - Not exactly 16 codes
    /// * `InvalidColor` - A code is not valid hex
    pub fn try_from_hex(codes: &[&str]) -> Result<Self, ConfigError> {
        if codes.len() != PALETTE_SIZE {
            return Err(ConfigError::PaletteStopCount(codes.len()));
        }

        let mut stops = [from_u32(0); PALETTE_SIZE];
        for (stop, code) in stops.iter_mut().zip(codes) {
            *stop = parse_hex(code)?;
        }
        Ok(Self { stops })
    }

    /// Returns the color stops.
    pub fn stops(&self) -> &[Pixel; PALETTE_SIZE] {
        &self.stops
    }

    /// Samples the palette, see [`palette_lookup`].
    #[inline]
    pub fn color_at(&self, index: u8, brightness: u8, blend: bool) -> Pixel {
        palette_lookup(self, index, brightness, blend)
    }
}

pub const RAINBOW: Palette = Palette::from_codes([
    0xFF0000, 0xD52A00, 0xAB5500, 0xAB7F00, 0xABAB00, 0x56D500, 0x00FF00, 0x00D52A,
    0x00AB55, 0x0056AA, 0x0000FF, 0x2A00D5, 0x5500AB, 0x7F0081, 0xAB0055, 0xD5002B,
]);

pub const RAINBOW_STRIPES: Palette = Palette::from_codes([
    0xFF0000, 0x000000, 0xAB5500, 0x000000, 0xABAB00, 0x000000, 0x00FF00, 0x000000,
    0x00AB55, 0x000000, 0x0000FF, 0x000000, 0x5500AB, 0x000000, 0xAB0055, 0x000000,
]);

pub const CLOUD: Palette = Palette::from_codes([
    0x0000FF, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B,
    0x0000FF, 0x00008B, 0x87CEEB, 0x87CEEB, 0xADD8E6, 0xFFFFFF, 0xADD8E6, 0x87CEEB,
]);

pub const LAVA: Palette = Palette::from_codes([
    0x000000, 0x800000, 0x000000, 0x800000, 0x8B0000, 0x8B0000, 0x800000, 0x8B0000,
    0x8B0000, 0x8B0000, 0xFF0000, 0xFFA500, 0xFFFFFF, 0xFFA500, 0xFF0000, 0x8B0000,
]);

pub const OCEAN: Palette = Palette::from_codes([
    0x191970, 0x00008B, 0x191970, 0x000080, 0x00008B, 0x0000CD, 0x2E8B57, 0x008080,
    0x5F9EA0, 0x0000FF, 0x008B8B, 0x6495ED, 0x7FFFD4, 0x2E8B57, 0x00FFFF, 0x87CEFA,
]);

pub const FOREST: Palette = Palette::from_codes([
    0x006400, 0x006400, 0x556B2F, 0x006400, 0x008000, 0x228B22, 0x6B8E23, 0x008000,
    0x2E8B57, 0x66CDAA, 0x32CD32, 0x9ACD32, 0x90EE90, 0x7CFC00, 0x66CDAA, 0x228B22,
]);

pub const PARTY: Palette = Palette::from_codes([
    0x5500AB, 0x84007C, 0xB5004B, 0xE5001B, 0xE81700, 0xB84700, 0xAB7700, 0xABAB00,
    0xAB5500, 0xDD2200, 0xF2000E, 0xC2003E, 0x8F0071, 0x5F00A1, 0x2F00D0, 0x0007F9,
]);

pub const HEAT: Palette = Palette::from_codes([
    0x000000, 0x330000, 0x660000, 0x990000, 0xCC0000, 0xFF0000, 0xFF3300, 0xFF6600,
    0xFF9900, 0xFFCC00, 0xFFFF00, 0xFFFF33, 0xFFFF66, 0xFFFF99, 0xFFFFCC, 0xFFFFFF,
]);

/// Initial contents of the user-defined palette.
pub const CUSTOM_DEFAULT: Palette = Palette::solid(from_u32(0xFF0000));

/// Palette catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaletteId {
    Rainbow,
    RainbowStripes,
    Cloud,
    Lava,
    Ocean,
    Forest,
    Party,
    Heat,
    /// The user-replaceable palette held in the settings.
    Custom,
}

impl PaletteId {
    /// Every palette, in catalog order.
    pub const ALL: [PaletteId; 9] = [
        PaletteId::Rainbow,
        PaletteId::RainbowStripes,
        PaletteId::Cloud,
        PaletteId::Lava,
        PaletteId::Ocean,
        PaletteId::Forest,
        PaletteId::Party,
        PaletteId::Heat,
        PaletteId::Custom,
    ];

    /// Returns the catalog name.
    pub const fn name(self) -> &'static str {
        match self {
            PaletteId::Rainbow => "Rainbow",
            PaletteId::RainbowStripes => "RainbowStripes",
            PaletteId::Cloud => "Cloud",
            PaletteId::Lava => "Lava",
            PaletteId::Ocean => "Ocean",
            PaletteId::Forest => "Forest",
            PaletteId::Party => "Party",
            PaletteId::Heat => "Heat",
            PaletteId::Custom => "Custom",
        }
    }

    /// Looks a palette up by its exact catalog name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or(ConfigError::UnknownPalette)
    }

    /// Returns the built-in stops, or `None` for [`PaletteId::Custom`].
    pub const fn builtin(self) -> Option<&'static Palette> {
        match self {
            PaletteId::Rainbow => Some(&RAINBOW),
            PaletteId::RainbowStripes => Some(&RAINBOW_STRIPES),
            PaletteId::Cloud => Some(&CLOUD),
            PaletteId::Lava => Some(&LAVA),
            PaletteId::Ocean => Some(&OCEAN),
            PaletteId::Forest => Some(&FOREST),
            PaletteId::Party => Some(&PARTY),
            PaletteId::Heat => Some(&HEAT),
            PaletteId::Custom => None,
        }
    }
}
