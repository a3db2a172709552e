//! Core types shared by the engine and its configuration layer.

use palette::Srgb;

/// One addressable RGB cell, 0-255 per channel.
pub type Pixel = Srgb<u8>;

/// Top-level dispatcher mode.
///
/// The numeric values match the mode numbers used by configuration front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Scroll the selected palette along the strip.
    PaletteCycle = 0,

    /// Fill the strip with one color.
    SolidColor = 1,

    /// Run the selected effect to completion.
    Effect = 2,
}

impl Mode {
    /// Every valid mode, in numeric order.
    pub const ALL: [Mode; 3] = [Mode::PaletteCycle, Mode::SolidColor, Mode::Effect];
}

impl TryFrom<u8> for Mode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::PaletteCycle),
            1 => Ok(Mode::SolidColor),
            2 => Ok(Mode::Effect),
            other => Err(ConfigError::UnknownMode(other)),
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode as u8
    }
}

/// Configuration and parameter validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Mode number outside `0..=2`.
    UnknownMode(u8),

    /// Palette name not in the catalog.
    UnknownPalette,

    /// Effect name not in the catalog.
    UnknownEffect,

    /// Palette step of zero.
    ZeroStep,

    /// Frame rate of zero.
    ZeroFrameRate,

    /// Color string is not a 24-bit hex code.
    InvalidColor,

    /// Custom palette payload without exactly 16 stops.
    PaletteStopCount(usize),

    /// Strip has no pixels.
    EmptyStrip,

    /// Eye window does not fit the strip.
    EyeTooLarge {
        /// Requested eye size
        eye_size: usize,
        /// Strip length
        len: usize,
    },

    /// Size or count parameter of zero where at least one is required.
    ZeroSize,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::UnknownMode(mode) => write!(f, "unknown mode {}", mode),
            ConfigError::UnknownPalette => write!(f, "unknown palette name"),
            ConfigError::UnknownEffect => write!(f, "unknown effect name"),
            ConfigError::ZeroStep => write!(f, "palette step must be between 1 and 255"),
            ConfigError::ZeroFrameRate => write!(f, "frame rate must be greater than zero"),
            ConfigError::InvalidColor => {
                write!(f, "color must be a hex code such as 0xFF00E4 or #FF00E4")
            }
            ConfigError::PaletteStopCount(count) => {
                write!(f, "custom palette needs exactly 16 stops, got {}", count)
            }
            ConfigError::EmptyStrip => write!(f, "strip has no pixels"),
            ConfigError::EyeTooLarge { eye_size, len } => {
                write!(
                    f,
                    "eye size {} does not fit a strip of {} pixels",
                    eye_size, len
                )
            }
            ConfigError::ZeroSize => write!(f, "size and count parameters must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
