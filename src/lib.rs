#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`PixelBuffer`**: Fixed-length frame of pixels plus the `StripDriver` it is flushed to
//! - **`StripDriver`**: Trait to implement for your LED strip hardware
//! - **`Palette`** / **`PaletteId`**: 16-stop gradients and the built-in palette catalog
//! - **`colors`**: Pure 8-bit color math (scaling, fades, hue wheel, palette lookup)
//! - **`Animation`**: One self-contained, blocking animation routine with its parameters
//! - **`EffectId`**: The named effect catalog exposed to configuration front-ends
//! - **`Dispatcher`**: Runs one tick per settings snapshot (palette cycle, solid color or effect)
//! - **`Settings`** / **`SettingsStore`**: Validated configuration and its atomic snapshot store
//!
//! All color values are `Srgb<u8>` (0-255 per channel). Timing goes through
//! [`embedded_hal::delay::DelayNs`] and randomness through an explicitly passed
//! [`fastrand::Rng`], so every animation can be replayed deterministically in tests.

// Re-export the pieces of the dependency stack that appear in the public API
pub use embedded_hal::delay::DelayNs;
pub use fastrand::Rng;
pub use palette::Srgb;

pub mod animation;
pub mod colors;
pub mod dispatcher;
pub mod effect;
pub mod palettes;
pub mod settings;
#[cfg(feature = "smart-leds")]
pub mod smart_leds_strip;
pub mod strip;
pub mod time;
pub mod types;

pub use animation::{Animation, Stage};
pub use dispatcher::Dispatcher;
pub use effect::{EffectId, Program};
pub use palettes::{Palette, PaletteId};
pub use settings::{Settings, SettingsPatch, SettingsStore};
#[cfg(feature = "smart-leds")]
pub use smart_leds_strip::SmartLedsStrip;
pub use strip::{PixelBuffer, StripDriver};
pub use types::{ConfigError, Mode, Pixel};

pub const BLACK: Pixel = Srgb::new(0, 0, 0);
pub const WHITE: Pixel = Srgb::new(255, 255, 255);
pub const RED: Pixel = Srgb::new(255, 0, 0);
pub const GREEN: Pixel = Srgb::new(0, 255, 0);
pub const BLUE: Pixel = Srgb::new(0, 0, 255);
