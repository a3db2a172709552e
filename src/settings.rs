//! Dispatcher configuration and its shared store.
//!
//! [`Settings`] is a plain value. The dispatcher reads one snapshot per tick
//! and a configuration front-end writes through [`SettingsStore`], which
//! validates every change before committing it as a whole. A tick therefore
//! never observes a half-applied update.

use core::cell::Cell;
use critical_section::Mutex;

use crate::colors::from_u32;
use crate::effect::EffectId;
use crate::palettes::{CUSTOM_DEFAULT, Palette, PaletteId};
use crate::types::{ConfigError, Mode, Pixel};

/// Complete dispatcher configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// What the dispatcher draws.
    pub mode: Mode,
    /// Palette scrolled in [`Mode::PaletteCycle`].
    pub palette: PaletteId,
    /// Palette index advance per tick and per pixel, `1..=255`.
    pub step: u8,
    /// Effect run in [`Mode::Effect`].
    pub effect: EffectId,
    /// User color for solid mode and color-taking effects.
    pub color: Pixel,
    /// Blend between palette stops.
    pub blend: bool,
    /// Global scale for palette and solid modes. Effects draw at full scale.
    pub brightness: u8,
    /// Tick rate of palette and solid modes, `1..`.
    pub fps: u16,
    /// Stops of [`PaletteId::Custom`].
    pub custom_palette: Palette,
}

impl Settings {
    /// Power-on configuration.
    pub const DEFAULT: Settings = Settings {
        mode: Mode::PaletteCycle,
        palette: PaletteId::Rainbow,
        step: 3,
        effect: EffectId::FadeInOut,
        color: from_u32(0xFF00E4),
        blend: true,
        brightness: 64,
        fps: 100,
        custom_palette: CUSTOM_DEFAULT,
    };

    /// Checks the numeric ranges.
    ///
    /// # Errors
    /// * `ZeroStep` - `step` is zero
    /// * `ZeroFrameRate` - `fps` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }

    /// Checks the numeric ranges and that the selected effect fits a strip of
    /// `len` pixels.
    ///
    /// The effect is checked even outside [`Mode::Effect`], so a later mode
    /// switch cannot land on an effect that was never validated.
    ///
    /// # Errors
    /// Any error from [`validate`](Self::validate) or
    /// [`Animation::validate`](crate::Animation::validate).
    pub fn validate_for(&self, len: usize) -> Result<(), ConfigError> {
        self.validate()?;
        for animation in &self.effect.program(self.color) {
            animation.validate(len)?;
        }
        Ok(())
    }

    /// Returns the stops of the selected palette.
    pub fn active_palette(&self) -> &Palette {
        self.palette.builtin().unwrap_or(&self.custom_palette)
    }

    /// Returns a copy with `patch` applied, without validating it.
    fn patched(&self, patch: &SettingsPatch) -> Settings {
        let mut next = *self;
        if let Some(mode) = patch.mode {
            next.mode = mode;
        }
        if let Some(palette) = patch.palette {
            next.palette = palette;
        }
        if let Some(step) = patch.step {
            next.step = step;
        }
        if let Some(effect) = patch.effect {
            next.effect = effect;
        }
        if let Some(color) = patch.color {
            next.color = color;
        }
        if let Some(blend) = patch.blend {
            next.blend = blend;
        }
        if let Some(brightness) = patch.brightness {
            next.brightness = brightness;
        }
        if let Some(fps) = patch.fps {
            next.fps = fps;
        }
        next
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A partial update. `None` fields keep their current value.
///
/// Front-ends that receive names and hex strings can build one with the
/// `with_*_name` helpers, which surface lookup errors before anything is
/// applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsPatch {
    /// New dispatcher mode.
    pub mode: Option<Mode>,
    /// New palette selection.
    pub palette: Option<PaletteId>,
    /// New palette step, must be non-zero.
    pub step: Option<u8>,
    /// New effect selection, must fit the strip.
    pub effect: Option<EffectId>,
    /// New user color.
    pub color: Option<Pixel>,
    /// New palette blend flag.
    pub blend: Option<bool>,
    /// New brightness for palette and solid modes.
    pub brightness: Option<u8>,
    /// New frame rate, must be non-zero.
    pub fps: Option<u16>,
}

impl SettingsPatch {
    /// Sets the mode from its number.
    pub fn with_mode_number(mut self, mode: u8) -> Result<Self, ConfigError> {
        self.mode = Some(Mode::try_from(mode)?);
        Ok(self)
    }

    /// Sets the palette from its catalog name.
    pub fn with_palette_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.palette = Some(PaletteId::from_name(name)?);
        Ok(self)
    }

    /// Sets the effect from its catalog name.
    pub fn with_effect_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.effect = Some(EffectId::from_name(name)?);
        Ok(self)
    }

    /// Sets the color from a hex code.
    pub fn with_color_hex(mut self, code: &str) -> Result<Self, ConfigError> {
        self.color = Some(crate::colors::parse_hex(code)?);
        Ok(self)
    }
}

/// Shared, interrupt-safe home of the current [`Settings`] for a strip of
/// `N` pixels.
///
/// Suitable for a `static`. Every access is one short critical section that
/// copies the whole value in or out. Updates are checked against the strip
/// length, so every stored configuration can be drawn.
pub struct SettingsStore<const N: usize> {
    inner: Mutex<Cell<Settings>>,
}

impl<const N: usize> SettingsStore<N> {
    /// Creates a store holding `settings`.
    ///
    /// The initial value is not checked; the dispatcher still rejects it per
    /// tick if it does not fit.
    pub const fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(Cell::new(settings)),
        }
    }

    /// Returns a copy of the current settings.
    pub fn snapshot(&self) -> Settings {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Applies a patch atomically.
    ///
    /// The patched value is validated before it is stored; on error the store
    /// is left unchanged.
    ///
    /// # Errors
    /// Any error from [`Settings::validate_for`] with the strip length `N`.
    pub fn apply(&self, patch: &SettingsPatch) -> Result<Settings, ConfigError> {
        self.update(|current| {
            let next = current.patched(patch);
            next.validate_for(N)?;
            Ok(next)
        })
    }

    /// Replaces the custom palette stops.
    ///
    /// # Errors
    /// * `PaletteStopCount` - Not exactly 16 stops
    pub fn replace_custom_palette(&self, stops: &[Pixel]) -> Result<Settings, ConfigError> {
        let palette = Palette::try_from_slice(stops)?;
        self.set_custom_palette(palette)
    }

    /// Replaces the custom palette stops from hex codes.
    ///
    /// # Errors
    /// * `PaletteStopCount` - Not exactly 16 codes
    /// * `InvalidColor` - A code is not valid hex
    pub fn replace_custom_palette_hex(&self, codes: &[&str]) -> Result<Settings, ConfigError> {
        let palette = Palette::try_from_hex(codes)?;
        self.set_custom_palette(palette)
    }

    fn set_custom_palette(&self, palette: Palette) -> Result<Settings, ConfigError> {
        self.update(|current| {
            Ok(Settings {
                custom_palette: palette,
                ..current
            })
        })
    }

    fn update<F>(&self, f: F) -> Result<Settings, ConfigError>
    where
        F: FnOnce(Settings) -> Result<Settings, ConfigError>,
    {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let next = f(cell.get())?;
            cell.set(next);
            Ok(next)
        })
    }
}

impl<const N: usize> Default for SettingsStore<N> {
    fn default() -> Self {
        Self::new(Settings::DEFAULT)
    }
}
