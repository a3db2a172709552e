//! The top-level mode dispatcher.
//!
//! Provides [`Dispatcher`], which owns the strip, the sleep source and the
//! random generator, and turns one [`Settings`] snapshot into one tick of
//! output: a palette frame, a solid frame, or a complete effect run.

use crate::animation::Stage;
use crate::colors::scale;
use crate::settings::{Settings, SettingsStore};
use crate::strip::{PixelBuffer, StripDriver};
use crate::time::frame_delay_ms;
use crate::types::{ConfigError, Mode};
use embedded_hal::delay::DelayNs;
use fastrand::Rng;

/// Sleep after a rejected configuration before taking the next snapshot.
pub const ERROR_BACKOFF_MS: u32 = 100;

/// Drives a strip of `N` pixels from configuration snapshots.
///
/// Settings are read once at the start of every tick and are immutable for
/// its duration. An effect tick blocks until the whole effect has run, so a
/// configuration change made meanwhile takes effect on the next tick.
///
/// # Type Parameters
/// * `L` - Strip driver implementation
/// * `D` - Delay implementation used for all sleeps
/// * `N` - Number of pixels on the strip
pub struct Dispatcher<L: StripDriver, D: DelayNs, const N: usize> {
    strip: PixelBuffer<L, N>,
    delay: D,
    rng: Rng,
    scroll: u8,
    last_mode: Option<Mode>,
}

impl<L: StripDriver, D: DelayNs, const N: usize> Dispatcher<L, D, N> {
    /// Creates a dispatcher with an all-black buffer. Nothing is flushed.
    pub fn new(driver: L, delay: D, rng: Rng) -> Self {
        Self {
            strip: PixelBuffer::new(driver),
            delay,
            rng,
            scroll: 0,
            last_mode: None,
        }
    }

    /// Runs one tick for `settings`.
    ///
    /// Returns the mode that was executed.
    ///
    /// # Errors
    /// Invalid settings, or effect parameters that do not fit the strip. In
    /// either case nothing is drawn.
    pub fn tick(&mut self, settings: &Settings) -> Result<Mode, ConfigError> {
        settings.validate()?;

        if self.last_mode != Some(settings.mode) {
            #[cfg(feature = "defmt")]
            defmt::debug!("dispatcher: mode {} -> {}", self.last_mode, settings.mode);
            self.last_mode = Some(settings.mode);
        }

        match settings.mode {
            Mode::PaletteCycle => self.palette_frame(settings),
            Mode::SolidColor => self.solid_frame(settings),
            Mode::Effect => self.effect_run(settings)?,
        }

        Ok(settings.mode)
    }

    /// Ticks forever from `store`.
    ///
    /// A rejected snapshot is skipped and followed by an
    /// [`ERROR_BACKOFF_MS`] sleep, so a bad configuration cannot spin the
    /// loop.
    pub fn run(&mut self, store: &SettingsStore<N>) -> ! {
        loop {
            let settings = store.snapshot();
            if let Err(_error) = self.tick(&settings) {
                #[cfg(feature = "defmt")]
                defmt::warn!("dispatcher: rejected configuration: {}", _error);
                self.delay.delay_ms(ERROR_BACKOFF_MS);
            }
        }
    }

    fn palette_frame(&mut self, settings: &Settings) {
        self.scroll = self.scroll.wrapping_add(settings.step);

        let palette = settings.active_palette();
        let mut index = self.scroll;
        for i in 0..N {
            self.strip
                .set(i, palette.color_at(index, settings.brightness, settings.blend));
            index = index.wrapping_add(settings.step);
        }

        self.strip.show();
        self.delay.delay_ms(frame_delay_ms(settings.fps));
    }

    fn solid_frame(&mut self, settings: &Settings) {
        self.strip.fill(scale(settings.color, settings.brightness));
        self.strip.show();
        self.delay.delay_ms(frame_delay_ms(settings.fps));
    }

    fn effect_run(&mut self, settings: &Settings) -> Result<(), ConfigError> {
        let program = settings.effect.program(settings.color);
        for animation in &program {
            animation.validate(N)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("dispatcher: running effect {}", settings.effect.name());

        let mut stage = Stage::new(&mut self.strip, &mut self.delay, &mut self.rng);
        for animation in &program {
            animation.run(&mut stage);
        }
        Ok(())
    }

    /// Returns the pixel buffer.
    pub fn strip(&self) -> &PixelBuffer<L, N> {
        &self.strip
    }

    /// Returns the current palette scroll index.
    pub fn scroll_index(&self) -> u8 {
        self.scroll
    }

    /// Returns a reference to the delay.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Returns a mutable reference to the delay.
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }
}
