//! The animation library.
//!
//! Every routine is a blocking, self-terminating run: it draws a fixed number
//! of frames into the [`PixelBuffer`], flushing and sleeping between them, and
//! returns only after its full choreography. Loop bounds derive from the strip
//! length and the routine's own parameters, so every run terminates and, once
//! its parameters pass [`Animation::validate`], never indexes outside the strip.
//!
//! Routines keep no state between runs. Per-run state such as the fire heat
//! map lives on the stack for the duration of the call.

use crate::colors::{color_wheel, heat_color, scale, tenth};
use crate::strip::{PixelBuffer, StripDriver};
use crate::types::{ConfigError, Pixel};
use crate::{BLACK, WHITE};
use embedded_hal::delay::DelayNs;
use fastrand::Rng;
use palette::Srgb;

/// Spacing of lit pixels in the theater chase effects.
const THEATER_SPACING: usize = 3;

/// Sparks are ignited within this many pixels of the strip origin.
const FIRE_SPARK_ZONE: usize = 7;

/// Everything a routine draws with during one run.
///
/// Borrowed from the dispatcher for the duration of a run, so routines cannot
/// outlive it or keep state across runs.
pub struct Stage<'a, L: StripDriver, D: DelayNs, const N: usize> {
    strip: &'a mut PixelBuffer<L, N>,
    delay: &'a mut D,
    rng: &'a mut Rng,
}

/// One complete animation run together with its parameters.
///
/// Parameters are fixed for the whole run. Delays are in milliseconds and use
/// the routine's own timing, not the dispatcher frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Ramp the whole strip up from black to `color` over 256 steps, then back
    /// down over 128 coarser steps.
    FadeInOut { color: Pixel, step_delay_ms: u32 },

    /// Flash the whole strip `count` times, then hold black.
    Strobe {
        color: Pixel,
        count: u16,
        flash_delay_ms: u32,
        end_pause_ms: u32,
    },

    /// Sweep an eye left to right and back.
    CylonBounce {
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    },

    /// Eight chained sweeps: both directions plus converging and diverging
    /// mirrored eyes.
    NewKitt {
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    },

    /// Light random pixels with one color.
    Twinkle {
        color: Pixel,
        count: u16,
        speed_delay_ms: u32,
        /// Clear the strip after each twinkle instead of accumulating
        only_one: bool,
    },

    /// Light random pixels with random colors.
    TwinkleRandom {
        count: u16,
        speed_delay_ms: u32,
        only_one: bool,
    },

    /// One flash of a random pixel on black.
    Sparkle { color: Pixel, speed_delay_ms: u32 },

    /// One white flash of a random pixel over a dim `color` background. The
    /// hold after the flash is drawn from `min_speed_delay_ms..max_speed_delay_ms`.
    SnowSparkle {
        color: Pixel,
        sparkle_delay_ms: u32,
        min_speed_delay_ms: u32,
        max_speed_delay_ms: u32,
    },

    /// A travelling sine brightness wave, two strip lengths long.
    RunningLights { color: Pixel, wave_delay_ms: u32 },

    /// Paint each pixel in order, one per frame.
    ColorWipe { color: Pixel, speed_delay_ms: u32 },

    /// Every third pixel lit, offset advancing each frame.
    TheaterChase {
        color: Pixel,
        speed_delay_ms: u32,
        cycles: u16,
    },

    /// Theater chase colored from the hue wheel, advancing per cycle.
    TheaterChaseRainbow { speed_delay_ms: u32, cycles: u16 },

    /// A meteor with a decaying trail, run until it has fully left the strip.
    MeteorRain {
        color: Pixel,
        meteor_size: usize,
        trail_decay: u8,
        /// Skip the trail fade on about half the pixels each frame
        random_decay: bool,
        speed_delay_ms: u32,
    },

    /// Heat map fire rising from pixel 0.
    Fire {
        cooling: u8,
        sparking: u8,
        speed_delay_ms: u32,
        frames: u16,
    },

    /// The hue wheel spread across the strip, rotating one step per frame.
    RainbowCycle { speed_delay_ms: u32, cycles: u16 },
}

impl Animation {
    /// Checks that the parameters fit a strip of `len` pixels.
    ///
    /// # Errors
    /// * `EmptyStrip` - `len` is zero
    /// * `ZeroSize` - An eye or meteor size of zero
    /// * `EyeTooLarge` - The eye plus its flanks does not fit the sweep
    pub fn validate(&self, len: usize) -> Result<(), ConfigError> {
        if len == 0 {
            return Err(ConfigError::EmptyStrip);
        }

        match *self {
            Animation::CylonBounce { eye_size, .. } => {
                // At least one sweep position besides the origin
                check_eye(eye_size, len, 3)
            }
            Animation::NewKitt { eye_size, .. } => {
                // Mirrored eyes need two flanks on each side of the center
                check_eye(eye_size, len, 4)
            }
            Animation::MeteorRain { meteor_size: 0, .. } => Err(ConfigError::ZeroSize),
            _ => Ok(()),
        }
    }

    /// Number of frames (flushes) one run performs on a strip of `len`
    /// pixels with validated parameters.
    pub fn frame_count(&self, len: usize) -> usize {
        match *self {
            Animation::FadeInOut { .. } => 256 + 128,
            Animation::Strobe { count, .. } => 2 * usize::from(count),
            Animation::CylonBounce { eye_size, .. } => 2 * sweep_span(len, eye_size),
            Animation::NewKitt { eye_size, .. } => {
                let sweep = sweep_span(len, eye_size);
                let converge = center_start(len, eye_size) + 1;
                2 * (2 * sweep + 2 * converge)
            }
            Animation::Twinkle { count, .. } | Animation::TwinkleRandom { count, .. } => {
                usize::from(count)
            }
            Animation::Sparkle { .. } => 1,
            Animation::SnowSparkle { .. } => 2,
            Animation::RunningLights { .. } | Animation::MeteorRain { .. } => 2 * len,
            Animation::ColorWipe { .. } => len,
            Animation::TheaterChase { cycles, .. }
            | Animation::TheaterChaseRainbow { cycles, .. } => {
                THEATER_SPACING * usize::from(cycles)
            }
            Animation::Fire { frames, .. } => usize::from(frames),
            Animation::RainbowCycle { cycles, .. } => 256 * usize::from(cycles),
        }
    }

    /// Runs the animation to completion.
    ///
    /// Blocks for the whole run. Does nothing on a zero-length strip.
    pub fn run<L: StripDriver, D: DelayNs, const N: usize>(&self, stage: &mut Stage<'_, L, D, N>) {
        if N == 0 {
            return;
        }

        match *self {
            Animation::FadeInOut {
                color,
                step_delay_ms,
            } => stage.fade_in_out(color, step_delay_ms),
            Animation::Strobe {
                color,
                count,
                flash_delay_ms,
                end_pause_ms,
            } => stage.strobe(color, count, flash_delay_ms, end_pause_ms),
            Animation::CylonBounce {
                color,
                eye_size,
                speed_delay_ms,
                return_delay_ms,
            } => stage.cylon_bounce(color, eye_size, speed_delay_ms, return_delay_ms),
            Animation::NewKitt {
                color,
                eye_size,
                speed_delay_ms,
                return_delay_ms,
            } => stage.new_kitt(color, eye_size, speed_delay_ms, return_delay_ms),
            Animation::Twinkle {
                color,
                count,
                speed_delay_ms,
                only_one,
            } => stage.twinkle(Some(color), count, speed_delay_ms, only_one),
            Animation::TwinkleRandom {
                count,
                speed_delay_ms,
                only_one,
            } => stage.twinkle(None, count, speed_delay_ms, only_one),
            Animation::Sparkle {
                color,
                speed_delay_ms,
            } => stage.sparkle(color, speed_delay_ms),
            Animation::SnowSparkle {
                color,
                sparkle_delay_ms,
                min_speed_delay_ms,
                max_speed_delay_ms,
            } => stage.snow_sparkle(
                color,
                sparkle_delay_ms,
                min_speed_delay_ms,
                max_speed_delay_ms,
            ),
            Animation::RunningLights {
                color,
                wave_delay_ms,
            } => stage.running_lights(color, wave_delay_ms),
            Animation::ColorWipe {
                color,
                speed_delay_ms,
            } => stage.color_wipe(color, speed_delay_ms),
            Animation::TheaterChase {
                color,
                speed_delay_ms,
                cycles,
            } => stage.theater_chase(color, speed_delay_ms, cycles),
            Animation::TheaterChaseRainbow {
                speed_delay_ms,
                cycles,
            } => stage.theater_chase_rainbow(speed_delay_ms, cycles),
            Animation::MeteorRain {
                color,
                meteor_size,
                trail_decay,
                random_decay,
                speed_delay_ms,
            } => stage.meteor_rain(color, meteor_size, trail_decay, random_decay, speed_delay_ms),
            Animation::Fire {
                cooling,
                sparking,
                speed_delay_ms,
                frames,
            } => stage.fire(cooling, sparking, speed_delay_ms, frames),
            Animation::RainbowCycle {
                speed_delay_ms,
                cycles,
            } => stage.rainbow_cycle(speed_delay_ms, cycles),
        }
    }
}

fn check_eye(eye_size: usize, len: usize, margin: usize) -> Result<(), ConfigError> {
    if eye_size == 0 {
        return Err(ConfigError::ZeroSize);
    }
    if eye_size + margin > len {
        return Err(ConfigError::EyeTooLarge { eye_size, len });
    }
    Ok(())
}

/// Number of sweep positions for an eye plus its two flanks.
fn sweep_span(len: usize, eye_size: usize) -> usize {
    len.saturating_sub(eye_size + 2)
}

/// First position of the converging/diverging sweeps, clamped so both the
/// eye and its mirror image stay on the strip.
fn center_start(len: usize, eye_size: usize) -> usize {
    (len.saturating_sub(eye_size) / 2).min(sweep_span(len, eye_size))
}

/// Sine brightness for the running lights wave, in `1..=255`.
fn wave_level(phase: usize) -> u8 {
    let level = libm::sinf(phase as f32) * 127.0 + 128.0;
    level as u8
}

impl<'a, L: StripDriver, D: DelayNs, const N: usize> Stage<'a, L, D, N> {
    /// Creates a stage for one run.
    pub fn new(strip: &'a mut PixelBuffer<L, N>, delay: &'a mut D, rng: &'a mut Rng) -> Self {
        Self { strip, delay, rng }
    }

    /// Flushes the frame, then holds it.
    fn frame(&mut self, delay_ms: u32) {
        self.strip.show();
        self.pause(delay_ms);
    }

    fn pause(&mut self, delay_ms: u32) {
        if delay_ms > 0 {
            self.delay.delay_ms(delay_ms);
        }
    }

    fn eye_fits(&self, eye_size: usize) -> bool {
        eye_size + 2 <= N
    }

    /// Dim flank, `eye_size` body pixels, dim flank, starting at `start`.
    fn draw_eye(&mut self, start: usize, eye_size: usize, body: Pixel, flank: Pixel) {
        self.strip.set(start, flank);
        for j in 1..=eye_size {
            self.strip.set(start + j, body);
        }
        self.strip.set(start + eye_size + 1, flank);
    }

    /// The eye mirrored around the strip center.
    fn draw_mirrored_eye(&mut self, start: usize, eye_size: usize, body: Pixel, flank: Pixel) {
        let end = N - 1 - start;
        self.strip.set(end, flank);
        for j in 1..=eye_size {
            self.strip.set(end - j, body);
        }
        self.strip.set(end - eye_size - 1, flank);
    }

    fn fade_in_out(&mut self, color: Pixel, step_delay_ms: u32) {
        for level in 0..=255u8 {
            self.strip.fill(scale(color, level));
            self.frame(step_delay_ms);
        }

        // Coarser ramp down, half the frames
        for level in (1..=255u8).rev().step_by(2) {
            self.strip.fill(scale(color, level));
            self.frame(step_delay_ms);
        }
    }

    fn strobe(&mut self, color: Pixel, count: u16, flash_delay_ms: u32, end_pause_ms: u32) {
        for _ in 0..count {
            self.strip.fill(color);
            self.frame(flash_delay_ms);
            self.strip.fill(BLACK);
            self.frame(flash_delay_ms);
        }

        self.pause(end_pause_ms);
    }

    fn cylon_bounce(
        &mut self,
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    ) {
        self.left_to_right(color, eye_size, speed_delay_ms, return_delay_ms);
        self.right_to_left(color, eye_size, speed_delay_ms, return_delay_ms);
    }

    fn new_kitt(
        &mut self,
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    ) {
        self.right_to_left(color, eye_size, speed_delay_ms, return_delay_ms);
        self.left_to_right(color, eye_size, speed_delay_ms, return_delay_ms);
        self.outside_to_center(color, eye_size, speed_delay_ms, return_delay_ms);
        self.center_to_outside(color, eye_size, speed_delay_ms, return_delay_ms);
        self.left_to_right(color, eye_size, speed_delay_ms, return_delay_ms);
        self.right_to_left(color, eye_size, speed_delay_ms, return_delay_ms);
        self.outside_to_center(color, eye_size, speed_delay_ms, return_delay_ms);
        self.center_to_outside(color, eye_size, speed_delay_ms, return_delay_ms);
    }

    /// Eye from pixel 0 toward the far end. The last position is left to the
    /// return sweep.
    fn left_to_right(
        &mut self,
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    ) {
        if !self.eye_fits(eye_size) {
            return;
        }

        let flank = tenth(color);
        for start in 0..sweep_span(N, eye_size) {
            self.strip.fill(BLACK);
            self.draw_eye(start, eye_size, color, flank);
            self.frame(speed_delay_ms);
        }

        self.pause(return_delay_ms);
    }

    /// Eye from the far end back toward pixel 0, stopping one short of it.
    fn right_to_left(
        &mut self,
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    ) {
        if !self.eye_fits(eye_size) {
            return;
        }

        let flank = tenth(color);
        for start in (1..=sweep_span(N, eye_size)).rev() {
            self.strip.fill(BLACK);
            self.draw_eye(start, eye_size, color, flank);
            self.frame(speed_delay_ms);
        }

        self.pause(return_delay_ms);
    }

    /// Two mirrored eyes moving from the center out to both ends.
    fn center_to_outside(
        &mut self,
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    ) {
        if !self.eye_fits(eye_size) {
            return;
        }

        let flank = tenth(color);
        for start in (0..=center_start(N, eye_size)).rev() {
            self.strip.fill(BLACK);
            self.draw_eye(start, eye_size, color, flank);
            self.draw_mirrored_eye(start, eye_size, color, flank);
            self.frame(speed_delay_ms);
        }

        self.pause(return_delay_ms);
    }

    /// Two mirrored eyes moving from both ends into the center. The mirrored
    /// eye is drawn entirely at flank intensity.
    fn outside_to_center(
        &mut self,
        color: Pixel,
        eye_size: usize,
        speed_delay_ms: u32,
        return_delay_ms: u32,
    ) {
        if !self.eye_fits(eye_size) {
            return;
        }

        let flank = tenth(color);
        for start in 0..=center_start(N, eye_size) {
            self.strip.fill(BLACK);
            self.draw_eye(start, eye_size, color, flank);
            self.draw_mirrored_eye(start, eye_size, flank, flank);
            self.frame(speed_delay_ms);
        }

        self.pause(return_delay_ms);
    }

    /// Random pixels lit one per frame, with `color` or, if `None`, a random
    /// color per twinkle.
    fn twinkle(&mut self, color: Option<Pixel>, count: u16, speed_delay_ms: u32, only_one: bool) {
        self.strip.fill(BLACK);

        for _ in 0..count {
            let index = self.rng.usize(..N);
            let color = color.unwrap_or_else(|| {
                Srgb::new(self.rng.u8(0..255), self.rng.u8(0..255), self.rng.u8(0..255))
            });
            self.strip.set(index, color);
            self.frame(speed_delay_ms);

            if only_one {
                self.strip.fill(BLACK);
            }
        }

        self.pause(speed_delay_ms);
    }

    fn sparkle(&mut self, color: Pixel, speed_delay_ms: u32) {
        let index = self.rng.usize(..N);
        self.strip.set(index, color);
        self.frame(speed_delay_ms);
        self.strip.set(index, BLACK);
    }

    fn snow_sparkle(
        &mut self,
        color: Pixel,
        sparkle_delay_ms: u32,
        min_speed_delay_ms: u32,
        max_speed_delay_ms: u32,
    ) {
        let speed_delay_ms = if max_speed_delay_ms > min_speed_delay_ms {
            self.rng.u32(min_speed_delay_ms..max_speed_delay_ms)
        } else {
            min_speed_delay_ms
        };

        self.strip.fill(color);
        let index = self.rng.usize(..N);
        self.strip.set(index, WHITE);
        self.frame(sparkle_delay_ms);
        self.strip.set(index, color);
        self.frame(speed_delay_ms);
    }

    fn running_lights(&mut self, color: Pixel, wave_delay_ms: u32) {
        for position in 1..=N * 2 {
            for i in 0..N {
                self.strip.set(i, scale(color, wave_level(i + position)));
            }
            self.frame(wave_delay_ms);
        }
    }

    fn color_wipe(&mut self, color: Pixel, speed_delay_ms: u32) {
        for i in 0..N {
            self.strip.set(i, color);
            self.frame(speed_delay_ms);
        }
    }

    fn theater_chase(&mut self, color: Pixel, speed_delay_ms: u32, cycles: u16) {
        for _ in 0..cycles {
            for offset in 0..THEATER_SPACING {
                for i in (offset..N).step_by(THEATER_SPACING) {
                    self.strip.set(i, color);
                }
                self.frame(speed_delay_ms);

                for i in (offset..N).step_by(THEATER_SPACING) {
                    self.strip.set(i, BLACK);
                }
            }
        }
    }

    fn theater_chase_rainbow(&mut self, speed_delay_ms: u32, cycles: u16) {
        for cycle in 0..usize::from(cycles) {
            for offset in 0..THEATER_SPACING {
                for i in (offset..N).step_by(THEATER_SPACING) {
                    // Color follows the group base, not the lit pixel
                    let position = (i - offset + cycle) % 255;
                    self.strip.set(i, color_wheel(position as u8));
                }
                self.frame(speed_delay_ms);

                for i in (offset..N).step_by(THEATER_SPACING) {
                    self.strip.set(i, BLACK);
                }
            }
        }
    }

    fn meteor_rain(
        &mut self,
        color: Pixel,
        meteor_size: usize,
        trail_decay: u8,
        random_decay: bool,
        speed_delay_ms: u32,
    ) {
        if meteor_size == 0 {
            return;
        }

        self.strip.fill(BLACK);

        for head in 0..N * 2 {
            for i in 0..N {
                if !random_decay || self.rng.bool() {
                    self.strip.fade_to_black_by(i, trail_decay);
                }
            }

            // Only the part of the meteor that is on the strip
            for i in head.saturating_sub(meteor_size - 1)..=head.min(N - 1) {
                self.strip.set(i, color);
            }

            self.frame(speed_delay_ms);
        }
    }

    fn fire(&mut self, cooling: u8, sparking: u8, speed_delay_ms: u32, frames: u16) {
        let mut heat = [0u8; N];
        let cooldown_limit = (usize::from(cooling) * 10 / N + 2).min(256);
        let spark_zone = N.min(FIRE_SPARK_ZONE);

        for _ in 0..frames {
            for cell in heat.iter_mut() {
                let cooldown = self.rng.usize(..cooldown_limit) as u8;
                *cell = cell.saturating_sub(cooldown);
            }

            // Heat drifts away from the origin and diffuses
            for k in (2..N).rev() {
                let drifted = (u16::from(heat[k - 1]) + 2 * u16::from(heat[k - 2])) / 3;
                heat[k] = drifted as u8;
            }

            if self.rng.u8(..255) < sparking {
                let y = self.rng.usize(..spark_zone);
                heat[y] = heat[y].saturating_add(self.rng.u8(160..255));
            }

            for (i, &temperature) in heat.iter().enumerate() {
                self.strip.set(i, heat_color(temperature));
            }
            self.frame(speed_delay_ms);
        }
    }

    fn rainbow_cycle(&mut self, speed_delay_ms: u32, cycles: u16) {
        for step in 0..256 * usize::from(cycles) {
            for i in 0..N {
                let position = (i * 256 / N + step) & 0xFF;
                self.strip.set(i, color_wheel(position as u8));
            }
            self.frame(speed_delay_ms);
        }
    }
}
