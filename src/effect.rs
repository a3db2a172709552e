//! The named effect catalog.
//!
//! An [`EffectId`] is what configuration front-ends select. Each one expands
//! into a short [`Program`] of [`Animation`]s with fixed default parameters,
//! some of them taking the user-selected color.

use crate::animation::Animation;
use crate::colors::from_u32;
use crate::types::{ConfigError, Pixel};
use crate::{BLACK, BLUE, RED, WHITE};

/// Longest program any effect expands into.
pub const MAX_PROGRAM_LEN: usize = 3;

/// The animations one effect run performs, in order.
pub type Program = heapless::Vec<Animation, MAX_PROGRAM_LEN>;

/// Selectable effects, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectId {
    FadeInOut,
    Strobe,
    CylonBounce,
    NewKitt,
    Twinkle,
    TwinkleRandom,
    Sparkle,
    SnowSparkle,
    RunningLights,
    ColorWipe,
    TheaterChase,
    TheaterChaseRainbow,
    MeteorRain,
    Fire,
    RainbowCycle,
}

impl EffectId {
    /// Every effect, in catalog order.
    pub const ALL: [EffectId; 15] = [
        EffectId::FadeInOut,
        EffectId::Strobe,
        EffectId::CylonBounce,
        EffectId::NewKitt,
        EffectId::Twinkle,
        EffectId::TwinkleRandom,
        EffectId::Sparkle,
        EffectId::SnowSparkle,
        EffectId::RunningLights,
        EffectId::ColorWipe,
        EffectId::TheaterChase,
        EffectId::TheaterChaseRainbow,
        EffectId::MeteorRain,
        EffectId::Fire,
        EffectId::RainbowCycle,
    ];

    /// Returns the catalog name.
    ///
    /// Names are part of the configuration API and keep their historical
    /// capitalization.
    pub const fn name(self) -> &'static str {
        match self {
            EffectId::FadeInOut => "FadeInOut",
            EffectId::Strobe => "Strobe",
            EffectId::CylonBounce => "CylonBounce",
            EffectId::NewKitt => "NewKITT",
            EffectId::Twinkle => "Twinkle",
            EffectId::TwinkleRandom => "TwinkleRandom",
            EffectId::Sparkle => "Sparkle",
            EffectId::SnowSparkle => "SnowSparkle",
            EffectId::RunningLights => "RunningLights",
            EffectId::ColorWipe => "colorWipe",
            EffectId::TheaterChase => "theaterChase",
            EffectId::TheaterChaseRainbow => "theaterChaseRainbow",
            EffectId::MeteorRain => "meteorRain",
            EffectId::Fire => "Fire",
            EffectId::RainbowCycle => "rainbowCycle",
        }
    }

    /// Looks an effect up by its exact catalog name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or(ConfigError::UnknownEffect)
    }

    /// Returns true if the effect draws with the user-selected color.
    pub const fn has_custom_color(self) -> bool {
        matches!(
            self,
            EffectId::Strobe
                | EffectId::CylonBounce
                | EffectId::NewKitt
                | EffectId::Twinkle
                | EffectId::Sparkle
                | EffectId::ColorWipe
                | EffectId::TheaterChase
                | EffectId::MeteorRain
        )
    }

    /// Expands the effect into its animations.
    ///
    /// `color` is used only by effects that [`has_custom_color`](Self::has_custom_color).
    pub fn program(self, color: Pixel) -> Program {
        match self {
            EffectId::FadeInOut => sequence(&[RED, WHITE, BLUE].map(|color| {
                Animation::FadeInOut {
                    color,
                    step_delay_ms: 0,
                }
            })),
            EffectId::Strobe => sequence(&[Animation::Strobe {
                color,
                count: 10,
                flash_delay_ms: 50,
                end_pause_ms: 1000,
            }]),
            EffectId::CylonBounce => sequence(&[Animation::CylonBounce {
                color,
                eye_size: 4,
                speed_delay_ms: 10,
                return_delay_ms: 50,
            }]),
            EffectId::NewKitt => sequence(&[Animation::NewKitt {
                color,
                eye_size: 8,
                speed_delay_ms: 10,
                return_delay_ms: 50,
            }]),
            EffectId::Twinkle => sequence(&[Animation::Twinkle {
                color,
                count: 10,
                speed_delay_ms: 100,
                only_one: false,
            }]),
            EffectId::TwinkleRandom => sequence(&[Animation::TwinkleRandom {
                count: 20,
                speed_delay_ms: 100,
                only_one: false,
            }]),
            EffectId::Sparkle => sequence(&[Animation::Sparkle {
                color,
                speed_delay_ms: 0,
            }]),
            EffectId::SnowSparkle => sequence(&[Animation::SnowSparkle {
                color: from_u32(0x101010),
                sparkle_delay_ms: 20,
                min_speed_delay_ms: 100,
                max_speed_delay_ms: 1000,
            }]),
            EffectId::RunningLights => sequence(&[RED, WHITE, BLUE].map(|color| {
                Animation::RunningLights {
                    color,
                    wave_delay_ms: 50,
                }
            })),
            EffectId::ColorWipe => sequence(&[color, BLACK].map(|color| {
                Animation::ColorWipe {
                    color,
                    speed_delay_ms: 50,
                }
            })),
            EffectId::TheaterChase => sequence(&[Animation::TheaterChase {
                color,
                speed_delay_ms: 50,
                cycles: 10,
            }]),
            EffectId::TheaterChaseRainbow => sequence(&[Animation::TheaterChaseRainbow {
                speed_delay_ms: 50,
                cycles: 256,
            }]),
            EffectId::MeteorRain => sequence(&[Animation::MeteorRain {
                color,
                meteor_size: 10,
                trail_decay: 64,
                random_decay: true,
                speed_delay_ms: 30,
            }]),
            EffectId::Fire => sequence(&[Animation::Fire {
                cooling: 55,
                sparking: 120,
                speed_delay_ms: 15,
                frames: 300,
            }]),
            EffectId::RainbowCycle => sequence(&[Animation::RainbowCycle {
                speed_delay_ms: 20,
                cycles: 1,
            }]),
        }
    }
}

fn sequence(animations: &[Animation]) -> Program {
    animations.iter().copied().take(MAX_PROGRAM_LEN).collect()
}
