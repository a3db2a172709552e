//! Integration tests for the animation library

mod common;
use common::*;

use ledstrip_fx::colors::{color_wheel, tenth};
use ledstrip_fx::{
    Animation, BLACK, BLUE, ConfigError, EffectId, PixelBuffer, RED, Rng, Stage, WHITE,
};

fn run<const N: usize>(animation: Animation) -> (MockStrip<N>, MockDelay) {
    let mut strip = PixelBuffer::<_, N>::new(MockStrip::<N>::new());
    let mut delay = MockDelay::new();
    let mut rng = Rng::with_seed(SEED);
    animation.run(&mut Stage::new(&mut strip, &mut delay, &mut rng));
    (strip.into_driver(), delay)
}

fn lit_count<const N: usize>(frame: &[ledstrip_fx::Pixel; N]) -> usize {
    frame.iter().filter(|pixel| !is_black(**pixel)).count()
}

#[test]
fn frame_count_matches_every_default_program() {
    for id in EffectId::ALL {
        for animation in id.program(RED) {
            let (strip, _) = run::<30>(animation);
            assert_eq!(
                strip.frame_count(),
                animation.frame_count(30),
                "{}: {:?}",
                id.name(),
                animation
            );
        }
    }
}

#[test]
fn default_programs_fit_small_strips() {
    for id in EffectId::ALL {
        for animation in id.program(RED) {
            assert_eq!(animation.validate(12), Ok(()), "{}", id.name());
        }
    }
}

#[test]
fn fade_in_out_ramps_up_then_down() {
    let (strip, delay) = run::<4>(Animation::FadeInOut {
        color: RED,
        step_delay_ms: 0,
    });
    let frames = strip.frames();

    assert_eq!(frames.len(), 384);
    assert_eq!(frames[0], [BLACK; 4]);
    assert_eq!(frames[255], [RED; 4]);
    // Ramp down ends one step above black
    assert!(frames[383].iter().all(|pixel| pixel.red <= 1 && pixel.green == 0));
    assert!(delay.sleeps_ms().is_empty());

    for pair in frames[..256].windows(2) {
        assert!(not_brighter(pair[1][0], pair[0][0]));
    }
    for pair in frames[256..].windows(2) {
        assert!(not_brighter(pair[0][0], pair[1][0]));
    }
}

#[test]
fn strobe_alternates_and_pauses_at_end() {
    let (strip, delay) = run::<5>(Animation::Strobe {
        color: WHITE,
        count: 3,
        flash_delay_ms: 50,
        end_pause_ms: 1000,
    });

    assert_eq!(strip.frame_count(), 6);
    for (i, frame) in strip.frames().iter().enumerate() {
        let expected = if i % 2 == 0 { WHITE } else { BLACK };
        assert_eq!(frame, &[expected; 5]);
    }
    assert_eq!(delay.sleeps_ms(), &[50, 50, 50, 50, 50, 50, 1000]);
}

#[test]
fn cylon_eye_stays_on_strip_and_reaches_both_ends() {
    let (strip, delay) = run::<20>(Animation::CylonBounce {
        color: BLUE,
        eye_size: 4,
        speed_delay_ms: 10,
        return_delay_ms: 50,
    });
    let frames = strip.frames();

    assert_eq!(frames.len(), 28);
    for frame in frames {
        assert_eq!(frame.iter().filter(|pixel| **pixel == BLUE).count(), 4);
        assert_eq!(frame.iter().filter(|pixel| **pixel == tenth(BLUE)).count(), 2);
    }
    assert_eq!(frames[0][0], tenth(BLUE));
    assert!(frames.iter().any(|frame| !is_black(frame[19])));
    assert_eq!(delay.total_ms(), 28 * 10 + 2 * 50);
}

#[test]
fn new_kitt_mirror_stays_on_strip() {
    // Smallest strip the eye fits on
    let (strip, _) = run::<12>(Animation::NewKitt {
        color: RED,
        eye_size: 8,
        speed_delay_ms: 0,
        return_delay_ms: 0,
    });
    assert!(strip.frame_count() > 0);
    assert!(strip.frames().iter().any(|frame| frame[11] == tenth(RED)));
}

#[test]
fn oversized_eyes_are_rejected() {
    let cylon = Animation::CylonBounce {
        color: RED,
        eye_size: 18,
        speed_delay_ms: 0,
        return_delay_ms: 0,
    };
    assert_eq!(
        cylon.validate(20),
        Err(ConfigError::EyeTooLarge {
            eye_size: 18,
            len: 20
        })
    );
    assert_eq!(cylon.validate(21), Ok(()));

    let kitt = Animation::NewKitt {
        color: RED,
        eye_size: 8,
        speed_delay_ms: 0,
        return_delay_ms: 0,
    };
    assert!(matches!(kitt.validate(11), Err(ConfigError::EyeTooLarge { .. })));
    assert_eq!(kitt.validate(0), Err(ConfigError::EmptyStrip));
}

#[test]
fn twinkle_only_one_lights_a_single_pixel() {
    let (strip, delay) = run::<16>(Animation::Twinkle {
        color: RED,
        count: 10,
        speed_delay_ms: 100,
        only_one: true,
    });

    assert_eq!(strip.frame_count(), 10);
    for frame in strip.frames() {
        assert_eq!(lit_count(frame), 1);
    }
    // One sleep per twinkle plus the closing one
    assert_eq!(delay.sleeps_ms().len(), 11);
}

#[test]
fn twinkle_accumulates_without_only_one() {
    let (strip, _) = run::<16>(Animation::Twinkle {
        color: RED,
        count: 10,
        speed_delay_ms: 0,
        only_one: false,
    });

    for pair in strip.frames().windows(2) {
        assert!(lit_count(&pair[1]) >= lit_count(&pair[0]));
    }
}

#[test]
fn snow_sparkle_holds_for_a_random_delay() {
    let (strip, delay) = run::<10>(Animation::SnowSparkle {
        color: ledstrip_fx::colors::from_u32(0x101010),
        sparkle_delay_ms: 20,
        min_speed_delay_ms: 100,
        max_speed_delay_ms: 1000,
    });

    assert_eq!(strip.frame_count(), 2);
    assert_eq!(strip.frames()[0].iter().filter(|pixel| **pixel == WHITE).count(), 1);
    assert!(!strip.frames()[1].contains(&WHITE));

    let sleeps = delay.sleeps_ms();
    assert_eq!(sleeps[0], 20);
    assert!((100..1000).contains(&sleeps[1]));
}

#[test]
fn sparkle_restores_black_without_flushing() {
    let mut strip = PixelBuffer::<_, 8>::new(MockStrip::<8>::new());
    let mut delay = MockDelay::new();
    let mut rng = Rng::with_seed(SEED);
    Animation::Sparkle {
        color: RED,
        speed_delay_ms: 0,
    }
    .run(&mut Stage::new(&mut strip, &mut delay, &mut rng));

    assert_eq!(strip.driver().frame_count(), 1);
    assert_eq!(lit_count(&strip.driver().frames()[0]), 1);
    assert_eq!(strip.pixels(), &[BLACK; 8]);
}

#[test]
fn running_lights_stay_on_the_color_axis() {
    let (strip, _) = run::<10>(Animation::RunningLights {
        color: RED,
        wave_delay_ms: 0,
    });

    assert_eq!(strip.frame_count(), 20);
    for frame in strip.frames() {
        for pixel in frame {
            assert!(pixel.red >= 1);
            assert_eq!((pixel.green, pixel.blue), (0, 0));
        }
    }
    // The wave moves
    assert_ne!(strip.frames()[0], strip.frames()[1]);
}

#[test]
fn color_wipe_paints_in_order() {
    let (strip, _) = run::<6>(Animation::ColorWipe {
        color: RED,
        speed_delay_ms: 50,
    });

    for (step, frame) in strip.frames().iter().enumerate() {
        for (i, pixel) in frame.iter().enumerate() {
            let expected = if i <= step { RED } else { BLACK };
            assert_eq!(*pixel, expected);
        }
    }
}

#[test]
fn theater_chase_lights_every_third_pixel() {
    let (strip, _) = run::<10>(Animation::TheaterChase {
        color: RED,
        speed_delay_ms: 0,
        cycles: 2,
    });

    assert_eq!(strip.frame_count(), 6);
    for (k, frame) in strip.frames().iter().enumerate() {
        for (i, pixel) in frame.iter().enumerate() {
            assert_eq!(*pixel == RED, i % 3 == k % 3);
        }
    }
}

#[test]
fn theater_chase_rainbow_colors_follow_group_base_and_cycle() {
    let (strip, _) = run::<10>(Animation::TheaterChaseRainbow {
        speed_delay_ms: 0,
        cycles: 2,
    });

    assert_eq!(strip.frame_count(), 6);
    for (k, frame) in strip.frames().iter().enumerate() {
        let (cycle, offset) = (k / 3, k % 3);
        for (i, pixel) in frame.iter().enumerate() {
            let expected = if i % 3 == offset {
                color_wheel(((i - offset + cycle) % 255) as u8)
            } else {
                BLACK
            };
            assert_eq!(*pixel, expected, "frame {} pixel {}", k, i);
        }
    }
}

#[test]
fn meteor_trail_only_fades_after_the_head_passes() {
    let (strip, _) = run::<10>(Animation::MeteorRain {
        color: WHITE,
        meteor_size: 1,
        trail_decay: 64,
        random_decay: false,
        speed_delay_ms: 0,
    });
    let frames = strip.frames();

    assert_eq!(frames.len(), 20);
    for (head, frame) in frames.iter().enumerate().take(10) {
        assert_eq!(frame[head], WHITE);
    }
    for pair in frames.windows(2).skip(1) {
        for p in 0..10 {
            if !is_black(pair[0][p]) && pair[1][p] != WHITE {
                assert!(not_brighter(pair[0][p], pair[1][p]));
            }
        }
    }
    // 19 fades by 64 take full white all the way to black
    assert!(is_black(frames[19][0]));
}

#[test]
fn meteor_without_size_is_rejected() {
    let meteor = Animation::MeteorRain {
        color: RED,
        meteor_size: 0,
        trail_decay: 64,
        random_decay: true,
        speed_delay_ms: 30,
    };
    assert_eq!(meteor.validate(30), Err(ConfigError::ZeroSize));
}

#[test]
fn fire_draws_only_heat_ramp_colors() {
    let (strip, _) = run::<30>(Animation::Fire {
        cooling: 55,
        sparking: 120,
        speed_delay_ms: 0,
        frames: 100,
    });

    for frame in strip.frames() {
        for pixel in frame {
            if pixel.blue > 0 {
                assert_eq!((pixel.red, pixel.green), (255, 255));
            }
            if pixel.green > 0 {
                assert_eq!(pixel.red, 255);
            }
        }
    }
}

#[test]
fn same_seed_replays_the_same_fire() {
    let fire = Animation::Fire {
        cooling: 55,
        sparking: 120,
        speed_delay_ms: 0,
        frames: 50,
    };
    let (first, _) = run::<24>(fire);
    let (second, _) = run::<24>(fire);
    assert_eq!(first.frames(), second.frames());
}

#[test]
fn rainbow_cycle_rotates_one_step_per_frame() {
    let (strip, _) = run::<8>(Animation::RainbowCycle {
        speed_delay_ms: 0,
        cycles: 1,
    });
    let frames = strip.frames();

    assert_eq!(frames.len(), 256);
    assert_eq!(frames[0][0], RED);
    assert_eq!(frames[1][0], ledstrip_fx::colors::color_wheel(1));
    assert_eq!(frames[0][1], ledstrip_fx::colors::color_wheel(32));
}

#[test]
fn zero_length_strip_draws_nothing() {
    let (strip, delay) = run::<0>(Animation::Sparkle {
        color: RED,
        speed_delay_ms: 10,
    });
    assert_eq!(strip.frame_count(), 0);
    assert!(delay.sleeps_ms().is_empty());

    let randomized = [
        Animation::Fire {
            cooling: 55,
            sparking: 120,
            speed_delay_ms: 10,
            frames: 5,
        },
        Animation::Twinkle {
            color: RED,
            count: 5,
            speed_delay_ms: 10,
            only_one: false,
        },
        Animation::SnowSparkle {
            color: RED,
            sparkle_delay_ms: 10,
            min_speed_delay_ms: 10,
            max_speed_delay_ms: 20,
        },
    ];
    for animation in randomized {
        let (strip, delay) = run::<0>(animation);
        assert_eq!(strip.frame_count(), 0, "{:?}", animation);
        assert!(delay.sleeps_ms().is_empty());
    }
}

#[test]
fn meteor_without_decay_never_turns_a_pixel_off() {
    let (strip, _) = run::<12>(Animation::MeteorRain {
        color: RED,
        meteor_size: 1,
        trail_decay: 0,
        random_decay: true,
        speed_delay_ms: 0,
    });
    let frames = strip.frames();

    assert_eq!(frames.len(), 24);
    for pair in frames.windows(2) {
        for p in 0..12 {
            if !is_black(pair[0][p]) {
                assert_eq!(pair[1][p], RED);
            }
        }
    }
    assert_eq!(frames[23], [RED; 12]);
}
