//! Frame timing helpers.
//!
//! The engine never reads a clock. It only asks to be put to sleep through
//! [`DelayNs`], which callers implement for their timer (or mock in tests).

pub use embedded_hal::delay::DelayNs;

/// Milliseconds in one second.
const MILLIS_PER_SECOND: u32 = 1_000;

/// Returns the per-frame sleep for a target frame rate, in whole milliseconds.
///
/// Truncates like integer division, so 100 fps gives 10 ms and 3 fps gives 333 ms.
/// A rate of zero is treated as one frame per second.
#[inline]
pub fn frame_delay_ms(fps: u16) -> u32 {
    MILLIS_PER_SECOND / u32::from(fps.max(1))
}
