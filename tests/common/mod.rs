//! Shared test infrastructure for ledstrip-fx integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use ledstrip_fx::{BLACK, DelayNs, Pixel, StripDriver};

// ============================================================================
// Mock Strip
// ============================================================================

/// Mock strip that records every flushed frame
pub struct MockStrip<const N: usize> {
    frames: Vec<[Pixel; N]>,
}

impl<const N: usize> MockStrip<N> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn frames(&self) -> &[[Pixel; N]] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> Option<&[Pixel; N]> {
        self.frames.last()
    }
}

impl<const N: usize> StripDriver for MockStrip<N> {
    fn write(&mut self, pixels: &[Pixel]) {
        let mut frame = [BLACK; N];
        frame.copy_from_slice(pixels);
        self.frames.push(frame);
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Mock delay that records requested sleeps and returns immediately
pub struct MockDelay {
    sleeps_ms: Vec<u32>,
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            sleeps_ms: Vec::new(),
            total_ns: 0,
        }
    }

    /// Millisecond sleeps in request order
    pub fn sleeps_ms(&self) -> &[u32] {
        &self.sleeps_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Fixed seed so random routines replay identically
pub const SEED: u64 = 0x5EED;

/// Returns true if every channel of `later` is at most the one in `earlier`
pub fn not_brighter(earlier: Pixel, later: Pixel) -> bool {
    later.red <= earlier.red && later.green <= earlier.green && later.blue <= earlier.blue
}

pub fn is_black(pixel: Pixel) -> bool {
    pixel == BLACK
}
