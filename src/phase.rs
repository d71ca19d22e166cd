//! Wrapping phase accumulator.
//!
//! Integrates a phase velocity (turns/second) into a modulo-2^32 phase
//! across arbitrary elapsed time. The very first call only records the
//! timestamp: delta time is unknown until a second sample exists, so there
//! is deliberately no motion on the first frame.

use embassy_time::Instant;

use crate::angle::Phase;
use crate::fixed::Fixed;

/// Upper bound on a single frame's elapsed time. A longer real-world stall
/// is absorbed here so per-frame state change stays bounded.
pub const MAX_DELTA_MS: u64 = 200;

/// Convert a small millisecond count into Q16.16 seconds.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) fn ms_to_seconds(ms: u64) -> Fixed {
    // Callers clamp to MAX_DELTA_MS, so the shift cannot overflow.
    Fixed::from_raw(((ms << 16) / 1000) as i32)
}

/// Elapsed milliseconds between two raw clock samples, wrap-safe and
/// clamped to [`MAX_DELTA_MS`].
#[inline]
pub(crate) fn clamped_delta_ms(now_ms: u64, last_ms: u64) -> u64 {
    now_ms.wrapping_sub(last_ms).min(MAX_DELTA_MS)
}

/// Phase integration state.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: Phase,
    last_ms: Option<u64>,
}

impl PhaseAccumulator {
    pub const fn new(initial: Phase) -> Self {
        Self {
            phase: initial,
            last_ms: None,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance by the time elapsed since the previous call.
    ///
    /// Both the velocity multiply and the phase add wrap modulo 2^32;
    /// saturating arithmetic is forbidden for a cyclic quantity.
    pub fn advance(&mut self, now: Instant, velocity: Fixed) -> Phase {
        let now_ms = now.as_millis();
        let Some(last_ms) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return self.phase;
        };
        let delta_ms = clamped_delta_ms(now_ms, last_ms);
        self.last_ms = Some(now_ms);
        if delta_ms == 0 {
            return self.phase;
        }
        self.phase = self.phase.step(velocity, ms_to_seconds(delta_ms));
        self.phase
    }
}
