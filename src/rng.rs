//! Small deterministic generator for seeding initial phases.
//!
//! Construction takes an explicit seed so pipeline setup is reproducible;
//! there is no process-wide RNG state anywhere in the crate.

use crate::angle::Phase;
use crate::noise::hash64;

/// SplitMix-based sequence generator.
#[derive(Debug, Clone)]
pub struct SeedRng {
    state: u64,
}

impl SeedRng {
    pub const fn new(seed: u32) -> Self {
        Self {
            state: seed as u64,
        }
    }

    /// Next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        hash64(self.state)
    }

    /// Next full-range phase, for decorrelating waveform start points.
    pub fn next_phase(&mut self) -> Phase {
        Phase::from_raw(self.next_u32())
    }
}
