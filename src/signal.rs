//! The physics core: a damped, bounded integrator driven by a waveform.
//!
//! Each [`Signal`] owns position, velocity and phase; it is mutated only by
//! its own [`Signal::advance`] and is never shared for write outside its
//! owning transform. All numeric edge cases saturate or clamp; a dropped
//! frame must never crash the device.

use embassy_time::Instant;

use crate::angle::Phase;
use crate::fixed::{Fixed, Fraction};
use crate::phase::{clamped_delta_ms, ms_to_seconds};
use crate::waveform::Waveform;

/// Integration sub-step bound. Chunking long deltas keeps the damping
/// exponentiation and the Euler step inside their accurate range.
pub const MAX_CHUNK_MS: u64 = 100;

/// Retention ceiling (~0.999): damped motion must always settle.
const MAX_RETENTION: Fraction = Fraction::from_raw(65_470);

/// What happens to position at the edge of its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Position saturates only at the numeric range of the type.
    Unbounded,
    /// Position stops at the bound and velocity is zeroed (inelastic stop).
    Clamp { min: Fixed, max: Fixed },
    /// Position reduces modulo `period` with a floored remainder.
    Wrap { period: Fixed },
}

impl BoundaryPolicy {
    fn apply(self, position: &mut Fixed, velocity: &mut Fixed) {
        match self {
            Self::Unbounded | Self::Wrap { .. } => {}
            Self::Clamp { min, max } => {
                if *position > max {
                    *position = max;
                    *velocity = Fixed::ZERO;
                } else if *position < min {
                    *position = min;
                    *velocity = Fixed::ZERO;
                }
            }
        }
    }
}

/// Damped waveform-driven integrator.
#[derive(Debug, Clone)]
pub struct Signal {
    position: Fixed,
    velocity: Fixed,
    phase: Phase,
    waveform: Waveform,
    retention: Fraction,
    policy: BoundaryPolicy,
    last_ms: Option<u64>,
}

impl Signal {
    /// Create a signal at `initial` position.
    ///
    /// `retention` is the fraction of velocity kept per second; it is
    /// clamped to at most ~0.999 so damped motion always settles. Raw zero
    /// disables damping entirely (an undamped integrator, not an instant
    /// stop).
    pub fn new(
        initial: Fixed,
        waveform: Waveform,
        retention: Fraction,
        policy: BoundaryPolicy,
    ) -> Self {
        let retention = if retention > MAX_RETENTION {
            MAX_RETENTION
        } else {
            retention
        };
        Self {
            position: initial,
            velocity: Fixed::ZERO,
            phase: Phase::ZERO,
            waveform,
            retention,
            policy,
            last_ms: None,
        }
    }

    /// Angular variant: position wraps over one full turn.
    pub fn angular(waveform: Waveform, retention: Fraction) -> Self {
        Self::new(
            Fixed::ZERO,
            waveform,
            retention,
            BoundaryPolicy::Wrap { period: Fixed::ONE },
        )
    }

    /// Set the starting velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Fixed) -> Self {
        self.velocity = velocity;
        self
    }

    /// Move the starting position.
    #[must_use]
    pub fn starting_at(mut self, position: Fixed) -> Self {
        self.position = position;
        self
    }

    /// Set the starting phase (drawn from an explicit [`crate::rng::SeedRng`]
    /// when decorrelation is wanted).
    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub const fn value(&self) -> Fixed {
        self.position
    }

    pub const fn velocity(&self) -> Fixed {
        self.velocity
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Integrate up to `now`.
    ///
    /// The first call only records the timestamp. Elapsed time is clamped to
    /// [`crate::phase::MAX_DELTA_MS`], then integrated in chunks of at most
    /// [`MAX_CHUNK_MS`].
    pub fn advance(&mut self, now: Instant) {
        let now_ms = now.as_millis();
        let Some(last_ms) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return;
        };
        let mut remaining = clamped_delta_ms(now_ms, last_ms);
        self.last_ms = Some(now_ms);
        while remaining > 0 {
            let chunk = remaining.min(MAX_CHUNK_MS);
            remaining -= chunk;
            self.step_chunk(ms_to_seconds(chunk));
        }
    }

    /// One Euler chunk: phase, then velocity, then damping, then position.
    fn step_chunk(&mut self, dt: Fixed) {
        let phase_velocity = self.waveform.phase_velocity(self.phase);
        self.phase = self.phase.step(phase_velocity, dt);

        let acceleration = self.waveform.acceleration(self.phase);
        self.velocity = self.velocity.saturating_add(acceleration.saturating_mul(dt));

        if let Some(factor) = self.retention_factor(dt) {
            self.velocity = self.velocity.saturating_mul(factor);
        }

        let delta = self.velocity.saturating_mul(dt);
        match self.policy {
            BoundaryPolicy::Wrap { period } if period.raw() > 0 => {
                let wrapped = self.position.raw().wrapping_add(delta.raw());
                self.position = Fixed::from_raw(wrapped.rem_euclid(period.raw()));
            }
            _ => {
                self.position = self.position.saturating_add(delta);
            }
        }

        self.policy.apply(&mut self.position, &mut self.velocity);
    }

    /// `retention^dt` via the fixed-point log2/exp2 pair; `None` when
    /// damping is disabled.
    fn retention_factor(&self, dt: Fixed) -> Option<Fixed> {
        if self.retention.raw() == 0 {
            return None;
        }
        let log = Fixed::from_fraction(self.retention).log2();
        Some(dt.saturating_mul(log).exp2())
    }
}
