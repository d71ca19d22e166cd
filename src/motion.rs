//! Composite modulators: several signals assembled into a coherent moving
//! reference frame.

use embassy_time::Instant;

use crate::angle::{Angle, Phase};
use crate::fixed::{Fixed, Fraction};
use crate::signal::{BoundaryPolicy, Signal};
use crate::waveform::Waveform;

/// Angular motion: one wrap-policy signal whose position is a turn fraction.
#[derive(Debug, Clone)]
pub struct AngleMotion {
    signal: Signal,
}

impl AngleMotion {
    /// Driven by `waveform` with the given damping.
    pub fn new(waveform: Waveform, retention: Fraction) -> Self {
        Self {
            signal: Signal::angular(waveform, retention),
        }
    }

    /// Constant spin at `turns_per_second`, no damping.
    pub fn spinning(turns_per_second: Fixed) -> Self {
        Self {
            signal: Signal::angular(Waveform::Constant(Fixed::ZERO), Fraction::ZERO)
                .with_velocity(turns_per_second),
        }
    }

    #[must_use]
    pub fn with_start(mut self, angle: Angle) -> Self {
        self.signal = self.signal.starting_at(Fixed::from_raw(i32::from(angle.raw())));
        self
    }

    pub fn advance(&mut self, now: Instant) {
        self.signal.advance(now);
    }

    /// Current angle. Position wraps over one turn, so the raw Q16.16 value
    /// is directly the angle-unit count.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn angle(&self) -> Angle {
        Angle::from_raw(self.signal.value().raw() as u16)
    }

    /// Current position promoted to a phase.
    pub fn phase(&self) -> Phase {
        self.angle().to_phase()
    }
}

/// Two-dimensional positional motion.
#[derive(Debug, Clone)]
pub struct PointMotion {
    x: Signal,
    y: Signal,
}

impl PointMotion {
    pub const fn new(x: Signal, y: Signal) -> Self {
        Self { x, y }
    }

    pub fn advance(&mut self, now: Instant) {
        self.x.advance(now);
        self.y.advance(now);
    }

    pub const fn position(&self) -> (Fixed, Fixed) {
        (self.x.value(), self.y.value())
    }
}

/// Quantization grid for the zoom cache key: 1/64 of a log2 unit. The raw
/// log-zoom signal is noisy even when visually static; recomputing the
/// lookup-table `exp2` on every jittered frame would dominate the rig's
/// cost.
const ZOOM_QUANT_BITS: u32 = 10;

/// Lowest permitted linear scale (0.25x), i.e. inverse scale at most 4x.
const MAX_INVERSE_SCALE: Fixed = Fixed::from_raw(4 << 16);

/// Camera rig: pan, log-zoom, rotation and vortex strength, with a cached
/// inverse linear scale keyed on the quantized log-zoom.
#[derive(Debug, Clone)]
pub struct CameraRig {
    x: Signal,
    y: Signal,
    log_zoom: Signal,
    rotation: Signal,
    vortex: Signal,
    zoom_key: i32,
    inverse_linear_scale: Fixed,
}

impl CameraRig {
    pub fn new(x: Signal, y: Signal, log_zoom: Signal, rotation: Signal, vortex: Signal) -> Self {
        let zoom_key = log_zoom.value().raw() >> ZOOM_QUANT_BITS;
        Self {
            x,
            y,
            log_zoom,
            rotation,
            vortex,
            zoom_key,
            inverse_linear_scale: Self::convert(zoom_key),
        }
    }

    /// A rig that holds the identity frame until its signals say otherwise.
    pub fn fixed() -> Self {
        let still = || {
            Signal::new(
                Fixed::ZERO,
                Waveform::Constant(Fixed::ZERO),
                Fraction::ZERO,
                BoundaryPolicy::Unbounded,
            )
        };
        let rotation = Signal::angular(Waveform::Constant(Fixed::ZERO), Fraction::ZERO);
        Self::new(still(), still(), still(), rotation, still())
    }

    pub fn advance(&mut self, now: Instant) {
        self.x.advance(now);
        self.y.advance(now);
        self.log_zoom.advance(now);
        self.rotation.advance(now);
        self.vortex.advance(now);

        let key = self.log_zoom.value().raw() >> ZOOM_QUANT_BITS;
        if key != self.zoom_key {
            self.zoom_key = key;
            self.inverse_linear_scale = Self::convert(key);
        }
    }

    /// Quantized log-zoom to inverse linear scale, clamped away from the
    /// near-zero-zoom singularity.
    fn convert(zoom_key: i32) -> Fixed {
        let quantized = Fixed::from_raw(zoom_key.saturating_mul(1 << ZOOM_QUANT_BITS));
        quantized.neg().exp2().clamp(Fixed::ZERO, MAX_INVERSE_SCALE)
    }

    pub const fn position(&self) -> (Fixed, Fixed) {
        (self.x.value(), self.y.value())
    }

    pub fn log_zoom(&self) -> Fixed {
        self.log_zoom.value()
    }

    /// Cached; recomputed only when the quantized log-zoom moved.
    pub const fn inverse_linear_scale(&self) -> Fixed {
        self.inverse_linear_scale
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rotation(&self) -> Angle {
        Angle::from_raw(self.rotation.value().raw() as u16)
    }

    pub const fn vortex_strength(&self) -> Fixed {
        self.vortex.value()
    }
}
