//! Polar-domain transforms.
//!
//! Angle arithmetic wraps; radius arithmetic saturates into `[0, 1)`. That
//! split follows the types themselves: [`Angle`] is cyclic, [`Fraction`] is
//! bounded.

use embassy_time::Instant;

use crate::angle::Angle;
use crate::context::PipelineContext;
use crate::fixed::{Fixed, Fraction};
use crate::motion::AngleMotion;
use crate::signal::Signal;

/// Angular offset from an angle motion.
#[derive(Debug, Clone)]
pub struct SpinTransform {
    motion: AngleMotion,
}

impl SpinTransform {
    pub const fn new(motion: AngleMotion) -> Self {
        Self { motion }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.motion.advance(now);
    }

    pub(crate) fn apply(&self, angle: Angle, radius: Fraction) -> (Angle, Fraction) {
        (angle.wrapping_add(self.motion.angle()), radius)
    }
}

/// Radius-proportional angular twist.
#[derive(Debug, Clone)]
pub struct VortexTransform {
    strength: Signal,
}

impl VortexTransform {
    pub const fn new(strength: Signal) -> Self {
        Self { strength }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.strength.advance(now);
    }

    /// `offset = strength(Q16.16) * radius(Q0.16) >> 15`, wrapping into
    /// angle units. Large strengths intentionally wrap rather than clamp;
    /// that is the angle domain's own semantic.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn apply(&self, angle: Angle, radius: Fraction) -> (Angle, Fraction) {
        let offset =
            (i64::from(self.strength.value().raw()) * i64::from(radius.raw())) >> 15;
        (angle.wrapping_add(Angle::from_raw(offset as u16)), radius)
    }
}

/// Kaleidoscopic folding into `facets` wedges, optionally mirrored.
#[derive(Debug, Clone)]
pub struct KaleidoscopeTransform {
    facets: u16,
    mirror: bool,
}

impl KaleidoscopeTransform {
    pub fn new(facets: u16, mirror: bool) -> Self {
        Self {
            facets: facets.max(1),
            mirror,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn apply(&self, angle: Angle, radius: Fraction) -> (Angle, Fraction) {
        let segment = 65_536 / u32::from(self.facets);
        let a = u32::from(angle.raw());
        let facet = a / segment;
        let mut local = a % segment;
        // Reflect odd facets; a local angle of exactly 0 must stay 0, or the
        // seam pixel doubles to the full segment width.
        if self.mirror && facet & 1 == 1 && local != 0 {
            local = segment - local;
        }
        (Angle::from_raw(local as u16), radius)
    }
}

/// Barrel (`k > 0`) or pincushion (`k < 0`) radial distortion:
/// `radius' = radius * (1 + k * radius)`, clamped to `[0, max]`.
#[derive(Debug, Clone)]
pub struct LensTransform {
    curvature: Signal,
    max_radius: Fraction,
}

impl LensTransform {
    pub const fn new(curvature: Signal, max_radius: Fraction) -> Self {
        Self {
            curvature,
            max_radius,
        }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.curvature.advance(now);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn apply(&self, angle: Angle, radius: Fraction) -> (Angle, Fraction) {
        let k = i64::from(self.curvature.value().raw());
        let r = i64::from(radius.raw());
        let gain = i64::from(Fixed::ONE.raw()) + ((k * r) >> 16);
        let bowed = (r * gain) >> 16;
        let clamped = bowed.clamp(0, i64::from(self.max_radius.raw()));
        (angle, Fraction::from_raw(clamped as u16))
    }
}

/// Radial banding: quantizes the radius into `levels` bands, sampling each
/// band at its center.
#[derive(Debug, Clone)]
pub struct PosterizeTransform {
    levels: u8,
}

impl PosterizeTransform {
    pub fn new(levels: u8) -> Self {
        Self {
            levels: levels.max(1),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn apply(&self, angle: Angle, radius: Fraction) -> (Angle, Fraction) {
        let step = 65_536 / u32::from(self.levels);
        let band = u32::from(radius.raw()) / step;
        let centered = (band * step + step / 2).min(u32::from(u16::MAX));
        (angle, Fraction::from_raw(centered as u16))
    }
}

/// Palette motion: writes the context palette shift each frame, identity on
/// coordinates.
#[derive(Debug, Clone)]
pub struct ColorCycleTransform {
    motion: AngleMotion,
}

impl ColorCycleTransform {
    pub const fn new(motion: AngleMotion) -> Self {
        Self { motion }
    }

    pub(crate) fn advance(&mut self, now: Instant, ctx: &mut PipelineContext) {
        self.motion.advance(now);
        ctx.palette_shift = self.motion.angle();
    }
}
