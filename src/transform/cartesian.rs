//! Cartesian-domain transforms.
//!
//! Coordinates are Q16.16 with the display mapped into roughly `[-1, 1)`.
//! Bounded coordinate arithmetic saturates; noise-lattice coordinates wrap
//! modulo 2^32 by design.

use embassy_time::Instant;

use crate::angle::Angle;
use crate::context::PipelineContext;
use crate::coords::isqrt64;
use crate::fixed::{Fixed, Fraction};
use crate::motion::{AngleMotion, CameraRig, PointMotion};
use crate::noise::{hash64, noise3};
use crate::signal::Signal;
use crate::trig::{cos16, sin16};

/// Rotate `(x, y)` by a cached Q1.15 sine/cosine pair, rounding.
#[allow(clippy::cast_possible_truncation)]
fn rotate_q15(x: Fixed, y: Fixed, sin: i16, cos: i16) -> (Fixed, Fixed) {
    let (xs, ys) = (i64::from(x.raw()), i64::from(y.raw()));
    let (s, c) = (i64::from(sin), i64::from(cos));
    let rx = (xs * c - ys * s + (1 << 14)) >> 15;
    let ry = (xs * s + ys * c + (1 << 14)) >> 15;
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (Fixed::from_raw(clamp(rx)), Fixed::from_raw(clamp(ry)))
}

/// Saturating `value * weight` where `weight` is Q16.16.
#[allow(clippy::cast_possible_truncation)]
fn scale_i32(value: i32, weight: Fixed) -> i32 {
    let wide = (i64::from(value) * i64::from(weight.raw()) + (1 << 15)) >> 16;
    wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Rotation about the origin.
#[derive(Debug, Clone)]
pub struct RotateTransform {
    motion: AngleMotion,
    sin: i16,
    cos: i16,
}

impl RotateTransform {
    pub fn new(motion: AngleMotion) -> Self {
        Self {
            motion,
            sin: 0,
            cos: i16::MAX,
        }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.motion.advance(now);
        let angle = self.motion.angle();
        self.sin = sin16(angle);
        self.cos = cos16(angle);
    }

    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        rotate_q15(x, y, self.sin, self.cos)
    }
}

/// Log-scale zoom: the signal's value is a base-2 exponent, converted once
/// per frame.
#[derive(Debug, Clone)]
pub struct ZoomTransform {
    log_scale: Signal,
    inverse: Fixed,
}

impl ZoomTransform {
    pub fn new(log_scale: Signal) -> Self {
        let inverse = log_scale.value().neg().exp2();
        Self { log_scale, inverse }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.log_scale.advance(now);
        self.inverse = self.log_scale.value().neg().exp2();
    }

    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        (x.saturating_mul(self.inverse), y.saturating_mul(self.inverse))
    }
}

/// Positional offset from a two-signal motion.
#[derive(Debug, Clone)]
pub struct TranslateTransform {
    motion: PointMotion,
}

impl TranslateTransform {
    pub const fn new(motion: PointMotion) -> Self {
        Self { motion }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.motion.advance(now);
    }

    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        let (ox, oy) = self.motion.position();
        (x.saturating_add(ox), y.saturating_add(oy))
    }
}

/// Full camera frame: zoom (cached in the rig), rotation, vortex swirl and
/// pan, applied in that order. Publishes the inverse scale for the colour
/// stage's zoom normalization.
#[derive(Debug, Clone)]
pub struct CameraTransform {
    rig: CameraRig,
    sin: i16,
    cos: i16,
}

impl CameraTransform {
    pub fn new(rig: CameraRig) -> Self {
        Self {
            rig,
            sin: 0,
            cos: i16::MAX,
        }
    }

    pub(crate) fn advance(&mut self, now: Instant, ctx: &mut PipelineContext) {
        self.rig.advance(now);
        let rotation = self.rig.rotation();
        self.sin = sin16(rotation);
        self.cos = cos16(rotation);
        ctx.zoom_norm = self.rig.inverse_linear_scale();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        let inverse = self.rig.inverse_linear_scale();
        let (x, y) = (x.saturating_mul(inverse), y.saturating_mul(inverse));

        // Swirl angle grows with distance from the axis; the product wraps
        // into angle units like every other angular quantity.
        let strength = self.rig.vortex_strength();
        let (x, y) = if strength.raw() == 0 {
            (x, y)
        } else {
            let rr = i64::from(x.raw()) * i64::from(x.raw())
                + i64::from(y.raw()) * i64::from(y.raw());
            let radius = isqrt64(rr as u64).min(u32::from(u16::MAX));
            let twist = ((i64::from(strength.raw()) * i64::from(radius)) >> 15) as u16;
            let twist = Angle::from_raw(twist);
            rotate_q15(x, y, sin16(twist), cos16(twist))
        };

        let (x, y) = rotate_q15(x, y, self.sin, self.cos);
        let (ox, oy) = self.rig.position();
        (x.saturating_add(ox), y.saturating_add(oy))
    }
}

/// Horizontal shear proportional to `y`.
#[derive(Debug, Clone)]
pub struct ShearTransform {
    amount: Signal,
}

impl ShearTransform {
    pub const fn new(amount: Signal) -> Self {
        Self { amount }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.amount.advance(now);
    }

    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        (x.saturating_add(self.amount.value().saturating_mul(y)), y)
    }
}

/// Quadratic bend: `y` is displaced by `amount * x^2`.
#[derive(Debug, Clone)]
pub struct BendTransform {
    amount: Signal,
}

impl BendTransform {
    pub const fn new(amount: Signal) -> Self {
        Self { amount }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.amount.advance(now);
    }

    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        let curve = self.amount.value().saturating_mul(x.saturating_mul(x));
        (x, y.saturating_add(curve))
    }
}

/// Smallest permitted perspective denominator magnitude (1/16). Bounds the
/// maximum single-frame coordinate excursion near the horizon line.
const MIN_PERSPECTIVE_DENOM: i32 = 1 << 12;

/// Perspective convergence: `x` is scaled by `1 / (1 + k*y)`.
#[derive(Debug, Clone)]
pub struct PerspectiveTransform {
    strength: Signal,
}

impl PerspectiveTransform {
    pub const fn new(strength: Signal) -> Self {
        Self { strength }
    }

    pub(crate) fn advance(&mut self, now: Instant) {
        self.strength.advance(now);
    }

    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        let mut denom = Fixed::ONE.saturating_add(self.strength.value().saturating_mul(y));
        if denom.raw().abs() < MIN_PERSPECTIVE_DENOM {
            denom = if denom.raw() < 0 {
                Fixed::from_raw(-MIN_PERSPECTIVE_DENOM)
            } else {
                Fixed::from_raw(MIN_PERSPECTIVE_DENOM)
            };
        }
        (x.saturating_mul(Fixed::ONE.saturating_div(denom)), y)
    }
}

/// Half a lattice cell: the gradient estimation offset.
const WARP_EPSILON: u32 = 1 << 15;

/// Noise/curl domain warp.
///
/// Samples the noise field at four offset points to approximate a gradient,
/// then displaces the coordinate along it (direct) or perpendicular to it
/// (curl, divergence-free). Lattice coordinates wrap modulo 2^32: the
/// sampled domain is conceptually infinite and tileable.
#[derive(Debug, Clone)]
pub struct WarpTransform {
    strength: Signal,
    depth: AngleMotion,
    frequency: Fixed,
    curl: bool,
}

impl WarpTransform {
    pub const fn new(strength: Signal, depth: AngleMotion, frequency: Fixed, curl: bool) -> Self {
        Self {
            strength,
            depth,
            frequency,
            curl,
        }
    }

    pub(crate) fn advance(&mut self, now: Instant, ctx: &mut PipelineContext) {
        self.strength.advance(now);
        self.depth.advance(now);
        ctx.noise_depth = self.depth.phase();
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub(crate) fn apply(&self, ctx: &PipelineContext, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        let ux = x.wrapping_mul(self.frequency).raw() as u32;
        let uy = y.wrapping_mul(self.frequency).raw() as u32;
        let depth = ctx.noise_depth.raw();

        let east = i32::from(noise3(ux.wrapping_add(WARP_EPSILON), uy, depth));
        let west = i32::from(noise3(ux.wrapping_sub(WARP_EPSILON), uy, depth));
        let north = i32::from(noise3(ux, uy.wrapping_add(WARP_EPSILON), depth));
        let south = i32::from(noise3(ux, uy.wrapping_sub(WARP_EPSILON), depth));

        let (gx, gy) = (east - west, north - south);
        let (dx, dy) = if self.curl { (gy, -gx) } else { (gx, gy) };

        let strength = self.strength.value();
        let x = Fixed::from_raw(x.raw().wrapping_add(scale_i32(dx, strength)));
        let y = Fixed::from_raw(y.raw().wrapping_add(scale_i32(dy, strength)));
        (x, y)
    }
}

/// Tiling with per-cell jitter.
///
/// The coordinate reduces to its cell-local value by floored division
/// (truncating division misbehaves for negative coordinates), then shifts by
/// per-cell-index noise so repeated tiles are not visually identical.
#[derive(Debug, Clone)]
pub struct TileTransform {
    cell: Fixed,
    jitter: Fraction,
}

impl TileTransform {
    pub fn new(cell: Fixed, jitter: Fraction) -> Self {
        let cell = if cell.raw() < 1 {
            Fixed::from_raw(1)
        } else {
            cell
        };
        Self { cell, jitter }
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub(crate) fn apply(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        let cell = self.cell.raw();
        let (ix, lx) = (x.raw().div_euclid(cell), x.raw().rem_euclid(cell));
        let (iy, ly) = (y.raw().div_euclid(cell), y.raw().rem_euclid(cell));

        // Per-cell offset, at most a quarter cell at full jitter.
        let mixed = hash64((ix as u32 as u64) | ((iy as u32 as u64) << 32));
        let jx = i64::from((mixed & 0xFFFF) as u16) - 32_768;
        let jy = i64::from(((mixed >> 16) & 0xFFFF) as u16) - 32_768;
        let reach = ((i64::from(cell) / 4) * i64::from(self.jitter.raw())) >> 16;
        let ox = ((jx * reach) >> 15) as i32;
        let oy = ((jy * reach) >> 15) as i32;

        let center = cell / 2;
        (
            Fixed::from_raw(lx - center + ox),
            Fixed::from_raw(ly - center + oy),
        )
    }
}
