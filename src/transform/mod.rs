//! Coordinate transforms with compile-time known variants
//!
//! All transforms are stored in closed enums to avoid heap allocations and
//! virtual dispatch, and to make the Cartesian/Polar domain distinction a
//! type-system fact. Each variant owns its signals directly.
//!
//! Every transform follows the same two-phase shape: `advance` is the single
//! per-frame mutation point (integrates signals, caches expensive derived
//! values, writes context fields), and `apply` is a pure read that maps one
//! coordinate with a small closed-form fixed-point formula.

mod cartesian;
mod polar;

use embassy_time::Instant;

pub use cartesian::{
    BendTransform, CameraTransform, PerspectiveTransform, RotateTransform,
    ShearTransform, TileTransform, TranslateTransform, WarpTransform, ZoomTransform,
};
pub use polar::{
    ColorCycleTransform, KaleidoscopeTransform, LensTransform, PosterizeTransform,
    SpinTransform, VortexTransform,
};

use crate::angle::Angle;
use crate::context::PipelineContext;
use crate::fixed::{Fixed, Fraction};

/// Transform slot operating on Cartesian coordinates.
#[derive(Debug, Clone)]
pub enum CartesianTransform {
    /// Full camera frame: pan, rotation, cached zoom, vortex swirl.
    Camera(CameraTransform),
    /// Rotation about the origin.
    Rotate(RotateTransform),
    /// Log-scale zoom about the origin.
    Zoom(ZoomTransform),
    /// Positional offset.
    Translate(TranslateTransform),
    /// Horizontal shear proportional to `y`.
    Shear(ShearTransform),
    /// Quadratic bend of `y` along `x`.
    Bend(BendTransform),
    /// Perspective convergence with a floor-clamped denominator.
    Perspective(PerspectiveTransform),
    /// Noise/curl domain warp.
    Warp(WarpTransform),
    /// Tiling with per-cell jitter.
    Tile(TileTransform),
}

/// Transform slot operating on Polar coordinates.
#[derive(Debug, Clone)]
pub enum PolarTransform {
    /// Angular offset from an angle motion.
    Spin(SpinTransform),
    /// Radius-proportional angular twist.
    Vortex(VortexTransform),
    /// Kaleidoscopic folding into `N` facets, optionally mirrored.
    Kaleidoscope(KaleidoscopeTransform),
    /// Barrel/pincushion radial distortion.
    Lens(LensTransform),
    /// Radial banding.
    Posterize(PosterizeTransform),
    /// Writes the palette shift; identity on coordinates.
    ColorCycle(ColorCycleTransform),
}

impl CartesianTransform {
    /// Advance owned signals and refresh cached per-frame derivations.
    pub fn advance(&mut self, now: Instant, ctx: &mut PipelineContext) {
        match self {
            Self::Camera(t) => t.advance(now, ctx),
            Self::Rotate(t) => t.advance(now),
            Self::Zoom(t) => t.advance(now),
            Self::Translate(t) => t.advance(now),
            Self::Shear(t) => t.advance(now),
            Self::Bend(t) => t.advance(now),
            Self::Perspective(t) => t.advance(now),
            Self::Warp(t) => t.advance(now, ctx),
            Self::Tile(_) => {}
        }
    }

    /// Map one coordinate. Pure read of the frame's frozen state.
    pub fn apply(&self, ctx: &PipelineContext, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        match self {
            Self::Camera(t) => t.apply(x, y),
            Self::Rotate(t) => t.apply(x, y),
            Self::Zoom(t) => t.apply(x, y),
            Self::Translate(t) => t.apply(x, y),
            Self::Shear(t) => t.apply(x, y),
            Self::Bend(t) => t.apply(x, y),
            Self::Perspective(t) => t.apply(x, y),
            Self::Warp(t) => t.apply(ctx, x, y),
            Self::Tile(t) => t.apply(x, y),
        }
    }
}

impl PolarTransform {
    /// Advance owned signals and publish context fields.
    pub fn advance(&mut self, now: Instant, ctx: &mut PipelineContext) {
        match self {
            Self::Spin(t) => t.advance(now),
            Self::Vortex(t) => t.advance(now),
            Self::Kaleidoscope(_) | Self::Posterize(_) => {}
            Self::Lens(t) => t.advance(now),
            Self::ColorCycle(t) => t.advance(now, ctx),
        }
    }

    /// Map one coordinate. Pure read of the frame's frozen state.
    pub fn apply(&self, angle: Angle, radius: Fraction) -> (Angle, Fraction) {
        match self {
            Self::Spin(t) => t.apply(angle, radius),
            Self::Vortex(t) => t.apply(angle, radius),
            Self::Kaleidoscope(t) => t.apply(angle, radius),
            Self::Lens(t) => t.apply(angle, radius),
            Self::Posterize(t) => t.apply(angle, radius),
            Self::ColorCycle(_) => (angle, radius),
        }
    }
}
