//! Per-frame shared pipeline state.
//!
//! Written by specific transforms during `advance_frame`, read by the final
//! colour stage. Reset to the configured defaults at the top of every frame,
//! so a removed writer cannot leave a stale value behind.

use crate::angle::{Angle, Phase};
use crate::fixed::Fixed;

/// Defaults restored at the start of each frame.
#[derive(Debug, Clone, Copy)]
pub struct ContextDefaults {
    /// Intensities whose palette index falls below this render black.
    pub clip_floor: u8,
    /// Brightness ceiling applied in the palette lookup.
    pub brightness_ceil: u8,
}

impl Default for ContextDefaults {
    fn default() -> Self {
        Self {
            clip_floor: 0,
            brightness_ceil: u8::MAX,
        }
    }
}

/// Per-frame shared state.
#[derive(Debug, Clone, Copy)]
pub struct PipelineContext {
    /// Wrapping shift applied to the palette index.
    pub palette_shift: Angle,
    /// Intensity clip floor (palette-index space).
    pub clip_floor: u8,
    /// Brightness ceiling.
    pub brightness_ceil: u8,
    /// Camera inverse linear scale, for zoom-aware colour normalization.
    pub zoom_norm: Fixed,
    /// Noise-field depth, shared by domain-warp steps.
    pub noise_depth: Phase,
}

impl PipelineContext {
    pub fn new(defaults: ContextDefaults) -> Self {
        Self {
            palette_shift: Angle::ZERO,
            clip_floor: defaults.clip_floor,
            brightness_ceil: defaults.brightness_ceil,
            zoom_norm: Fixed::ONE,
            noise_depth: Phase::ZERO,
        }
    }

    /// Reset to defaults; called once at the top of every frame.
    pub fn begin_frame(&mut self, defaults: ContextDefaults) {
        *self = Self::new(defaults);
    }

    /// Palette-index shift derived from the angular palette motion.
    #[allow(clippy::cast_possible_truncation)]
    pub fn palette_index_shift(&self) -> u8 {
        (self.palette_shift.raw() >> 8) as u8
    }
}
