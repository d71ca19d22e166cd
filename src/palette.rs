//! Palette-indexed colour lookup with linear blending.
//!
//! Unlike a plain gradient ramp, the lookup wraps from the last entry back to
//! the first so a continuously shifting palette index never shows a seam.

use crate::color::{Rgb, blend_colors, scale_color};
use crate::hex_palette;

/// Look up a palette colour by 8-bit index with linear blending between
/// entries, scaled by `brightness`.
///
/// The index space maps the full `0..=255` range across all entries,
/// wrapping from the last back to the first. An empty palette is black.
#[allow(clippy::cast_possible_truncation)]
pub fn color_from_palette(palette: &[Rgb], index: u8, brightness: u8) -> Rgb {
    let Some(&first) = palette.first() else {
        return Rgb { r: 0, g: 0, b: 0 };
    };
    if palette.len() == 1 {
        return scale_color(first, brightness);
    }

    let segments = palette.len() as u16;
    let scaled = u16::from(index) * segments; // 0..255*N
    let segment = (scaled >> 8) as usize; // < N
    let local = (scaled & 0xFF) as u8;
    let next = if segment + 1 == palette.len() {
        first
    } else {
        palette[segment + 1]
    };

    scale_color(blend_colors(palette[segment], next, local), brightness)
}

// Cool blue/teal/violet tones.
#[allow(clippy::unreadable_literal)]
pub const BOREAL_PALETTE: [Rgb; 6] = hex_palette![
    0x001A66, // Night blue
    0x00B4A0, // Teal
    0x10D060, // Green
    0x00A0E0, // Cyan
    0x6A20C8, // Violet
    0xD03890  // Magenta
];

// Warm red/orange/gold tones.
#[allow(clippy::unreadable_literal)]
pub const EMBER_PALETTE: [Rgb; 5] = hex_palette![
    0x2A000A, // Near black red
    0x9E0020, // Deep red
    0xE84800, // Orange
    0xFFA028, // Gold
    0xFFE090  // Pale yellow
];
