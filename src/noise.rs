//! Smooth value noise on 1-, 2- and 3-coordinate integer lattices.
//!
//! Lattice coordinates are Q16.16 and wrap modulo 2^32 by design; the
//! sampled domain is conceptually infinite and tileable, so transforms feed
//! wrapping sums straight in.

use crate::math8::ease_in_out_quad;

/// SplitMix64-style mixer folded down to u32.
#[inline]
pub(crate) const fn hash64(x: u64) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    #[allow(clippy::cast_possible_truncation)]
    {
        (z ^ (z >> 31)) as u32
    }
}

#[inline]
const fn lattice1(x: u32) -> u16 {
    (hash64(x as u64) & 0xFFFF) as u16
}

#[inline]
const fn lattice2(x: u32, y: u32) -> u16 {
    (hash64((x as u64) | ((y as u64) << 32)) & 0xFFFF) as u16
}

#[inline]
const fn lattice3(x: u32, y: u32, z: u32) -> u16 {
    let folded = (x as u64) | ((y as u64) << 32);
    (hash64(folded ^ hash64(z as u64) as u64) & 0xFFFF) as u16
}

/// Eased interpolation weight from the fractional bits of a coordinate.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn weight(coord: u32) -> u8 {
    ease_in_out_quad(((coord >> 8) & 0xFF) as u8)
}

/// Blend two u16 lattice values.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn blend16(a: u16, b: u16, t: u8) -> u16 {
    let delta = i32::from(b) - i32::from(a);
    (i32::from(a) + ((delta * i32::from(t)) >> 8)) as u16
}

/// Smooth 1-D value noise; `x` is Q16.16, output `0..=65535`.
pub fn noise1(x: u32) -> u16 {
    let cell = x >> 16;
    let t = weight(x);
    blend16(lattice1(cell), lattice1(cell.wrapping_add(1)), t)
}

/// Smooth 2-D value noise; coordinates are Q16.16, output `0..=65535`.
pub fn noise2(x: u32, y: u32) -> u16 {
    let (cx, cy) = (x >> 16, y >> 16);
    let (tx, ty) = (weight(x), weight(y));
    let x0 = blend16(lattice2(cx, cy), lattice2(cx.wrapping_add(1), cy), tx);
    let x1 = blend16(
        lattice2(cx, cy.wrapping_add(1)),
        lattice2(cx.wrapping_add(1), cy.wrapping_add(1)),
        tx,
    );
    blend16(x0, x1, ty)
}

/// Smooth 3-D value noise; the third coordinate is typically a depth phase.
pub fn noise3(x: u32, y: u32, z: u32) -> u16 {
    let (cx, cy, cz) = (x >> 16, y >> 16, z >> 16);
    let (tx, ty, tz) = (weight(x), weight(y), weight(z));
    let mut planes = [0_u16; 2];
    for (i, plane) in planes.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let zc = cz.wrapping_add(i as u32);
        let x0 = blend16(lattice3(cx, cy, zc), lattice3(cx.wrapping_add(1), cy, zc), tx);
        let x1 = blend16(
            lattice3(cx, cy.wrapping_add(1), zc),
            lattice3(cx.wrapping_add(1), cy.wrapping_add(1), zc),
            tx,
        );
        *plane = blend16(x0, x1, ty);
    }
    blend16(planes[0], planes[1], tz)
}

/// 1-D noise centered around zero: `-32768..=32767`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn noise1_signed(x: u32) -> i16 {
    (i32::from(noise1(x)) - 32_768) as i16
}
