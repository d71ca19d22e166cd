//! Polar/Cartesian coordinate formulas: integer square root, atan2 in turns,
//! and the conversions used by pipeline domain-conversion steps.
//!
//! Cartesian coordinates are Q16.16 with the display mapped into roughly
//! `[-1, 1)`; radius is a Q0.16 fraction of the display radius.

use crate::angle::{Angle, HALF_TURN, QUARTER_TURN};
use crate::fixed::{Fixed, Fraction};
use crate::trig::{cos16, sin16};

/// Exact integer square root (restoring method, bit by bit).
pub fn isqrt64(value: u64) -> u32 {
    let mut remainder = value;
    let mut result: u64 = 0;
    let mut bit: u64 = 1 << 62;
    while bit > value {
        bit >>= 2;
    }
    while bit != 0 {
        if remainder >= result + bit {
            remainder -= result + bit;
            result = (result >> 1) + bit;
        } else {
            result >>= 1;
        }
        bit >>= 2;
    }
    #[allow(clippy::cast_possible_truncation)]
    {
        result as u32
    }
}

/// First-octant arctangent: `z` in Q1.15 `[0, 32768]`, result in angle units
/// `[0, 8192]`.
///
/// `atan(z) ~= (pi/4)z + 0.273 z (1 - z)` expressed in turns; worst error is
/// about 40 angle units (0.22 deg).
#[allow(clippy::cast_possible_truncation)]
fn atan_octant(z: i32) -> i32 {
    let z = i64::from(z);
    let correction = (2_847 * z * (32_768 - z)) >> 15;
    ((8_192 * z + correction) >> 15) as i32
}

/// Approximate atan2 returning the angle of `(x, y)` in turns.
///
/// Total for all inputs; the origin maps to angle 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn atan2_angle(y: i32, x: i32) -> Angle {
    if x == 0 && y == 0 {
        return Angle::ZERO;
    }
    let ax = i64::from(x).unsigned_abs();
    let ay = i64::from(y).unsigned_abs();
    let mut units = if ax >= ay {
        let z = ((ay << 15) / ax) as i32;
        atan_octant(z)
    } else {
        let z = ((ax << 15) / ay) as i32;
        i32::from(QUARTER_TURN) - atan_octant(z)
    };
    if x < 0 {
        units = i32::from(HALF_TURN) - units;
    }
    if y < 0 {
        units = -units;
    }
    Angle::from_raw(units as u16)
}

/// Cartesian to polar: angle via [`atan2_angle`], radius via the integer
/// square root of the sum of squares, clamped into the fractional range.
pub fn cartesian_to_polar(x: Fixed, y: Fixed) -> (Angle, Fraction) {
    let xx = i64::from(x.raw()) * i64::from(x.raw());
    let yy = i64::from(y.raw()) * i64::from(y.raw());
    #[allow(clippy::cast_sign_loss)]
    let radius = isqrt64((xx + yy) as u64);
    let radius = if radius > u32::from(u16::MAX) {
        u16::MAX
    } else {
        #[allow(clippy::cast_possible_truncation)]
        {
            radius as u16
        }
    };
    (atan2_angle(y.raw(), x.raw()), Fraction::from_raw(radius))
}

/// Polar to Cartesian: Q1.15 trig sample scaled by the Q0.16 radius.
pub fn polar_to_cartesian(angle: Angle, radius: Fraction) -> (Fixed, Fixed) {
    let r = i32::from(radius.raw());
    // Q1.15 x Q0.16 >> 15 -> Q16.16; peak product stays inside i32.
    let x = (i32::from(cos16(angle)) * r) >> 15;
    let y = (i32::from(sin16(angle)) * r) >> 15;
    (Fixed::from_raw(x), Fixed::from_raw(y))
}
