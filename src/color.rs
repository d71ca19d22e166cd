//! Colour type and small blending utilities.

use smart_leds::RGB8;

use crate::math8::{blend8, scale8};

pub type Rgb = RGB8;

/// Create a palette from a list of hex colors (0xRRGGBB format)
#[macro_export]
macro_rules! hex_palette {
    ($($color:expr),* $(,)?) => {
        [
            $($crate::color::rgb_from_u32($color)),*
        ]
    };
}

/// Unpack a `0xRRGGBB` literal.
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(value: u32) -> Rgb {
    Rgb {
        r: ((value >> 16) & 0xFF) as u8,
        g: ((value >> 8) & 0xFF) as u8,
        b: (value & 0xFF) as u8,
    }
}

/// Blend two colors; `amount_of_b` 0 returns `a`, 255 returns `b`.
pub const fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Scale all three channels by a brightness factor.
pub const fn scale_color(color: Rgb, brightness: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, brightness),
        g: scale8(color.g, brightness),
        b: scale8(color.b, brightness),
    }
}
