mod tests {
    use polar_light_composer::angle::Angle;
    use polar_light_composer::coords::{
        atan2_angle, cartesian_to_polar, isqrt64, polar_to_cartesian,
    };
    use polar_light_composer::fixed::{Fixed, Fraction};
    use polar_light_composer::trig::{cos16, sin16};

    #[test]
    fn test_sin16_cardinal_points() {
        assert_eq!(sin16(Angle::from_raw(0)), 0);
        assert_eq!(sin16(Angle::from_raw(0x4000)), 32_767);
        assert_eq!(sin16(Angle::from_raw(0x8000)), 0);
        assert_eq!(sin16(Angle::from_raw(0xC000)), -32_767);
        // Table point at 1/8 turn: sin(45 deg) in Q1.15.
        assert_eq!(sin16(Angle::from_raw(0x2000)), 23_170);
    }

    #[test]
    fn test_cos16_is_shifted_sin16() {
        assert_eq!(cos16(Angle::from_raw(0)), 32_767);
        assert_eq!(cos16(Angle::from_raw(0x4000)), 0);
        assert_eq!(cos16(Angle::from_raw(0x8000)), -32_767);
        for raw in [0_u16, 1_000, 20_000, 40_000, 65_000] {
            let a = Angle::from_raw(raw);
            assert_eq!(cos16(a), sin16(Angle::from_raw(raw.wrapping_add(0x4000))));
        }
    }

    #[test]
    fn test_sin16_total_over_full_domain() {
        for raw in (0..=u16::MAX).step_by(97) {
            let v = sin16(Angle::from_raw(raw));
            assert!((-32_767..=32_767).contains(&v));
        }
    }

    #[test]
    fn test_isqrt64() {
        assert_eq!(isqrt64(0), 0);
        assert_eq!(isqrt64(1), 1);
        assert_eq!(isqrt64(4), 2);
        assert_eq!(isqrt64(65_536), 256);
        assert_eq!(isqrt64(1 << 32), 65_536);
        // Floor behaviour between squares.
        assert_eq!(isqrt64(99), 9);
    }

    #[test]
    fn test_atan2_cardinal_and_diagonal() {
        assert_eq!(atan2_angle(0, 0).raw(), 0);
        assert_eq!(atan2_angle(0, 100).raw(), 0);
        assert_eq!(atan2_angle(100, 0).raw(), 0x4000);
        assert_eq!(atan2_angle(0, -100).raw(), 0x8000);
        assert_eq!(atan2_angle(-100, 0).raw(), 0xC000);
        assert_eq!(atan2_angle(100, 100).raw(), 0x2000);
    }

    #[test]
    fn test_round_trip_within_epsilon() {
        // Integer sqrt/atan approximation error stays under 256 raw units for
        // all |x|,|y| < 2^15 (about 0.4% of the half-scale input).
        const EPSILON: i32 = 256;
        let points = [
            (20_000, 10_000),
            (-20_000, 10_000),
            (-20_000, -10_000),
            (20_000, -10_000),
            (32_000, 1),
            (1, 32_000),
            (-3, -32_000),
            (12_345, -23_456),
            (-30_000, 30_000),
            (700, 800),
        ];
        for &(x, y) in &points {
            let (angle, radius) = cartesian_to_polar(Fixed::from_raw(x), Fixed::from_raw(y));
            let (rx, ry) = polar_to_cartesian(angle, radius);
            assert!(
                (rx.raw() - x).abs() <= EPSILON && (ry.raw() - y).abs() <= EPSILON,
                "({x}, {y}) -> ({}, {})",
                rx.raw(),
                ry.raw()
            );
        }
    }

    #[test]
    fn test_cartesian_to_polar_radius_saturates() {
        // Far outside the unit circle the radius clamps instead of wrapping.
        let (_, radius) = cartesian_to_polar(Fixed::from_int(4), Fixed::from_int(4));
        assert_eq!(radius, Fraction::MAX);
    }
}
