mod tests {
    use polar_light_composer::angle::{Angle, Phase};
    use polar_light_composer::fixed::Fixed;
    use polar_light_composer::phase::PhaseAccumulator;
    use embassy_time::Instant;

    #[test]
    fn test_promotion_demotion() {
        let angle = Angle::from_raw(0x1234);
        assert_eq!(angle.to_phase().raw(), 0x1234_0000);
        assert_eq!(angle.to_phase().angle(), angle);
        assert_eq!(Phase::from_raw(0x1234_8000).angle().raw(), 0x1234);
    }

    #[test]
    fn test_angle_wrapping() {
        let a = Angle::from_raw(0xF000);
        assert_eq!(a.wrapping_add(Angle::from_raw(0x2000)).raw(), 0x1000);
        assert_eq!(Angle::ZERO.wrapping_sub(Angle::from_raw(1)).raw(), 0xFFFF);
    }

    #[test]
    fn test_angle_from_ratio() {
        assert_eq!(Angle::from_ratio(1, 4).raw(), 0x4000);
        assert_eq!(Angle::from_ratio(1, 2).raw(), 0x8000);
        assert_eq!(Angle::from_ratio(0, 7).raw(), 0);
        assert_eq!(Angle::from_ratio(1, 0).raw(), 0);
    }

    #[test]
    fn test_phase_step_wraps_modulo() {
        // One full turn per second over one second of steps returns close to
        // the start; the integer turns vanish in the wrap.
        let mut phase = Phase::ZERO;
        let dt = Fixed::from_ratio(200, 1000);
        for _ in 0..25 {
            phase = phase.step(Fixed::ONE, dt);
        }
        // 5 turns total; residual is only quantization of dt.
        let units = phase.angle().raw();
        assert!(units < 64 || units > u16::MAX - 64, "{units}");
    }

    #[test]
    fn test_phase_step_negative_velocity() {
        let phase = Phase::ZERO.step(Fixed::from_int(-1), Fixed::from_ratio(1, 4));
        // Backward quarter turn wraps to three quarters.
        let units = phase.angle().raw();
        assert!((units as i32 - 0xC000).abs() <= 1, "{units}");
    }

    #[test]
    fn test_accumulator_first_call_is_a_latch() {
        let mut acc = PhaseAccumulator::new(Phase::from_raw(42));
        let phase = acc.advance(Instant::from_millis(1_000), Fixed::ONE);
        assert_eq!(phase.raw(), 42);
    }

    #[test]
    fn test_accumulator_clamps_long_stalls() {
        let mut acc = PhaseAccumulator::new(Phase::ZERO);
        acc.advance(Instant::from_millis(0), Fixed::ONE);
        // An hour-long stall is absorbed as a single 200 ms delta.
        let stalled = acc.advance(Instant::from_millis(3_600_000), Fixed::ONE);

        let mut reference = PhaseAccumulator::new(Phase::ZERO);
        reference.advance(Instant::from_millis(0), Fixed::ONE);
        let stepped = reference.advance(Instant::from_millis(200), Fixed::ONE);

        assert_eq!(stalled, stepped);
        // 0.2 turns at one turn per second (dt quantizes to 13107/65536 s).
        assert_eq!(stepped.angle().raw(), 13_107);
    }
}
