mod tests {
    use embassy_time::Instant;
    use polar_light_composer::angle::Angle;
    use polar_light_composer::fixed::{Fixed, Fraction};
    use polar_light_composer::motion::{AngleMotion, CameraRig, PointMotion};
    use polar_light_composer::signal::{BoundaryPolicy, Signal};
    use polar_light_composer::waveform::Waveform;

    fn still(position: Fixed) -> Signal {
        Signal::new(
            position,
            Waveform::Constant(Fixed::ZERO),
            Fraction::ZERO,
            BoundaryPolicy::Unbounded,
        )
    }

    fn rig_with_log_zoom(log_zoom: Fixed) -> CameraRig {
        let rotation = Signal::angular(Waveform::Constant(Fixed::ZERO), Fraction::ZERO);
        CameraRig::new(
            still(Fixed::ZERO),
            still(Fixed::ZERO),
            still(log_zoom),
            rotation,
            still(Fixed::ZERO),
        )
    }

    #[test]
    fn test_angle_motion_spin() {
        let mut motion = AngleMotion::spinning(Fixed::ONE);
        motion.advance(Instant::from_millis(0));
        assert_eq!(motion.angle(), Angle::ZERO);
        motion.advance(Instant::from_millis(100));
        // One turn per second for 0.1 s.
        assert_eq!(motion.angle().raw(), 6_554);
    }

    #[test]
    fn test_angle_motion_start_offset() {
        let motion = AngleMotion::spinning(Fixed::ZERO).with_start(Angle::from_raw(0x4000));
        assert_eq!(motion.angle().raw(), 0x4000);
    }

    #[test]
    fn test_point_motion_positions() {
        let mut motion = PointMotion::new(
            still(Fixed::from_int(2)),
            still(Fixed::from_int(-3)),
        );
        motion.advance(Instant::from_millis(0));
        assert_eq!(motion.position(), (Fixed::from_int(2), Fixed::from_int(-3)));
    }

    #[test]
    fn test_camera_identity_scale() {
        let rig = rig_with_log_zoom(Fixed::ZERO);
        assert_eq!(rig.inverse_linear_scale(), Fixed::ONE);
    }

    #[test]
    fn test_camera_zoom_quantization_absorbs_jitter() {
        // Jitter below the 1/64 grid does not move the cached conversion.
        let rig = rig_with_log_zoom(Fixed::from_raw(512));
        assert_eq!(rig.inverse_linear_scale(), Fixed::ONE);

        let rig = rig_with_log_zoom(Fixed::from_raw(1_024));
        let inverse = rig.inverse_linear_scale().raw();
        assert!(inverse < Fixed::ONE.raw() && inverse > 64_000, "{inverse}");
    }

    #[test]
    fn test_camera_scale_clamped_at_quarter() {
        // Extreme zoom-out clamps the linear scale at 0.25x (inverse 4x).
        let rig = rig_with_log_zoom(Fixed::from_int(-3));
        assert_eq!(rig.inverse_linear_scale(), Fixed::from_int(4));
    }

    #[test]
    fn test_camera_cache_follows_coarse_changes() {
        let mut rig = rig_with_log_zoom(Fixed::ZERO);
        rig.advance(Instant::from_millis(0));
        rig.advance(Instant::from_millis(100));
        // Still signal, still identity.
        assert_eq!(rig.inverse_linear_scale(), Fixed::ONE);
    }
}
