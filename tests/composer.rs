mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use embassy_time::{Duration, Instant};
    use polar_light_composer::angle::Angle;
    use polar_light_composer::color::Rgb;
    use polar_light_composer::composer::{
        ComposerConfig, ComposerControl, ControlMailbox, FrameComposer, grid_position,
        ring_position,
    };
    use polar_light_composer::fixed::Fraction;
    use polar_light_composer::frame_scheduler::FrameScheduler;
    use polar_light_composer::mailbox::Mailbox;
    use polar_light_composer::pipeline::{Pattern, PipelineBuilder, Pipeline};
    use polar_light_composer::OutputDriver;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    static RED_ONLY: [Rgb; 1] = [RED];

    fn full_intensity(_angle: Angle, _radius: Fraction) -> u16 {
        u16::MAX
    }

    fn red_pipeline() -> Pipeline<4> {
        PipelineBuilder::<4>::new(Pattern::Polar(full_intensity), &RED_ONLY).build()
    }

    #[test]
    fn test_ring_position() {
        let (angle, radius) = ring_position(0, 4, Fraction::HALF);
        assert_eq!(angle, Angle::ZERO);
        assert_eq!(radius, Fraction::HALF);
        let (angle, _) = ring_position(1, 4, Fraction::HALF);
        assert_eq!(angle.raw(), 0x4000);
    }

    #[test]
    fn test_grid_position_corner() {
        let (angle, radius) = grid_position(0, 0, 2, 2);
        // Corner pixel center at (-0.5, -0.5): five-eighths turn, radius
        // sqrt(0.5).
        assert_eq!(angle.raw(), 0xA000);
        let r = radius.raw();
        assert!((46_300..=46_360).contains(&r), "{r}");
    }

    #[test]
    fn test_mailbox_latest_wins() {
        let mailbox: Mailbox<u8> = Mailbox::new();
        assert_eq!(mailbox.take(), None);
        assert_eq!(mailbox.post(1), None);
        assert_eq!(mailbox.post(2), Some(1));
        assert_eq!(mailbox.take(), Some(2));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_composer_brightness_controls() {
        static CONTROLS: ControlMailbox = ControlMailbox::new();
        let layout = [
            ring_position(0, 4, Fraction::HALF),
            ring_position(1, 4, Fraction::HALF),
            ring_position(2, 4, Fraction::HALF),
            ring_position(3, 4, Fraction::HALF),
        ];
        let config = ComposerConfig {
            brightness: u8::MAX,
            fade: Duration::from_millis(0),
        };
        let mut composer = FrameComposer::<8, 4>::new(
            red_pipeline(),
            &layout,
            CONTROLS.receiver(),
            &config,
        );

        let frame = composer.render(Instant::from_millis(0));
        assert_eq!(frame.len(), 4);
        assert!(frame.iter().all(|&led| led == RED));

        CONTROLS.sender().post(ComposerControl::SetBrightness(128));
        let frame = composer.render(Instant::from_millis(10));
        assert!(frame.iter().all(|&led| led == Rgb { r: 128, g: 0, b: 0 }));

        CONTROLS.sender().post(ComposerControl::PowerOff);
        let frame = composer.render(Instant::from_millis(20));
        assert!(frame.iter().all(|&led| led == Rgb { r: 0, g: 0, b: 0 }));

        // Power-on restores the stored target brightness, not full scale.
        CONTROLS.sender().post(ComposerControl::PowerOn);
        let frame = composer.render(Instant::from_millis(30));
        assert!(frame.iter().all(|&led| led == Rgb { r: 128, g: 0, b: 0 }));
    }

    #[test]
    fn test_scheduler_paces_and_writes() {
        static WRITES: AtomicUsize = AtomicUsize::new(0);

        struct CountingDriver;
        impl OutputDriver for CountingDriver {
            fn write(&mut self, colors: &[Rgb]) {
                WRITES.fetch_add(1, Ordering::Relaxed);
                assert_eq!(colors.len(), 2);
            }
        }

        static CONTROLS: ControlMailbox = ControlMailbox::new();
        let layout = [
            ring_position(0, 2, Fraction::HALF),
            ring_position(1, 2, Fraction::HALF),
        ];
        let composer = FrameComposer::<4, 4>::new(
            red_pipeline(),
            &layout,
            CONTROLS.receiver(),
            &ComposerConfig::default(),
        );
        let mut scheduler = FrameScheduler::with_frame_duration(
            composer,
            CountingDriver,
            Duration::from_millis(10),
        );

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline.as_millis(), 10);
        assert_eq!(result.sleep_duration.as_millis(), 10);

        let result = scheduler.tick(Instant::from_millis(10));
        assert_eq!(result.next_deadline.as_millis(), 20);

        // A long stall resets the deadline instead of bursting.
        let result = scheduler.tick(Instant::from_millis(500));
        assert_eq!(result.next_deadline.as_millis(), 510);
        assert_eq!(WRITES.load(Ordering::Relaxed), 3);
    }
}
