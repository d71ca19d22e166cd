//! Frame composition: drives one pipeline across a pixel layout.
//!
//! The composer is the render-loop side of the engine: it drains pending
//! controls, advances the pipeline exactly once per frame, shades every
//! pixel of the layout, and applies the output brightness.

use embassy_time::{Duration, Instant};

use crate::angle::Angle;
use crate::color::{Rgb, scale_color};
use crate::coords::cartesian_to_polar;
use crate::fixed::{Fixed, Fraction};
use crate::mailbox::{Mailbox, MailboxReceiver, MailboxSender};
use crate::pipeline::Pipeline;
use crate::transition::ValueTransition;

/// Polar coordinate of one physical pixel.
pub type PixelCoord = (Angle, Fraction);

/// Coordinate of a pixel on a ring of `count` LEDs at the given radius.
pub fn ring_position(index: u16, count: u16, radius: Fraction) -> PixelCoord {
    (Angle::from_ratio(u32::from(index), u32::from(count)), radius)
}

/// Coordinate of a pixel on a `width x height` matrix, centered, with the
/// longer axis spanning the unit range.
#[allow(clippy::cast_possible_truncation)]
pub fn grid_position(x: u16, y: u16, width: u16, height: u16) -> PixelCoord {
    let span = i64::from(width.max(height).max(1));
    let fx = ((2 * i64::from(x) + 1 - i64::from(width)) << 16) / span;
    let fy = ((2 * i64::from(y) + 1 - i64::from(height)) << 16) / span;
    cartesian_to_polar(Fixed::from_raw(fx as i32), Fixed::from_raw(fy as i32))
}

/// Control intents delivered to the composer from other tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerControl {
    /// Fade to a new target brightness.
    SetBrightness(u8),
    /// Fade out to 0, preserving the target brightness.
    PowerOff,
    /// Fade back in to the stored target brightness.
    PowerOn,
}

/// Type alias for the composer control mailbox.
pub type ControlMailbox = Mailbox<ComposerControl>;

/// Type alias for the control sender.
pub type ControlSender<'a> = MailboxSender<'a, ComposerControl>;

/// Type alias for the control receiver.
pub type ControlReceiver<'a> = MailboxReceiver<'a, ComposerControl>;

/// Composer configuration.
#[derive(Debug, Clone, Copy)]
pub struct ComposerConfig {
    /// Initial (and target) output brightness.
    pub brightness: u8,
    /// Duration of brightness fades.
    pub fade: Duration,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            brightness: u8::MAX,
            fade: Duration::from_millis(400),
        }
    }
}

/// Drives a pipeline across a fixed pixel layout into a frame buffer.
pub struct FrameComposer<'a, const MAX_LEDS: usize, const MAX_STEPS: usize> {
    pipeline: Pipeline<MAX_STEPS>,
    layout: &'a [PixelCoord],
    controls: ControlReceiver<'a>,
    brightness: ValueTransition<u8>,
    target_brightness: u8,
    fade: Duration,
    frame: [Rgb; MAX_LEDS],
}

impl<'a, const MAX_LEDS: usize, const MAX_STEPS: usize>
    FrameComposer<'a, MAX_LEDS, MAX_STEPS>
{
    pub fn new(
        pipeline: Pipeline<MAX_STEPS>,
        layout: &'a [PixelCoord],
        controls: ControlReceiver<'a>,
        config: &ComposerConfig,
    ) -> Self {
        Self {
            pipeline,
            layout,
            controls,
            brightness: ValueTransition::new(config.brightness),
            target_brightness: config.brightness,
            fade: config.fade,
            frame: [Rgb { r: 0, g: 0, b: 0 }; MAX_LEDS],
        }
    }

    /// Process one frame.
    ///
    /// This is the main render loop step. Call this once per output frame;
    /// the returned slice is ready for the output driver.
    pub fn render(&mut self, now: Instant) -> &[Rgb] {
        self.process_controls(now);
        self.brightness.tick(now);
        self.pipeline.advance_frame(now);

        let count = self.layout.len().min(MAX_LEDS);
        for (led, &(angle, radius)) in
            self.frame[..count].iter_mut().zip(self.layout.iter())
        {
            *led = self.pipeline.shade(angle, radius);
        }

        let brightness = self.brightness.current();
        if brightness != u8::MAX {
            for led in &mut self.frame[..count] {
                *led = scale_color(*led, brightness);
            }
        }

        &self.frame[..count]
    }

    /// Drain pending control intents (non-blocking).
    fn process_controls(&mut self, now: Instant) {
        while let Some(control) = self.controls.take() {
            match control {
                ComposerControl::SetBrightness(brightness) => {
                    self.target_brightness = brightness;
                    self.brightness.set(brightness, self.fade, now);
                }
                ComposerControl::PowerOff => {
                    self.brightness.set(0, self.fade, now);
                }
                ComposerControl::PowerOn => {
                    self.brightness.set(self.target_brightness, self.fade, now);
                }
            }
        }
    }

    pub fn pipeline(&self) -> &Pipeline<MAX_STEPS> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline<MAX_STEPS> {
        &mut self.pipeline
    }
}
