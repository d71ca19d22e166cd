//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::{OutputDriver, composer::FrameComposer};

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// Tracks frame deadlines with drift correction, runs the composer and the
/// output driver, and returns timing info so the caller can sleep
/// appropriately.
pub struct FrameScheduler<'a, O: OutputDriver, const MAX_LEDS: usize, const MAX_STEPS: usize> {
    output: O,
    composer: FrameComposer<'a, MAX_LEDS, MAX_STEPS>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const MAX_LEDS: usize, const MAX_STEPS: usize>
    FrameScheduler<'a, O, MAX_LEDS, MAX_STEPS>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (90 FPS) for frame timing.
    pub fn new(composer: FrameComposer<'a, MAX_LEDS, MAX_STEPS>, driver: O) -> Self {
        Self::with_frame_duration(composer, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        composer: FrameComposer<'a, MAX_LEDS, MAX_STEPS>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            composer,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// Applies drift correction if the loop has fallen too far behind,
    /// renders the current frame, writes it to the output driver, and
    /// returns the deadline for the next frame. The caller waits until
    /// `next_deadline` before calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen more than two frames behind,
        // reset to now instead of bursting through the backlog.
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        let frame = self.composer.render(now);
        self.output.write(frame);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Get a reference to the composer.
    pub fn composer(&self) -> &FrameComposer<'a, MAX_LEDS, MAX_STEPS> {
        &self.composer
    }

    /// Get a mutable reference to the composer.
    pub fn composer_mut(&mut self) -> &mut FrameComposer<'a, MAX_LEDS, MAX_STEPS> {
        &mut self.composer
    }
}
