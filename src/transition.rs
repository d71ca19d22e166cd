//! Time-based value transitions.
//!
//! Linear blend from the value at `set` time toward a target over a fixed
//! duration, driven by `tick`.

use embassy_time::{Duration, Instant};

use crate::color::{Rgb, blend_colors};
use crate::math8::{blend8, progress8};

/// Values that can be blended by an 8-bit progress amount.
pub trait Blend: Copy {
    fn blend(self, toward: Self, progress: u8) -> Self;
}

impl Blend for u8 {
    fn blend(self, toward: Self, progress: u8) -> Self {
        blend8(self, toward, progress)
    }
}

impl Blend for Rgb {
    fn blend(self, toward: Self, progress: u8) -> Self {
        blend_colors(self, toward, progress)
    }
}

/// A value with transition support.
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Blend> {
    from: T,
    to: T,
    current: T,
    start: Instant,
    duration: Duration,
    active: bool,
}

impl<T: Blend> ValueTransition<T> {
    pub fn new(value: T) -> Self {
        Self {
            from: value,
            to: value,
            current: value,
            start: Instant::from_millis(0),
            duration: Duration::from_millis(0),
            active: false,
        }
    }

    /// Start a transition from the current value toward `target`.
    ///
    /// A zero duration applies the target immediately.
    pub fn set(&mut self, target: T, duration: Duration, now: Instant) {
        if duration.as_millis() == 0 {
            self.current = target;
            self.to = target;
            self.active = false;
            return;
        }
        self.from = self.current;
        self.to = target;
        self.start = now;
        self.duration = duration;
        self.active = true;
    }

    /// Update the current value for this frame.
    pub fn tick(&mut self, now: Instant) {
        if !self.active {
            return;
        }
        let elapsed_ms = now.as_millis().saturating_sub(self.start.as_millis());
        let progress = progress8(Duration::from_millis(elapsed_ms), self.duration);
        self.current = self.from.blend(self.to, progress);
        if progress == u8::MAX {
            self.active = false;
        }
    }

    pub const fn current(&self) -> T {
        self.current
    }

    pub const fn is_transitioning(&self) -> bool {
        self.active
    }
}
