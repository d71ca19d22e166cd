//! Transform pipeline: builder and per-frame executor.
//!
//! The builder tracks the chain's current domain and inserts polar/Cartesian
//! conversion steps automatically; `build` consumes the builder, so a frozen
//! pipeline can never be built twice or mutated structurally afterward.
//!
//! Execution is two-phase per frame. `advance_frame` visits every step's
//! mutable state once, in step order; this is the single mutation point.
//! `shade` is
//! then a pure function of the frozen frame state and may be called once per
//! pixel, redundantly, and in any order.

use embassy_time::Instant;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::angle::Angle;
use crate::color::Rgb;
use crate::context::{ContextDefaults, PipelineContext};
use crate::coords::{cartesian_to_polar, polar_to_cartesian};
use crate::fixed::{Fixed, Fraction};
use crate::palette::color_from_palette;
use crate::transform::{CartesianTransform, PolarTransform};

/// Coordinate space a pipeline step operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Cartesian,
    Polar,
}

/// Base pattern generator: the innermost layer of every pipeline.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// `(x, y) -> intensity`
    Cartesian(fn(Fixed, Fixed) -> u16),
    /// `(angle, radius) -> intensity`
    Polar(fn(Angle, Fraction) -> u16),
}

impl Pattern {
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Cartesian(_) => Domain::Cartesian,
            Self::Polar(_) => Domain::Polar,
        }
    }
}

/// One element of the frozen step list, ordered pattern side first.
///
/// A conversion step is named after the domain on its sampling side: during
/// the reverse (sample-to-pattern) walk, `ToPolar` receives polar
/// coordinates and hands Cartesian ones toward the pattern.
#[derive(Debug, Clone)]
pub enum PipelineStep {
    Cartesian(CartesianTransform),
    Polar(PolarTransform),
    ToPolar,
    ToCartesian,
}

/// Working coordinate during a `shade` walk.
#[derive(Debug, Clone, Copy)]
enum Coord {
    Cartesian(Fixed, Fixed),
    Polar(Angle, Fraction),
}

/// Pipeline under construction. Steps may still be appended and the chain
/// domain is tracked; [`Self::build`] freezes it.
#[derive(Debug)]
pub struct PipelineBuilder<const N: usize> {
    steps: Vec<PipelineStep, N>,
    domain: Domain,
    pattern: Pattern,
    palette: &'static [Rgb],
    defaults: ContextDefaults,
}

impl<const N: usize> PipelineBuilder<N> {
    /// Start a pipeline around `pattern`, colouring through `palette`.
    pub fn new(pattern: Pattern, palette: &'static [Rgb]) -> Self {
        Self {
            steps: Vec::new(),
            domain: pattern.domain(),
            pattern,
            palette,
            defaults: ContextDefaults::default(),
        }
    }

    /// Default intensity clip floor and brightness ceiling for the final
    /// colour stage.
    #[must_use]
    pub fn with_clip(mut self, clip_floor: u8, brightness_ceil: u8) -> Self {
        self.defaults = ContextDefaults {
            clip_floor,
            brightness_ceil,
        };
        self
    }

    /// Append a Cartesian transform, converting domains first if needed.
    #[must_use]
    pub fn cartesian(mut self, transform: CartesianTransform) -> Self {
        let needs_conversion = self.domain != Domain::Cartesian;
        if !self.reserve(1 + usize::from(needs_conversion)) {
            return self;
        }
        if needs_conversion {
            // Chain was polar on the pattern side; samples arrive Cartesian.
            let _ = self.steps.push(PipelineStep::ToCartesian);
            self.domain = Domain::Cartesian;
        }
        let _ = self.steps.push(PipelineStep::Cartesian(transform));
        self
    }

    /// Append a Polar transform, converting domains first if needed.
    #[must_use]
    pub fn polar(mut self, transform: PolarTransform) -> Self {
        let needs_conversion = self.domain != Domain::Polar;
        if !self.reserve(1 + usize::from(needs_conversion)) {
            return self;
        }
        if needs_conversion {
            let _ = self.steps.push(PipelineStep::ToPolar);
            self.domain = Domain::Polar;
        }
        let _ = self.steps.push(PipelineStep::Polar(transform));
        self
    }

    /// Freeze the step list.
    ///
    /// Sampling is always by `(angle, radius)`, so a trailing conversion is
    /// appended if the chain still ends in the Cartesian domain. Consuming
    /// `self` makes a second build unrepresentable.
    pub fn build(mut self) -> Pipeline<N> {
        if self.domain == Domain::Cartesian && !self.reserve(1) {
            // Degraded but valid: shade falls back to converting at the
            // pattern boundary.
        } else if self.domain == Domain::Cartesian {
            let _ = self.steps.push(PipelineStep::ToPolar);
        }
        Pipeline {
            steps: self.steps,
            pattern: self.pattern,
            palette: self.palette,
            defaults: self.defaults,
            ctx: PipelineContext::new(self.defaults),
        }
    }

    /// Check capacity for `needed` more steps; on overflow, log one
    /// diagnostic and drop the request. The pipeline stays valid; firmware
    /// must keep the device alive rather than crash.
    fn reserve(&mut self, needed: usize) -> bool {
        let free = N - self.steps.len();
        if free < needed {
            #[cfg(feature = "esp32-log")]
            println!("pipeline: step list full ({} slots), transform dropped", N);
            return false;
        }
        true
    }
}

/// Frozen pipeline: an ordered step list plus per-frame context.
#[derive(Debug)]
pub struct Pipeline<const N: usize> {
    steps: Vec<PipelineStep, N>,
    pattern: Pattern,
    palette: &'static [Rgb],
    defaults: ContextDefaults,
    ctx: PipelineContext,
}

impl<const N: usize> Pipeline<N> {
    /// Advance every step's mutable state once, in step order.
    ///
    /// This is the only mutation point for the whole pipeline; call it
    /// exactly once per output frame.
    pub fn advance_frame(&mut self, now: Instant) {
        self.ctx.begin_frame(self.defaults);
        for step in &mut self.steps {
            match step {
                PipelineStep::Cartesian(t) => t.advance(now, &mut self.ctx),
                PipelineStep::Polar(t) => t.advance(now, &mut self.ctx),
                PipelineStep::ToPolar | PipelineStep::ToCartesian => {}
            }
        }
    }

    /// Colour one pixel for the current frame. Pure read; safe to invoke
    /// redundantly and in any order across pixels.
    pub fn shade(&self, angle: Angle, radius: Fraction) -> Rgb {
        let mut coord = Coord::Polar(angle, radius);
        for step in self.steps.iter().rev() {
            coord = match (step, coord) {
                (PipelineStep::Polar(t), Coord::Polar(a, r)) => {
                    let (a, r) = t.apply(a, r);
                    Coord::Polar(a, r)
                }
                (PipelineStep::Cartesian(t), Coord::Cartesian(x, y)) => {
                    let (x, y) = t.apply(&self.ctx, x, y);
                    Coord::Cartesian(x, y)
                }
                (PipelineStep::ToPolar, Coord::Polar(a, r)) => {
                    let (x, y) = polar_to_cartesian(a, r);
                    Coord::Cartesian(x, y)
                }
                (PipelineStep::ToCartesian, Coord::Cartesian(x, y)) => {
                    let (a, r) = cartesian_to_polar(x, y);
                    Coord::Polar(a, r)
                }
                // Domain mismatches cannot be built; pass through untouched.
                (_, passthrough) => passthrough,
            };
        }

        let intensity = match (self.pattern, coord) {
            (Pattern::Polar(f), Coord::Polar(a, r)) => f(a, r),
            (Pattern::Cartesian(f), Coord::Cartesian(x, y)) => f(x, y),
            (Pattern::Polar(f), Coord::Cartesian(x, y)) => {
                let (a, r) = cartesian_to_polar(x, y);
                f(a, r)
            }
            (Pattern::Cartesian(f), Coord::Polar(a, r)) => {
                let (x, y) = polar_to_cartesian(a, r);
                f(x, y)
            }
        };
        self.colorize(intensity)
    }

    /// Number of frozen steps, conversions included.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Final colour stage: clip, shift, zoom-normalized palette lookup.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn colorize(&self, intensity: u16) -> Rgb {
        let raw_index = (intensity >> 8) as u8;
        if raw_index < self.ctx.clip_floor {
            return Rgb { r: 0, g: 0, b: 0 };
        }
        let index = raw_index.wrapping_add(self.ctx.palette_index_shift());

        // Mild dim when the camera is zoomed out past 1x, so sparse far-out
        // fields do not read brighter than the zoomed view.
        let mut brightness = self.ctx.brightness_ceil;
        if self.ctx.zoom_norm > Fixed::ONE {
            let dim = ((self.ctx.zoom_norm.raw() - Fixed::ONE.raw()) >> 11).min(96) as u8;
            brightness = brightness.saturating_sub(dim);
        }

        color_from_palette(self.palette, index, brightness)
    }
}
