#![no_std]

pub mod angle;
pub mod color;
pub mod composer;
pub mod context;
pub mod coords;
pub mod fixed;
pub mod frame_scheduler;
pub mod mailbox;
pub mod math8;
pub mod motion;
pub mod noise;
pub mod palette;
pub mod phase;
pub mod pipeline;
pub mod rng;
pub mod signal;
pub mod transform;
pub mod transition;
pub mod trig;
pub mod waveform;

pub use angle::{Angle, Phase};
pub use color::Rgb;
pub use composer::{
    ComposerConfig, ComposerControl, ControlMailbox, ControlReceiver, ControlSender,
    FrameComposer,
};
pub use context::PipelineContext;
pub use fixed::{Fixed, Fraction};
pub use frame_scheduler::FrameScheduler;
pub use motion::{AngleMotion, CameraRig, PointMotion};
pub use pipeline::{Domain, Pattern, Pipeline, PipelineBuilder};
pub use rng::SeedRng;
pub use signal::{BoundaryPolicy, Signal};
pub use transform::{CartesianTransform, PolarTransform};
pub use waveform::Waveform;

pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The engine is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
