//! Analog clock core: how far the hands must turn for a span of time, the
//! eased animation that turns them, and the draw commands for one frame.
//!
//! [`ClockDial`] is the entry point a host talks to. The
//! [`crate::widgets::clock_face::ClockFace`] widget ticks and paints it.

pub mod animator;
pub mod delta;
pub mod dial;
pub mod face;

pub use animator::{AnimPhase, AnimatorConfig, HandAngles, RotationAnimator};
pub use delta::{minutes_between, RotationDelta};
pub use dial::ClockDial;
pub use face::{paint_clock, ClockGeometry, ClockStyle};
