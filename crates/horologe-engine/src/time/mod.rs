//! Frame timing.
//!
//! One [`FrameClock`] lives in the window entry; the runtime ticks it once per
//! presented frame and resets it when a redraw follows an idle period, so
//! animations never see the idle gap as a single huge step.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
