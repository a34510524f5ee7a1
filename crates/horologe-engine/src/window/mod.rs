//! winit event loop and the single application window.
//!
//! Frames are invalidation driven: the loop sleeps until input arrives, the
//! window resizes, or the application asks for another frame.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use winit::window::CursorIcon;
