//! Horologe engine crate.
//!
//! Owns the platform loop (winit), the wgpu device, and the renderers that
//! turn a recorded [`scene::DrawList`] into pixels. Higher layers (widgets,
//! the demo host) only ever talk to the draw list and the [`core::App`] trait.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
