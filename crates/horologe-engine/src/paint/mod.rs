//! Colors shared between the widget layer and the renderers.

pub mod color;

pub use color::Color;
