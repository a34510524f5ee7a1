//! GPU rendering.
//!
//! Renderers read a [`crate::scene::DrawList`] and record their own render
//! pass into the frame's encoder. Geometry stays in logical pixels on the CPU;
//! shaders map it to NDC through a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use shapes::circle::CircleRenderer;
pub use shapes::rounded_rect::RoundedRectRenderer;
pub use shapes::segment::SegmentRenderer;
pub use shapes::text::TextRenderer;
